//! Global application configuration.
//!
//! `AppConfig` is a lazily initialized singleton loaded from `.env` and the
//! process environment. Free functions expose individual values; per-field
//! setters allow tests to override configuration without mutating the
//! environment.

use std::env;
use std::sync::{OnceLock, RwLock};

/// Runtime configuration for every crate in the workspace.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub upload_storage_root: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: u64,
    pub otp_expiry_minutes: u64,
    pub max_password_reset_requests_per_hour: u32,
    pub smtp_username: String,
    pub smtp_app_password: String,
    pub email_from_name: String,
    pub frontend_url: String,
}

static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "edubridge".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "api=info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "api.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/edubridge.db".into()),
            upload_storage_root: env::var("UPLOAD_STORAGE_ROOT")
                .unwrap_or_else(|_| "data/uploads".into()),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".into())
                .parse()
                .expect("PORT must be a valid port number"),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| "change-me".into()),
            jwt_duration_minutes: env::var("JWT_DURATION_MINUTES")
                .unwrap_or_else(|_| "60".into())
                .parse()
                .expect("JWT_DURATION_MINUTES must be an integer"),
            otp_expiry_minutes: env::var("OTP_EXPIRY_MINUTES")
                .unwrap_or_else(|_| "15".into())
                .parse()
                .expect("OTP_EXPIRY_MINUTES must be an integer"),
            max_password_reset_requests_per_hour: env::var(
                "MAX_PASSWORD_RESET_REQUESTS_PER_HOUR",
            )
            .unwrap_or_else(|_| "3".into())
            .parse()
            .expect("MAX_PASSWORD_RESET_REQUESTS_PER_HOUR must be an integer"),
            smtp_username: env::var("SMTP_USERNAME").unwrap_or_default(),
            smtp_app_password: env::var("SMTP_APP_PASSWORD").unwrap_or_default(),
            email_from_name: env::var("EMAIL_FROM_NAME").unwrap_or_else(|_| "EduBridge".into()),
            frontend_url: env::var("FRONTEND_URL").unwrap_or_default(),
        }
    }

    /// Returns a read guard over the global configuration, initializing it on
    /// first access.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Reloads the configuration from the environment, discarding overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock.write().expect("Failed to acquire AppConfig write lock");
            *guard = AppConfig::from_env();
        }
    }

    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock.write().expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters (used by tests and runtime overrides) ---

    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_database_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.database_path = value.into());
    }

    pub fn set_upload_storage_root(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.upload_storage_root = value.into());
    }

    pub fn set_jwt_secret(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.jwt_secret = value.into());
    }

    pub fn set_jwt_duration_minutes(value: u64) {
        AppConfig::set_field(|cfg| cfg.jwt_duration_minutes = value);
    }

    pub fn set_otp_expiry_minutes(value: u64) {
        AppConfig::set_field(|cfg| cfg.otp_expiry_minutes = value);
    }

    pub fn set_max_password_reset_requests_per_hour(value: u32) {
        AppConfig::set_field(|cfg| cfg.max_password_reset_requests_per_hour = value);
    }

    pub fn set_smtp_username(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.smtp_username = value.into());
    }

    pub fn set_smtp_app_password(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.smtp_app_password = value.into());
    }

    pub fn set_log_to_stdout(value: bool) {
        AppConfig::set_field(|cfg| cfg.log_to_stdout = value);
    }
}

// --- Free-function accessors ---

pub fn env() -> String {
    AppConfig::global().env.clone()
}

pub fn project_name() -> String {
    AppConfig::global().project_name.clone()
}

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn database_path() -> String {
    AppConfig::global().database_path.clone()
}

pub fn upload_storage_root() -> String {
    AppConfig::global().upload_storage_root.clone()
}

pub fn host() -> String {
    AppConfig::global().host.clone()
}

pub fn port() -> u16 {
    AppConfig::global().port
}

pub fn jwt_secret() -> String {
    AppConfig::global().jwt_secret.clone()
}

pub fn jwt_duration_minutes() -> u64 {
    AppConfig::global().jwt_duration_minutes
}

pub fn otp_expiry_minutes() -> u64 {
    AppConfig::global().otp_expiry_minutes
}

pub fn max_password_reset_requests_per_hour() -> u32 {
    AppConfig::global().max_password_reset_requests_per_hour
}

pub fn smtp_username() -> String {
    AppConfig::global().smtp_username.clone()
}

pub fn smtp_app_password() -> String {
    AppConfig::global().smtp_app_password.clone()
}

pub fn email_from_name() -> String {
    AppConfig::global().email_from_name.clone()
}

pub fn frontend_url() -> String {
    AppConfig::global().frontend_url.clone()
}

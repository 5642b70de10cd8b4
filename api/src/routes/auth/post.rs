use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::{config, format_validation_errors, state::AppState};
use db::models::password_reset_token::Model as ResetToken;
use db::models::user::Model as UserModel;
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::{AuthUser, generate_jwt};
use crate::response::ApiResponse;
use crate::services::email::EmailService;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 64, message = "Username must be 3-64 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct AuthUserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub admin: bool,
    pub token: String,
    pub expires_at: String,
}

impl AuthUserResponse {
    fn from_user(user: UserModel) -> Self {
        let (token, expires_at) = generate_jwt(user.id, user.admin);
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            admin: user.admin,
            token,
            expires_at,
        }
    }
}

/// POST /api/auth/register
///
/// Register a new (non-admin) account and issue a JWT.
///
/// ### Responses
/// - `201 Created` with the user and token
/// - `400 Bad Request` on validation failure
/// - `409 Conflict` for duplicate username/email
/// - `500 Internal Server Error` on DB error
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<AuthUserResponse>::error(
                format_validation_errors(&validation_errors),
            )),
        );
    }

    let db = app_state.db();

    match UserModel::find_by_email(db, &req.email).await {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::<AuthUserResponse>::error(
                    "A user with this email already exists",
                )),
            );
        }
        Ok(None) => {}
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AuthUserResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    }

    match UserModel::find_by_username(db, &req.username).await {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::<AuthUserResponse>::error(
                    "A user with this username already exists",
                )),
            );
        }
        Ok(None) => {}
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AuthUserResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    }

    match UserModel::create(db, &req.username, &req.email, &req.password, false).await {
        Ok(user) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                AuthUserResponse::from_user(user),
                "User registered successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<AuthUserResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// POST /api/auth/login
///
/// Authenticate and issue a JWT. Unknown usernames and wrong passwords both
/// answer `401 Invalid username or password`.
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<AuthUserResponse>::error(
                format_validation_errors(&validation_errors),
            )),
        );
    }

    match UserModel::verify_credentials(app_state.db(), &req.username, &req.password).await {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                AuthUserResponse::from_user(user),
                "Login successful",
            )),
        ),
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<AuthUserResponse>::error(
                "Invalid username or password",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<AuthUserResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

/// POST /api/auth/logout
///
/// Tokens are stateless, so logout is an acknowledgement; the client drops
/// its stored token.
pub async fn logout(AuthUser(_claims): AuthUser) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            serde_json::json!({}),
            "Logged out successfully",
        )),
    )
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    #[validate(length(min = 8, message = "New password must be at least 8 characters"))]
    pub new_password: String,
}

/// POST /api/auth/change-password
///
/// Requires the current password; re-hashes and stores the new one.
pub async fn change_password(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<serde_json::Value>::error(
                format_validation_errors(&validation_errors),
            )),
        );
    }

    let db = app_state.db();
    let user = match db::models::user::Entity::find_by_id(claims.sub).one(db).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<serde_json::Value>::error("User not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<serde_json::Value>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    if !user.verify_password(&req.current_password) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<serde_json::Value>::error(
                "Current password is incorrect",
            )),
        );
    }

    match user.set_password(db, &req.new_password).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                serde_json::json!({}),
                "Password changed successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<serde_json::Value>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// POST /api/auth/password-reset/request
///
/// Issues a 6-digit OTP and emails it. Always answers `200` so callers cannot
/// probe which addresses have accounts. Issuance is rate-limited per user per
/// hour; over-limit requests are quietly dropped.
pub async fn password_reset_request(
    State(app_state): State<AppState>,
    Json(req): Json<PasswordResetRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<serde_json::Value>::error(
                format_validation_errors(&validation_errors),
            )),
        );
    }

    let db = app_state.db();
    let accepted = (
        StatusCode::OK,
        Json(ApiResponse::success(
            serde_json::json!({}),
            "If the account exists, a reset code has been sent",
        )),
    );

    let user = match UserModel::find_by_email(db, &req.email).await {
        Ok(Some(user)) => user,
        Ok(None) => return accepted,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<serde_json::Value>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    match ResetToken::issued_in_last_hour(db, user.id).await {
        Ok(count) if count >= config::max_password_reset_requests_per_hour() as u64 => {
            tracing::warn!(user_id = user.id, "Password reset rate limit hit");
            return accepted;
        }
        Ok(_) => {}
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<serde_json::Value>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    }

    let token = match ResetToken::create(db, user.id, config::otp_expiry_minutes() as i64).await {
        Ok(token) => token,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<serde_json::Value>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    if let Err(e) = EmailService::send_password_reset_otp(&user.email, &token.code).await {
        tracing::warn!(error = %e, "OTP email delivery failed");
    }

    accepted
}

#[derive(Debug, Deserialize, Validate)]
pub struct PasswordResetVerifyRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(equal = 6, message = "Code must be 6 digits"))]
    pub code: String,
}

/// POST /api/auth/password-reset/verify
///
/// Checks the OTP and marks it verified; the reset step only accepts
/// verified codes.
pub async fn password_reset_verify(
    State(app_state): State<AppState>,
    Json(req): Json<PasswordResetVerifyRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<serde_json::Value>::error(
                format_validation_errors(&validation_errors),
            )),
        );
    }

    let db = app_state.db();
    let invalid = (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<serde_json::Value>::error(
            "Invalid or expired code",
        )),
    );

    let user = match UserModel::find_by_email(db, &req.email).await {
        Ok(Some(user)) => user,
        Ok(None) => return invalid,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<serde_json::Value>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    match ResetToken::find_valid(db, user.id, &req.code).await {
        Ok(Some(token)) => match token.mark_verified(db).await {
            Ok(_) => (
                StatusCode::OK,
                Json(ApiResponse::success(
                    serde_json::json!({}),
                    "Code verified",
                )),
            ),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<serde_json::Value>::error(format!(
                    "Database error: {}",
                    e
                ))),
            ),
        },
        Ok(None) => invalid,
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<serde_json::Value>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct PasswordResetConfirmRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(equal = 6, message = "Code must be 6 digits"))]
    pub code: String,
    #[validate(length(min = 8, message = "New password must be at least 8 characters"))]
    pub new_password: String,
}

/// POST /api/auth/password-reset/confirm
///
/// Sets a new password given a verified, unexpired, unused code. The code is
/// consumed on success.
pub async fn password_reset_confirm(
    State(app_state): State<AppState>,
    Json(req): Json<PasswordResetConfirmRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<serde_json::Value>::error(
                format_validation_errors(&validation_errors),
            )),
        );
    }

    let db = app_state.db();
    let invalid = (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<serde_json::Value>::error(
            "Invalid or expired code",
        )),
    );

    let user = match UserModel::find_by_email(db, &req.email).await {
        Ok(Some(user)) => user,
        Ok(None) => return invalid,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<serde_json::Value>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let token = match ResetToken::find_verified(db, user.id, &req.code).await {
        Ok(Some(token)) => token,
        Ok(None) => return invalid,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<serde_json::Value>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let result = async {
        user.set_password(db, &req.new_password).await?;
        token.mark_used(db).await
    }
    .await;

    match result {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                serde_json::json!({}),
                "Password reset successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<serde_json::Value>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

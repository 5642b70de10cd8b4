//! Outbound email over SMTP via `lettre`, used for the forgot-password OTP.
//!
//! When no SMTP credentials are configured (development, tests) the send is
//! skipped and the code is only persisted; flows stay exercisable without a
//! mail account.

use common::config;
use lettre::{
    AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header},
    transport::smtp::{AsyncSmtpTransport, authentication::Credentials},
};
use tracing::{info, warn};

pub struct EmailService;

impl EmailService {
    fn mailer() -> Result<AsyncSmtpTransport<Tokio1Executor>, Box<dyn std::error::Error + Send + Sync>>
    {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay("smtp.gmail.com")?
            .credentials(Credentials::new(
                config::smtp_username(),
                config::smtp_app_password(),
            ))
            .build();
        Ok(transport)
    }

    /// Sends the 6-digit password-reset code to `to_email`.
    pub async fn send_password_reset_otp(
        to_email: &str,
        code: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if config::smtp_username().is_empty() {
            info!(to = to_email, "SMTP not configured; skipping OTP email");
            return Ok(());
        }

        let from_name = config::email_from_name();
        let from_email = config::smtp_username();
        let expiry_minutes = config::otp_expiry_minutes();

        let text_body = format!(
            "Hello,\n\n\
            Your {} password reset code is: {}\n\n\
            The code expires in {} minutes and can be used once.\n\n\
            If you did not request a password reset, you can ignore this email.",
            from_name, code, expiry_minutes
        );
        let html_body = format!(
            "<p>Hello,</p>\
            <p>Your {} password reset code is:</p>\
            <p style=\"font-size:24px;letter-spacing:4px\"><strong>{}</strong></p>\
            <p>The code expires in {} minutes and can be used once.</p>\
            <p>If you did not request a password reset, you can ignore this email.</p>",
            from_name, code, expiry_minutes
        );

        let email = Message::builder()
            .from(format!("{} <{}>", from_name, from_email).parse()?)
            .to(to_email.parse()?)
            .subject("Your password reset code")
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(text_body),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html_body),
                    ),
            )?;

        match Self::mailer()?.send(email).await {
            Ok(_) => Ok(()),
            Err(e) => {
                warn!(error = %e, to = to_email, "Failed to send OTP email");
                Err(Box::new(e))
            }
        }
    }
}

use async_trait::async_trait;

use signup_core::domain::mask_email;
use signup_core::ports::{EmailMessage, Mailer, MailerError};

/// Stand-in transport used when no mail provider is configured.
/// Logs the skipped message and reports success.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        tracing::warn!(
            to = %mask_email(&message.to),
            subject = %message.subject,
            "Mail transport not configured, skipping email"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_mailer_always_succeeds() {
        let message = EmailMessage {
            to: "dev@example.com".to_string(),
            subject: "Hi".to_string(),
            text: "Hi".to_string(),
            html: "<p>Hi</p>".to_string(),
        };

        assert!(LogMailer.send(&message).await.is_ok());
    }
}

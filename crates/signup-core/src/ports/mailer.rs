//! Outbound email port.

use async_trait::async_trait;

/// A fully rendered email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Mail transport - abstraction over email providers.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a message. Callers treat failure as best-effort.
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError>;
}

/// Mail transport errors.
#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("Transport failed: {0}")]
    Transport(String),

    #[error("Provider rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

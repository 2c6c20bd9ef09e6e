//! Fire-and-forget notification dispatch.

pub mod templates;

use std::sync::Arc;

use tokio::task::JoinHandle;

use signup_core::domain::mask_email;
use signup_core::ports::{EmailMessage, Mailer};

use crate::observability::run_detached;

/// Hands messages to the mail transport on a detached task.
///
/// The caller never waits for delivery and never sees its outcome;
/// failures and panics in the transport are logged here and dropped.
#[derive(Clone)]
pub struct Notifier {
    mailer: Arc<dyn Mailer>,
}

impl Notifier {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }

    /// Send `message` in the background. The handle is only useful to
    /// tests; request handlers drop it.
    pub fn dispatch(&self, message: EmailMessage) -> JoinHandle<()> {
        let mailer = self.mailer.clone();

        tokio::spawn(run_detached("notification", async move {
            match mailer.send(&message).await {
                Ok(()) => tracing::debug!(
                    to = %mask_email(&message.to),
                    subject = %message.subject,
                    "Notification sent"
                ),
                Err(e) => tracing::error!(
                    to = %mask_email(&message.to),
                    subject = %message.subject,
                    error = %e,
                    "Failed to send notification email"
                ),
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use signup_core::ports::MailerError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording(Mutex<Vec<String>>);

    #[async_trait]
    impl Mailer for Recording {
        async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
            self.0.lock().unwrap().push(message.to.clone());
            Ok(())
        }
    }

    struct Failing;

    #[async_trait]
    impl Mailer for Failing {
        async fn send(&self, _message: &EmailMessage) -> Result<(), MailerError> {
            Err(MailerError::Transport("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_dispatch_sends_in_background() {
        let mailer = Arc::new(Recording::default());
        let notifier = Notifier::new(mailer.clone());

        notifier
            .dispatch(templates::beta_confirmation("dev@example.com"))
            .await
            .unwrap();

        assert_eq!(*mailer.0.lock().unwrap(), vec!["dev@example.com"]);
    }

    #[tokio::test]
    async fn test_dispatch_swallows_failures() {
        let notifier = Notifier::new(Arc::new(Failing));

        let handle = notifier.dispatch(templates::beta_confirmation("dev@example.com"));
        assert!(handle.await.is_ok());
    }

    struct Panicking;

    #[async_trait]
    impl Mailer for Panicking {
        async fn send(&self, _message: &EmailMessage) -> Result<(), MailerError> {
            panic!("template rendering bug");
        }
    }

    #[tokio::test]
    async fn test_dispatch_contains_transport_panic() {
        let notifier = Notifier::new(Arc::new(Panicking));

        let handle = notifier.dispatch(templates::beta_confirmation("dev@example.com"));
        assert!(handle.await.is_ok());

        // The notifier keeps working after a panicking send.
        let handle = notifier.dispatch(templates::beta_confirmation("dev@example.com"));
        assert!(handle.await.is_ok());
    }
}

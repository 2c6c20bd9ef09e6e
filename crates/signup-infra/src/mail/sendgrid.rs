//! SendGrid v3 mail transport.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use signup_core::domain::mask_email;
use signup_core::ports::{EmailMessage, Mailer, MailerError};

pub const DEFAULT_ENDPOINT: &str = "https://api.sendgrid.com/v3/mail/send";
pub const DEFAULT_FROM_NAME: &str = "BridgeMind";

#[derive(Debug, Clone)]
pub struct SendGridConfig {
    pub api_key: String,
    pub from_email: String,
    pub from_name: String,
    pub endpoint: String,
}

impl SendGridConfig {
    pub fn new(api_key: impl Into<String>, from_email: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            from_email: from_email.into(),
            from_name: DEFAULT_FROM_NAME.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn with_from_name(mut self, from_name: impl Into<String>) -> Self {
        self.from_name = from_name.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Sends mail through the SendGrid HTTP API.
pub struct SendGridMailer {
    config: SendGridConfig,
    client: reqwest::Client,
}

impl SendGridMailer {
    pub fn new(config: SendGridConfig) -> Result<Self, MailerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| MailerError::Transport(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn payload(&self, message: &EmailMessage) -> serde_json::Value {
        json!({
            "personalizations": [{
                "to": [{ "email": message.to }],
                "subject": message.subject,
            }],
            "from": {
                "email": self.config.from_email,
                "name": self.config.from_name,
            },
            "content": [
                { "type": "text/plain", "value": message.text },
                { "type": "text/html", "value": message.html },
            ],
        })
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&self.payload(message))
            .send()
            .await
            .map_err(|e| MailerError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailerError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(to = %mask_email(&message.to), "Email accepted by SendGrid");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn message() -> EmailMessage {
        EmailMessage {
            to: "maker@example.com".to_string(),
            subject: "Submission received".to_string(),
            text: "Thanks".to_string(),
            html: "<p>Thanks</p>".to_string(),
        }
    }

    fn mailer(server: &MockServer) -> SendGridMailer {
        let config = SendGridConfig::new("test-key", "team@example.com")
            .with_endpoint(format!("{}/v3/mail/send", server.uri()));
        SendGridMailer::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_send_posts_sendgrid_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/mail/send"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "personalizations": [{
                    "to": [{ "email": "maker@example.com" }],
                    "subject": "Submission received",
                }],
                "from": { "email": "team@example.com", "name": "BridgeMind" },
            })))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        mailer(&server).send(&message()).await.unwrap();
    }

    #[tokio::test]
    async fn test_non_success_status_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let err = mailer(&server).send(&message()).await.unwrap_err();
        assert!(matches!(
            err,
            MailerError::Rejected { status: 401, ref body } if body == "bad key"
        ));
    }

    #[test]
    fn test_payload_carries_both_bodies() {
        let mailer = SendGridMailer::new(
            SendGridConfig::new("k", "team@example.com").with_from_name("Team"),
        )
        .unwrap();
        let payload = mailer.payload(&message());

        assert_eq!(payload["from"]["name"], "Team");
        assert_eq!(payload["content"][0]["type"], "text/plain");
        assert_eq!(payload["content"][1]["value"], "<p>Thanks</p>");
    }
}

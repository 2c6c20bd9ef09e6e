//! Shared fixtures for the HTTP tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::test;
use async_trait::async_trait;
use serde_json::Value;

use api_server::notifications::Notifier;
use api_server::state::{AppState, HttpSettings, Stores};
use signup_core::ports::{EmailMessage, Mailer, MailerError};
use signup_infra::rate_limit::{FixedWindowGate, RateLimitConfig};

/// Mailer that keeps every message it is handed.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Mailer whose transport is always down.
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _message: &EmailMessage) -> Result<(), MailerError> {
        Err(MailerError::Transport("connection refused".to_string()))
    }
}

pub struct Fixture {
    pub max_requests: u32,
    pub allowed_origin: Option<String>,
    pub mailer: Arc<dyn Mailer>,
}

impl Default for Fixture {
    fn default() -> Self {
        Self {
            max_requests: 100,
            allowed_origin: None,
            mailer: Arc::new(RecordingMailer::default()),
        }
    }
}

impl Fixture {
    pub fn state(self) -> AppState {
        let settings = HttpSettings {
            environment: "test".to_string(),
            cors_origin: self
                .allowed_origin
                .clone()
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            allowed_origin: self.allowed_origin,
        };
        let gate = Arc::new(FixedWindowGate::new(RateLimitConfig {
            max_requests: self.max_requests,
            window: Duration::from_secs(600),
        }));

        AppState::new(settings, Stores::in_memory(), gate, Notifier::new(self.mailer))
    }
}

pub fn post_json(uri: &str, body: Value) -> test::TestRequest {
    test::TestRequest::post().uri(uri).set_json(body)
}

/// Let detached notification tasks run.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

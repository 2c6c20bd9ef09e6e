//! Admission gate port.

use async_trait::async_trait;
use std::time::Duration;

/// Admission gate - decides whether a client may submit right now.
///
/// Implementations count per client identity. The in-process gate keeps
/// its counters to itself; a shared-store gate can be dropped in for
/// multi-instance deployments without touching callers.
#[async_trait]
pub trait AdmissionGate: Send + Sync {
    /// Count a request for `key` and report whether it is admitted.
    /// Denied requests are not counted.
    async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError>;
}

/// Result of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_after: Duration,
}

/// Rate limit errors.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Backend error: {0}")]
    Backend(String),
}

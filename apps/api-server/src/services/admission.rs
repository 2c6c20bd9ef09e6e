use signup_core::error::DomainError;
use signup_core::ports::AdmissionGate;

/// Consult the gate for `client`. A gate backend failure is logged and
/// the request is let through.
pub async fn admit(gate: &dyn AdmissionGate, client: &str) -> Result<(), DomainError> {
    match gate.check(client).await {
        Ok(result) if !result.allowed => {
            tracing::warn!(client = %client, "Rate limit exceeded");
            Err(DomainError::RateLimited {
                retry_after: result.reset_after,
            })
        }
        Ok(_) => Ok(()),
        Err(e) => {
            tracing::error!(error = %e, "Admission gate error, failing open");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use signup_core::ports::{RateLimitError, RateLimitResult};
    use signup_infra::rate_limit::{FixedWindowGate, RateLimitConfig};
    use std::time::Duration;

    struct BrokenGate;

    #[async_trait]
    impl AdmissionGate for BrokenGate {
        async fn check(&self, _key: &str) -> Result<RateLimitResult, RateLimitError> {
            Err(RateLimitError::Backend("redis down".to_string()))
        }
    }

    #[tokio::test]
    async fn test_backend_failure_fails_open() {
        assert!(admit(&BrokenGate, "client").await.is_ok());
    }

    #[tokio::test]
    async fn test_denial_carries_retry_after() {
        let gate = FixedWindowGate::new(RateLimitConfig {
            max_requests: 1,
            window: Duration::from_secs(60),
        });

        admit(&gate, "client").await.unwrap();
        let err = admit(&gate, "client").await.unwrap_err();
        assert!(matches!(err, DomainError::RateLimited { retry_after } if retry_after <= Duration::from_secs(60)));
    }
}

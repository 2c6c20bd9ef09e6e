//! Domain-level error types.

use std::time::Duration;

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Outcome of a signup flow that did not end in a persisted record.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// The uniqueness key of the form is already taken. Carries the
    /// user-facing message for the form type.
    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Request origin not allowed")]
    OriginRejected,

    #[error("Rate limit exceeded, retry after {}s", retry_after.as_secs())]
    RateLimited { retry_after: Duration },

    #[error("Repository failure: {0}")]
    Repository(RepoError),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    /// A storage-level uniqueness constraint rejected the insert.
    #[error("Unique constraint violated: {0}")]
    Duplicate(String),
}

impl DomainError {
    /// Map a store failure, turning uniqueness violations into the form's
    /// duplicate message.
    pub fn from_store(err: RepoError, duplicate_message: &str) -> Self {
        match err {
            RepoError::Duplicate(_) => DomainError::Duplicate(duplicate_message.to_string()),
            other => DomainError::Repository(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_store_error_becomes_form_message() {
        let err = DomainError::from_store(
            RepoError::Duplicate("idx_beta_signups_email".to_string()),
            "already registered",
        );
        assert!(matches!(err, DomainError::Duplicate(msg) if msg == "already registered"));
    }

    #[test]
    fn test_other_store_errors_pass_through() {
        let err = DomainError::from_store(RepoError::Query("boom".to_string()), "unused");
        assert!(matches!(err, DomainError::Repository(RepoError::Query(_))));
    }
}

//! # Signup Infrastructure
//!
//! Concrete implementations of the ports defined in `signup-core`.
//! This crate contains the record stores, admission gates and mail
//! transports.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL record stores via SeaORM
//! - `redis` - Redis-backed admission gate for multi-instance deployments
//! - `test-util` - `MockClock` for driving gate windows from tests

pub mod database;
pub mod mail;
pub mod rate_limit;

// Re-exports - In-Memory
pub use database::{
    InMemoryBetaSignupStore, InMemoryCompetitionSignupStore, InMemoryCompetitionSubmissionStore,
    InMemoryGoalpostBetaStore, InMemoryStore,
};
pub use mail::{LogMailer, SendGridConfig, SendGridMailer};
pub use rate_limit::{FixedWindowGate, RateLimitConfig, SystemClock};

#[cfg(feature = "postgres")]
pub use database::{
    DatabaseConfig, PostgresBetaSignupStore, PostgresCompetitionSignupStore,
    PostgresCompetitionSubmissionStore, PostgresGoalpostBetaStore,
};

// Re-exports - Redis
#[cfg(feature = "redis")]
pub use rate_limit::{RedisAdmissionGate, RedisGateConfig};

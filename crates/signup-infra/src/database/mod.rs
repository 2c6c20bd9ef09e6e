//! Record stores - PostgreSQL via SeaORM and an in-memory fallback.

mod memory;

#[cfg(feature = "postgres")]
mod connections;
#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use memory::{
    InMemoryBetaSignupStore, InMemoryCompetitionSignupStore, InMemoryCompetitionSubmissionStore,
    InMemoryGoalpostBetaStore, InMemoryStore, UniqueKey,
};

#[cfg(feature = "postgres")]
pub use connections::{DatabaseConfig, connect};

#[cfg(feature = "postgres")]
pub use postgres_repo::{
    PostgresBetaSignupStore, PostgresCompetitionSignupStore, PostgresCompetitionSubmissionStore,
    PostgresGoalpostBetaStore,
};

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;

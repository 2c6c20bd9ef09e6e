//! # Signup Core
//!
//! The domain layer of the signup service.
//! Entities, per-entity validation and the ports that infrastructure
//! implements. No infrastructure dependencies live here.

pub mod domain;
pub mod error;
pub mod ports;
pub mod validation;

pub use error::{DomainError, RepoError};
pub use validation::{ValidationErrors, Violation};

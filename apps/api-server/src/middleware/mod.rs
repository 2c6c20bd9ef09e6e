//! Middleware, extractors and error mapping.

pub mod client;
pub mod cors;
pub mod error;

pub use client::ClientContext;
pub use cors::Cors;
pub use error::{AppError, AppResult};

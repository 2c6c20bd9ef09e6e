//! # Signup Shared
//!
//! Wire types of the signup API: request bodies, response bodies and the
//! problem-details error body. Kept free of server dependencies so a
//! client can depend on it directly.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;

//! Observability module - request IDs and panic handling.

pub mod panic;
mod request_id;

pub use panic::{install_panic_hook, run_detached};
pub use request_id::{REQUEST_ID_HEADER, RequestId, RequestIdMiddleware};

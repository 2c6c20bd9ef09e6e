use std::fmt::Debug;
use std::time::Instant;

/// Monotonic time source, injectable so window expiry can be tested
/// without sleeping.
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> Instant;
}

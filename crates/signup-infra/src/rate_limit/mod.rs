//! Admission gate implementations.

mod clock;
mod memory;

pub use clock::SystemClock;
#[cfg(any(test, feature = "test-util"))]
pub use clock::MockClock;
pub use memory::{FixedWindowGate, RateLimitConfig};

#[cfg(feature = "redis")]
mod redis;
#[cfg(feature = "redis")]
pub use self::redis::{RedisAdmissionGate, RedisGateConfig};

//! Background jobs.

#[cfg(feature = "scheduler")]
mod scheduler;
mod sweep;

#[cfg(feature = "scheduler")]
pub use scheduler::Scheduler;
#[cfg(feature = "scheduler")]
pub use sweep::schedule_gate_sweep;
pub use sweep::{SWEEP_INTERVAL, sweep_gate, spawn_interval_sweep};

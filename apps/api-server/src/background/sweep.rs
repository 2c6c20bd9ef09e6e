//! Periodic cleanup of expired admission windows.

use std::sync::Arc;
use std::time::Duration;

use signup_core::ports::Clock;
use signup_infra::rate_limit::FixedWindowGate;
use tokio::task::JoinHandle;

use crate::observability::run_detached;

/// Hourly, on the hour.
pub const SWEEP_SCHEDULE: &str = "0 0 * * * *";
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Drop windows that can no longer affect a decision.
pub fn sweep_gate<C: Clock>(gate: &FixedWindowGate<C>) -> usize {
    let removed = gate.sweep();
    tracing::debug!(removed, tracked = gate.tracked(), "Admission windows swept");
    removed
}

/// Register the sweep as a cron job.
#[cfg(feature = "scheduler")]
pub async fn schedule_gate_sweep(
    scheduler: &super::Scheduler,
    gate: Arc<FixedWindowGate>,
) -> Result<uuid::Uuid, tokio_cron_scheduler::JobSchedulerError> {
    scheduler
        .add_cron(SWEEP_SCHEDULE, move || {
            let gate = gate.clone();
            run_detached("gate-sweep", async move {
                sweep_gate(&gate);
            })
        })
        .await
}

/// Run the sweep on a plain interval. Used when the cron scheduler is
/// compiled out or fails to start.
pub fn spawn_interval_sweep(gate: Arc<FixedWindowGate>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            run_detached("gate-sweep", async {
                sweep_gate(&gate);
            })
            .await;
        }
    })
}

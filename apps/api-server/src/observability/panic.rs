//! Panic handling for the process and for detached tasks.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;

tokio::task_local! {
    static DETACHED: &'static str;
}

/// Whether the current code runs inside [`run_detached`].
pub fn in_detached_task() -> bool {
    DETACHED.try_with(|_| ()).is_ok()
}

/// Run a fire-and-forget job. A panic inside `job` is caught and logged;
/// it never reaches the process-wide hook's exit path.
pub async fn run_detached<F>(name: &'static str, job: F)
where
    F: Future<Output = ()>,
{
    let guarded = AssertUnwindSafe(job).catch_unwind();
    if let Err(payload) = DETACHED.scope(name, guarded).await {
        tracing::error!(task = name, panic = %panic_message(&payload), "Detached task panicked");
    }
}

/// Log synchronous faults and exit with status 1. Panics raised inside
/// [`run_detached`] are left to it.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if in_detached_task() {
            return;
        }
        tracing::error!(panic = %info, "Unrecoverable panic, exiting");
        default_hook(info);
        std::process::exit(1);
    }));
}

fn panic_message(payload: &Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

//! # TaskActor: the supervised restart loop.
//!
//! Keeps one [`Task`] running, relaunching it after every panic.
//!
//! ## State machine
//! ```text
//! Running ── panic ──► Faulted ── report via Fault ──► Backoff ── sleep(delay) ──► Running
//!    │
//!    └── returns normally ──► finished (no restart)
//!
//! shutdown() at any point ──► execution aborted / sleep interrupted ──► finished
//! ```
//!
//! ## Rules
//! - Both `Task::spawn()` and the future it returns run inside the trap.
//! - Every execution is its own Tokio task, launched only after the previous one exited
//!   and the backoff elapsed (never two executions at once).
//! - The restart mutex is held for the read-compute-update only, never across the sleep.
//! - A fault is never terminal; only normal completion or `shutdown()` ends the loop.

use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicU64, Ordering},
};
use std::time::Duration;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{
    core::restart::RestartState,
    logger::LoggerRef,
    tasks::TaskRef,
    trap::{Fault, trap_future},
};

/// Runs a single task under supervision.
pub(crate) struct TaskActor {
    /// Task to keep running.
    pub task: TaskRef,
    /// Sink for fault reports.
    pub logger: Option<LoggerRef>,
    /// Restart bookkeeping; locked only to compute the next delay.
    pub state: Arc<Mutex<RestartState>>,
    /// Number of recovered faults, readable from the handle.
    pub restarts: Arc<AtomicU64>,
}

impl TaskActor {
    /// Runs the loop until the task returns normally or `token` is cancelled.
    pub(crate) async fn run(self, token: CancellationToken) {
        let name = self.task.name().to_owned();
        debug!(task = %name, "supervised task started");

        loop {
            // `spawn()` itself may panic before yielding a future, so it runs inside the trap too.
            let task = Arc::clone(&self.task);
            let mut execution = tokio::spawn(trap_future(async move { task.spawn().await }));

            let outcome = select! {
                res = &mut execution => res,
                _ = token.cancelled() => {
                    execution.abort();
                    debug!(task = %name, "supervised task stopped by shutdown");
                    break;
                }
            };

            let fault = match outcome {
                Ok(Ok(())) => {
                    debug!(task = %name, "supervised task finished");
                    break;
                }
                Ok(Err(fault)) => fault,
                Err(join_err) if join_err.is_panic() => Fault::from_payload(join_err.into_panic()),
                Err(join_err) => {
                    warn!(task = %name, error = %join_err, "supervised execution was cancelled");
                    break;
                }
            };

            let restart = self.restarts.fetch_add(1, Ordering::Relaxed) + 1;
            let restart_text = restart.to_string();
            fault.report(
                self.logger.as_deref(),
                &[("task", name.as_str()), ("restart", restart_text.as_str())],
            );

            let delay = self.next_delay();
            debug!(task = %name, restart, delay = ?delay, "restarting supervised task");
            if !delay.is_zero() {
                select! {
                    _ = time::sleep(delay) => {}
                    _ = token.cancelled() => {
                        debug!(task = %name, "supervised task stopped during backoff");
                        break;
                    }
                }
            }
        }
    }

    fn next_delay(&self) -> Duration {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.next_delay(time::Instant::now())
    }
}

//! # Handle to a running supervised task.
//!
//! Returned by [`Supervisor::start`](crate::Supervisor::start). Dropping the handle
//! detaches it: the supervised loop keeps running until the task returns normally
//! or the process exits.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Observes and stops one supervised loop.
#[derive(Debug)]
pub struct SupervisorHandle {
    join: JoinHandle<()>,
    token: CancellationToken,
    restarts: Arc<AtomicU64>,
}

impl SupervisorHandle {
    pub(crate) fn new(
        join: JoinHandle<()>,
        token: CancellationToken,
        restarts: Arc<AtomicU64>,
    ) -> Self {
        Self {
            join,
            token,
            restarts,
        }
    }

    /// Number of faults recovered so far (one restart per fault).
    pub fn restarts(&self) -> u64 {
        self.restarts.load(Ordering::Relaxed)
    }

    /// True once the loop has exited (normal completion or shutdown).
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Requests the loop to stop.
    ///
    /// A running execution is aborted at its next `.await`; a pending backoff
    /// sleep is interrupted. Idempotent.
    pub fn shutdown(&self) {
        self.token.cancel();
    }

    /// Waits for the loop to exit and returns the total number of restarts.
    pub async fn join(self) -> u64 {
        if let Err(e) = self.join.await {
            tracing::warn!(error = %e, "supervisor loop terminated abnormally");
        }
        self.restarts.load(Ordering::Relaxed)
    }
}

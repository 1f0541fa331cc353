//! # Async trap boundary.
//!
//! [`trap_future`] is the async counterpart of [`trap`](crate::trap()): a panic raised
//! while the wrapped future is being polled is captured as a [`Fault`] instead of
//! unwinding into the executor.
//!
//! Every poll runs inside its own [`TrapScope`], so the thread-bound marker never
//! survives across an `.await` point even when the task migrates between workers.

use std::future::{Future, poll_fn};
use std::panic::AssertUnwindSafe;
use std::pin::pin;

use futures::FutureExt;

use crate::trap::{Fault, TrapScope};

/// Awaits `fut`, capturing a panic as a [`Fault`].
///
/// # Example
/// ```
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let res: Result<(), faultvisor::Fault> = faultvisor::trap_future(async { panic!("boom") }).await;
/// assert_eq!(res.unwrap_err().message(), "boom");
/// # }
/// ```
pub async fn trap_future<F: Future>(fut: F) -> Result<F::Output, Fault> {
    let mut fut = pin!(AssertUnwindSafe(fut).catch_unwind());
    poll_fn(|cx| {
        let _scope = TrapScope::enter();
        fut.as_mut()
            .poll(cx)
            .map(|res| res.map_err(Fault::capture))
    })
    .await
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_ready_value_passes_through() {
        let res = trap_future(async { 5 }).await;
        assert_eq!(res.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_panic_after_await_is_trapped() {
        let res: Result<(), Fault> = trap_future(async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            panic!("late panic");
        })
        .await;

        let fault = res.unwrap_err();
        assert_eq!(fault.message(), "late panic");
        assert!(fault.backtrace().is_some_and(|b| b.contains("late panic")));
    }

    #[tokio::test]
    async fn test_spawned_trap_is_send() {
        let handle: tokio::task::JoinHandle<Result<(), Fault>> =
            tokio::spawn(trap_future(async { panic!("in task") }));
        let fault = handle.await.expect("task must not panic").unwrap_err();
        assert_eq!(fault.message(), "in task");
    }
}

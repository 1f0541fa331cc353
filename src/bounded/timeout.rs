//! Deadline-bounded execution.
//!
//! The operation runs on its own Tokio task ([`run_with_timeout`]) or on the
//! blocking pool ([`run_with_timeout_blocking`]), and the caller waits on
//! `tokio::time::timeout` over its `JoinHandle`:
//!
//! ```text
//! tokio::spawn(op) ──► JoinHandle
//!                          │
//! time::timeout(d, handle) ├─ finished first ─► Ok(v) / TimeoutError::Failed(e)
//!                          └─ deadline first  ─► TimeoutError::Elapsed (handle dropped,
//!                                                op keeps running detached)
//! ```

use std::future::Future;
use std::panic;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time;
use tracing::debug;

use crate::error::TimeoutError;

/// Races `op` against a `timeout` deadline.
///
/// If `op` finishes first its own result is returned, with an error wrapped
/// as [`TimeoutError::Failed`]. If the deadline wins,
/// [`TimeoutError::Elapsed`] is returned and `op` is left running in the
/// background; its eventual result is discarded.
///
/// A panic inside `op` is resumed on the caller.
///
/// # Panics
/// Panics if called outside of a Tokio runtime.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use faultvisor::run_with_timeout;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let res = run_with_timeout(Duration::from_millis(10), async {
///         tokio::time::sleep(Duration::from_secs(1)).await;
///         Ok::<_, std::io::Error>(42)
///     })
///     .await;
///     assert!(res.unwrap_err().is_elapsed());
/// }
/// ```
pub async fn run_with_timeout<T, E, Fut>(timeout: Duration, op: Fut) -> Result<T, TimeoutError<E>>
where
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    race(timeout, tokio::spawn(op)).await
}

/// Runs a synchronous `op` on the blocking pool and races it against `timeout`.
///
/// Same outcomes as [`run_with_timeout`]. Use this for work that blocks the
/// thread (file I/O, CPU-bound loops, `std::thread::sleep`): an `async` body
/// that never yields cannot lose the race. On expiry the blocking call keeps
/// running on its pool thread until it returns.
///
/// # Panics
/// Panics if called outside of a Tokio runtime.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use faultvisor::run_with_timeout_blocking;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let res = run_with_timeout_blocking(Duration::from_secs(1), || "42".parse::<u32>()).await;
///     assert_eq!(res.unwrap(), 42);
/// }
/// ```
pub async fn run_with_timeout_blocking<T, E, F>(
    timeout: Duration,
    op: F,
) -> Result<T, TimeoutError<E>>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    race(timeout, tokio::task::spawn_blocking(op)).await
}

async fn race<T, E>(
    timeout: Duration,
    handle: JoinHandle<Result<T, E>>,
) -> Result<T, TimeoutError<E>> {
    match time::timeout(timeout, handle).await {
        Ok(Ok(Ok(value))) => Ok(value),
        Ok(Ok(Err(e))) => Err(TimeoutError::Failed(e)),
        Ok(Err(join_err)) if join_err.is_panic() => panic::resume_unwind(join_err.into_panic()),
        Ok(Err(_)) => Err(TimeoutError::Canceled),
        Err(_) => {
            debug!(timeout = ?timeout, "operation deadline elapsed; leaving it detached");
            Err(TimeoutError::Elapsed { timeout })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    };

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_slow_operation_hits_deadline() {
        let res = run_with_timeout(Duration::from_millis(50), async {
            time::sleep(Duration::from_millis(100)).await;
            Ok::<_, String>("late")
        })
        .await;

        let err = res.unwrap_err();
        assert!(err.is_elapsed());
        assert_eq!(err.as_label(), "timeout_elapsed");
        assert!(err.to_string().contains("50ms"), "text: {err}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_operation_error_is_returned_verbatim() {
        let res: Result<(), _> =
            run_with_timeout(Duration::from_millis(100), async { Err("bad input".to_string()) })
                .await;

        let err = res.unwrap_err();
        assert!(!err.is_elapsed());
        assert_eq!(err.to_string(), "bad input");
        assert_eq!(err.into_inner().as_deref(), Some("bad input"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_operation_returns_value() {
        let res = run_with_timeout(Duration::from_secs(1), async {
            time::sleep(Duration::from_millis(10)).await;
            Ok::<_, String>(7)
        })
        .await;
        assert_eq!(res.unwrap(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_operation_keeps_running() {
        let done = Arc::new(AtomicBool::new(false));
        let flag = done.clone();

        let res = run_with_timeout(Duration::from_millis(50), async move {
            time::sleep(Duration::from_millis(100)).await;
            flag.store(true, Ordering::SeqCst);
            Ok::<_, String>(())
        })
        .await;
        assert!(res.unwrap_err().is_elapsed());
        assert!(!done.load(Ordering::SeqCst));

        time::sleep(Duration::from_millis(100)).await;
        assert!(done.load(Ordering::SeqCst), "operation was not cancelled");
    }

    #[tokio::test]
    async fn test_blocking_operation_hits_deadline() {
        let done = Arc::new(AtomicBool::new(false));
        let flag = done.clone();

        let res = run_with_timeout_blocking(Duration::from_millis(50), move || {
            std::thread::sleep(Duration::from_millis(100));
            flag.store(true, Ordering::SeqCst);
            Ok::<_, String>("late")
        })
        .await;

        assert!(res.unwrap_err().is_elapsed());
        assert!(!done.load(Ordering::SeqCst));

        time::sleep(Duration::from_millis(200)).await;
        assert!(done.load(Ordering::SeqCst), "blocking call ran to completion");
    }

    #[tokio::test]
    async fn test_blocking_operation_error_is_returned_verbatim() {
        let res: Result<u32, _> =
            run_with_timeout_blocking(Duration::from_millis(100), || Err("bad input".to_string()))
                .await;

        let err = res.unwrap_err();
        assert!(!err.is_elapsed());
        assert_eq!(err.into_inner().as_deref(), Some("bad input"));
    }

    #[tokio::test]
    #[should_panic(expected = "blocking-boom")]
    async fn test_blocking_panic_is_not_absorbed() {
        let _ = run_with_timeout_blocking(Duration::from_secs(1), || -> Result<(), String> {
            panic!("blocking-boom")
        })
        .await;
    }

    #[tokio::test]
    #[should_panic(expected = "op-boom")]
    async fn test_panic_is_not_absorbed() {
        let _ = run_with_timeout(Duration::from_secs(1), async {
            if true {
                panic!("op-boom");
            }
            Ok::<(), String>(())
        })
        .await;
    }
}

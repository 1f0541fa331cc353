//! Bounded retry without delay between attempts.
//!
//! ```text
//! attempt 1 ── Ok ──► return Ok
//!    │ Err
//! attempt 2 ── Ok ──► return Ok
//!    │ Err
//!   ...
//! attempt N ── Err ──► RetryError::Exhausted { attempts: N, source: last }
//! ```
//!
//! This is a bounded loop, not a backoff scheduler.

use std::future::Future;

use tracing::debug;

use crate::error::RetryError;

/// Awaits `op()` up to `max_attempts` times, returning the first success.
///
/// Attempts are strictly sequential. `max_attempts == 0` returns
/// [`RetryError::NoAttempts`] without invoking `op`.
///
/// # Example
/// ```
/// use faultvisor::retry;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let mut calls = 0;
///     let res = retry(3, || {
///         calls += 1;
///         let n = calls;
///         async move { if n < 3 { Err("not yet") } else { Ok(n) } }
///     })
///     .await;
///     assert_eq!(res.unwrap(), 3);
/// }
/// ```
pub async fn retry<T, E, F, Fut>(max_attempts: u32, mut op: F) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut last = None;
    for attempt in 1..=max_attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                debug!(attempt, max_attempts, "retry attempt failed");
                last = Some(e);
            }
        }
    }
    Err(exhausted(max_attempts, last))
}

/// Synchronous counterpart of [`retry`] for plain closures.
///
/// # Example
/// ```
/// use faultvisor::{RetryError, retry_blocking};
///
/// let err = retry_blocking(2, || Err::<(), _>("refused")).unwrap_err();
/// assert_eq!(err.to_string(), "failed after 2 attempts: refused");
/// assert!(matches!(retry_blocking(0, || Ok::<_, &str>(1)), Err(RetryError::NoAttempts)));
/// ```
pub fn retry_blocking<T, E, F>(max_attempts: u32, mut op: F) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Result<T, E>,
{
    let mut last = None;
    for attempt in 1..=max_attempts {
        match op() {
            Ok(value) => return Ok(value),
            Err(e) => {
                debug!(attempt, max_attempts, "retry attempt failed");
                last = Some(e);
            }
        }
    }
    Err(exhausted(max_attempts, last))
}

fn exhausted<E>(attempts: u32, last: Option<E>) -> RetryError<E> {
    match last {
        Some(source) => RetryError::Exhausted { attempts, source },
        None => RetryError::NoAttempts,
    }
}

//! # Bounded execution: retry and timeout.
//!
//! Two independent primitives that put a hard bound on a fallible operation:
//! - [`retry`] / [`retry_blocking`]: at most `max_attempts` sequential attempts;
//! - [`run_with_timeout`] / [`run_with_timeout_blocking`]: at most `timeout` of
//!   wall-clock waiting.
//!
//! Neither absorbs panics raised inside the operation. Wrap the operation with
//! [`trap_to_error`](crate::trap_to_error) when that is wanted.

mod retry;
mod timeout;

pub use retry::{retry, retry_blocking};
pub use timeout::{run_with_timeout, run_with_timeout_blocking};

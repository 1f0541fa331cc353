//! # Synchronous trap boundaries.
//!
//! Each function runs a closure inside `catch_unwind` and turns a panic into an
//! ordinary value. The wrapper is the scope boundary: it observes every exit path
//! of the closure and has no effect when the closure returns normally.
//!
//! | Function                    | On panic                                    | Returns          |
//! |-----------------------------|---------------------------------------------|------------------|
//! | [`trap`]                    | captures the [`Fault`]                      | `Result<R, Fault>` |
//! | [`trap_and_log`]            | logs stack trace                            | `Option<R>`      |
//! | [`trap_to_error`]           | converts payload to [`FaultError`]          | `Result<R, FaultError>` |
//! | [`trap_to_error_and_log`]   | converts and logs                           | `Result<R, FaultError>` |
//! | [`trap_with_handler`]       | calls `handler(payload)`                    | `Option<R>`      |
//! | [`run_with_default`]        | substitutes `default`                       | `T`              |
//! | [`run_optional_with_default`] | substitutes `default` (also when absent) | `T`            |
//!
//! ## Unwind safety
//! Closures are wrapped in [`AssertUnwindSafe`]. State the closure mutated before
//! panicking is left as it was; callers that share such state across the boundary
//! must tolerate partial updates.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::error::FaultError;
use crate::logger::Logger;
use crate::trap::{Fault, TrapScope};

/// Runs `f`, capturing a panic as a [`Fault`].
///
/// # Example
/// ```
/// let fault = faultvisor::trap(|| -> u32 { panic!("boom") }).unwrap_err();
/// assert_eq!(fault.message(), "boom");
///
/// assert_eq!(faultvisor::trap(|| 7).unwrap(), 7);
/// ```
pub fn trap<R>(f: impl FnOnce() -> R) -> Result<R, Fault> {
    let _scope = TrapScope::enter();
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(Fault::capture)
}

/// Runs `f`; on panic logs the panic-site stack trace and returns `None`.
///
/// The record's message is the stack trace and its `error` field the panic text.
/// With `logger = None` the panic is still trapped and reported as `None`.
pub fn trap_and_log<R>(logger: Option<&dyn Logger>, f: impl FnOnce() -> R) -> Option<R> {
    match trap(f) {
        Ok(r) => Some(r),
        Err(fault) => {
            fault.report(logger, &[]);
            None
        }
    }
}

/// Runs `f`; on panic returns an error built from the stringified payload.
///
/// # Example
/// ```
/// use faultvisor::{trap_to_error, FaultError};
///
/// let err = trap_to_error(|| -> () { panic!("panic-error") }).unwrap_err();
/// assert_eq!(err, FaultError::Panicked { message: "panic-error".into() });
/// ```
pub fn trap_to_error<R>(f: impl FnOnce() -> R) -> Result<R, FaultError> {
    trap(f).map_err(Fault::into_error)
}

/// Runs `f`; on panic logs the stack trace **and** returns the error.
pub fn trap_to_error_and_log<R>(
    logger: Option<&dyn Logger>,
    f: impl FnOnce() -> R,
) -> Result<R, FaultError> {
    trap(f).map_err(|fault| {
        fault.report(logger, &[]);
        fault.into_error()
    })
}

/// Runs `f`; on panic hands the raw payload to `handler` and returns `None`.
///
/// `handler` may be `None`, in which case the panic is trapped silently.
pub fn trap_with_handler<R, H>(handler: Option<H>, f: impl FnOnce() -> R) -> Option<R>
where
    H: FnOnce(Box<dyn Any + Send>),
{
    match trap(f) {
        Ok(r) => Some(r),
        Err(fault) => {
            if let Some(handler) = handler {
                handler(fault.into_payload());
            }
            None
        }
    }
}

/// Returns `op()`, or `default` if `op` panics.
///
/// Nested calls resolve independently: a panic absorbed by an inner call is not
/// visible to an enclosing one.
///
/// # Example
/// ```
/// use faultvisor::run_with_default;
///
/// assert_eq!(run_with_default("default", || "success"), "success");
/// assert_eq!(run_with_default("default", || -> &str { panic!("test panic") }), "default");
/// ```
pub fn run_with_default<T>(default: T, op: impl FnOnce() -> T) -> T {
    trap(op).unwrap_or(default)
}

/// Like [`run_with_default`], but `op` may be absent; `None` returns `default`
/// without running anything.
///
/// # Example
/// ```
/// use faultvisor::run_optional_with_default;
///
/// assert_eq!(run_optional_with_default(1, Some(|| 2)), 2);
/// assert_eq!(run_optional_with_default(1, None::<fn() -> i32>), 1);
/// ```
pub fn run_optional_with_default<T, F>(default: T, op: Option<F>) -> T
where
    F: FnOnce() -> T,
{
    match op {
        Some(op) => run_with_default(default, op),
        None => default,
    }
}

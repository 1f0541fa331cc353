//! # FaultTrap: turn panics into values.
//!
//! A panic raised anywhere inside a guarded region is intercepted at the region's
//! boundary and converted into a normal return value. Regions nest and resolve
//! independently.
//!
//! ## Contents
//! - [`trap`], [`trap_and_log`], [`trap_to_error`], [`trap_to_error_and_log`],
//!   [`trap_with_handler`] synchronous boundaries
//! - [`run_with_default`], [`run_optional_with_default`] substitute a fallback value
//! - [`trap_future`] async boundary (used by the supervisor)
//! - [`Fault`] payload, message and panic-site backtrace of a trapped panic
//!
//! ## Reporting
//! ```text
//! guarded code ── panic ──► hook (captures backtrace) ──► catch_unwind ──► Fault
//!                                                                          ├─► Fault::into_error() → FaultError
//!                                                                          ├─► Fault::report(logger)
//!                                                                          └─► handler(payload)
//! ```

mod fault;
mod future;
mod guard;
mod hook;

pub use fault::Fault;
pub use future::trap_future;
pub use guard::{
    run_optional_with_default, run_with_default, trap, trap_and_log, trap_to_error,
    trap_to_error_and_log, trap_with_handler,
};
pub(crate) use hook::TrapScope;

//! # Logger trait.
//!
//! Provides [`Logger`] the single-method sink used to report trapped faults.
//!
//! ## Rules
//! - `record` may be called from any Tokio worker or plain thread; implementations must be `Send + Sync`.
//! - `record` must not block indefinitely.
//! - A panicking logger is contained: the panic is swallowed and reported through `tracing`.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use faultvisor::{Logger, LoggerRef};
//!
//! struct Stderr;
//!
//! impl Logger for Stderr {
//!     fn record(&self, message: &str, fields: &[(&str, &str)]) {
//!         eprintln!("{message} {fields:?}");
//!     }
//! }
//!
//! let logger: LoggerRef = Arc::new(Stderr);
//! logger.record("hello", &[("error", "boom")]);
//! ```

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::trap::TrapScope;

/// Shared handle to a logger object.
pub type LoggerRef = Arc<dyn Logger>;

/// Sink for fault reports.
///
/// `message` is the panic-site stack trace; `fields` carries key/value context
/// such as `("error", <panic message>)` and, for supervised tasks, `("task", <name>)`.
pub trait Logger: Send + Sync + 'static {
    /// Records one message with structured fields.
    fn record(&self, message: &str, fields: &[(&str, &str)]);
}

/// Calls `logger.record` and contains any panic it raises.
pub(crate) fn record_guarded(logger: &dyn Logger, message: &str, fields: &[(&str, &str)]) {
    let _scope = TrapScope::enter();
    let res = panic::catch_unwind(AssertUnwindSafe(|| logger.record(message, fields)));
    if let Err(payload) = res {
        let fault = crate::trap::Fault::capture(payload);
        tracing::warn!(error = %fault.message(), "logger panicked while recording a fault");
    }
}

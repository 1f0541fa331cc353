//! # faultvisor
//!
//! **Faultvisor** is a small resilience toolkit for Rust and Tokio.
//!
//! It lets a caller run crash-prone or fallible work under bounded, observable
//! fault tolerance:
//! - **FaultTrap**: turn a panic inside a guarded region into a return value,
//!   optionally logging the panic-site stack trace;
//! - **Supervisor**: keep a task running forever, relaunching it after every
//!   panic with a rate-limited delay;
//! - **Retry**: call a fallible operation up to N times;
//! - **Timeout**: race a fallible operation against a deadline.
//!
//! ## Architecture
//! ```text
//!                        ┌───────────────────────────┐
//!   caller's Logger ◄────┤ Fault::report()           │
//!   (Logger trait)       │  message = stack trace    │
//!                        │  fields  = error, ...     │
//!                        └─────────────▲─────────────┘
//!                                      │
//! ┌────────────────────────────┐       │       ┌─────────────────────────────┐
//! │ FaultTrap (trap module)    │───────┴───────│ Supervisor (core module)    │
//! │ trap / trap_and_log / ...  │               │ TaskActor loop              │
//! │ run_with_default           │◄──────────────│  trap_future(task.spawn())  │
//! │ trap_future                │               │  RestartState (mutex)       │
//! └────────────────────────────┘               └─────────────────────────────┘
//!
//! ┌────────────────────────────┐               ┌─────────────────────────────┐
//! │ retry (bounded module)     │               │ run_with_timeout (bounded)  │
//! │ sequential attempts        │               │ tokio::spawn + time::timeout│
//! └────────────────────────────┘               └─────────────────────────────┘
//! ```
//!
//! Retry and Timeout are independent of the trap and of each other.
//!
//! ## Features
//! | Feature   | Description                                   |
//! |-----------|-----------------------------------------------|
//! | `logging` | Exports `LogWriter`, a stdout fault printer   |
//!
//! ## Example
//! ```rust
//! use faultvisor::{run_with_default, trap_to_error};
//!
//! let v = run_with_default(-1, || -> i32 { panic!("bad input") });
//! assert_eq!(v, -1);
//!
//! let err = trap_to_error(|| -> u8 { panic!("boom") }).unwrap_err();
//! assert_eq!(err.to_string(), "boom");
//! ```

mod bounded;
mod core;
mod error;
mod logger;
mod tasks;
mod trap;

// ---- Public re-exports ----

pub use bounded::{retry, retry_blocking, run_with_timeout, run_with_timeout_blocking};
pub use core::{Supervisor, SupervisorBuilder, SupervisorConfig, SupervisorHandle};
pub use error::{FaultError, RetryError, TimeoutError};
pub use logger::{Logger, LoggerRef, TracingLogger};
pub use tasks::{BoxTaskFuture, Task, TaskFn, TaskRef};
pub use trap::{
    Fault, run_optional_with_default, run_with_default, trap, trap_and_log, trap_future,
    trap_to_error, trap_to_error_and_log, trap_with_handler,
};

// Optional: expose a simple built-in stdout logger (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use logger::LogWriter;

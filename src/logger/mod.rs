//! # Logging capability consumed by the toolkit.
//!
//! Every primitive that reports a fault does so through a caller-supplied [`Logger`].
//! The toolkit never configures logging itself; it only calls [`Logger::record`].
//!
//! ## Architecture
//! ```text
//! trap_and_log / Supervisor ──► Fault::report() ──► record_guarded() ──► Logger::record()
//!                                                        └─► panic in logger → tracing::warn!
//! ```
//!
//! ## Built-in loggers
//! - [`TracingLogger`] forwards records to `tracing` at `ERROR` level.
//! - `LogWriter` prints to stdout _(feature `logging`, demo/reference only)_.

#[allow(clippy::module_inception)]
mod logger;
#[cfg(feature = "logging")]
mod log_writer;
mod tracing_logger;

pub use logger::{Logger, LoggerRef};
pub(crate) use logger::record_guarded;
#[cfg(feature = "logging")]
pub use log_writer::LogWriter;
pub use tracing_logger::TracingLogger;

//! # Task abstraction.
//!
//! This module defines the [`Task`] trait: a named, zero-argument unit of work that
//! produces a fresh future for every launch. The common handle type is [`TaskRef`],
//! an `Arc<dyn Task>` suitable for sharing with the supervisor.

use std::{future::Future, pin::Pin, sync::Arc};

/// Boxed future returned by [`Task::spawn`].
pub type BoxTaskFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// # Shared handle to a task object.
pub type TaskRef = Arc<dyn Task>;

/// # Restartable unit of work.
///
/// The supervisor calls [`spawn`](Task::spawn) once per launch, so every restart
/// runs a brand-new future. State that must survive a restart belongs in the
/// implementor (behind `Arc`/atomics), never in the future.
///
/// # Example
/// ```
/// use faultvisor::{BoxTaskFuture, Task};
///
/// struct Heartbeat;
///
/// impl Task for Heartbeat {
///     fn name(&self) -> &str { "heartbeat" }
///
///     fn spawn(&self) -> BoxTaskFuture {
///         Box::pin(async {
///             // do work...
///         })
///     }
/// }
/// ```
pub trait Task: Send + Sync + 'static {
    /// Returns a stable, human-readable task name.
    fn name(&self) -> &str;

    /// Creates the future for one execution.
    fn spawn(&self) -> BoxTaskFuture;
}

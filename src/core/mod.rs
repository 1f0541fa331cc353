//! Supervision core: restart loop and its configuration.
//!
//! The public API from this module is [`Supervisor`], its [`SupervisorBuilder`],
//! [`SupervisorConfig`] and the [`SupervisorHandle`] returned by `start`.
//!
//! Internal modules:
//! - [`actor`]: the restart loop for one task;
//! - [`restart`]: restart-rate bookkeeping (delay computation);
//! - [`supervisor`]: public entry point, spawns the actor;
//! - [`handle`]: observe/stop a running loop.

mod actor;
mod builder;
mod config;
mod handle;
mod restart;
mod supervisor;

pub use builder::SupervisorBuilder;
pub use config::SupervisorConfig;
pub use handle::SupervisorHandle;
pub use supervisor::Supervisor;

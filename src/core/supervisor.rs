//! # Supervisor: keeps a task running across panics.
//!
//! The [`Supervisor`] owns the restart configuration and the logger used to report
//! faults. [`Supervisor::start`] spawns the restart loop onto the current Tokio
//! runtime and returns immediately with a [`SupervisorHandle`].
//!
//! ## High-level architecture
//! ```text
//! Supervisor::builder(cfg).with_logger(l).build()
//!        │
//!        └──► start(task) ──► tokio::spawn(TaskActor::run(token))
//!                                    │
//!                                    ├─► tokio::spawn(trap_future(task.spawn()))   (one execution)
//!                                    │        ├─ returns  ──► loop ends
//!                                    │        └─ panics   ──► Fault
//!                                    │                         ├─► Fault::report(logger)
//!                                    │                         ├─► RestartState::next_delay()  (mutex)
//!                                    │                         └─► sleep(delay) ──► next execution
//!                                    └─► SupervisorHandle { restarts, shutdown, join }
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use faultvisor::{Supervisor, SupervisorConfig, TaskFn, TaskRef, TracingLogger};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let runs = Arc::new(AtomicU32::new(0));
//!     let r = runs.clone();
//!     let flaky: TaskRef = TaskFn::arc("flaky", move || {
//!         let r = r.clone();
//!         async move {
//!             if r.fetch_add(1, Ordering::SeqCst) == 0 {
//!                 panic!("first run always fails");
//!             }
//!         }
//!     });
//!
//!     let handle = Supervisor::builder(SupervisorConfig::default())
//!         .with_logger(Arc::new(TracingLogger::new()))
//!         .build()
//!         .start(flaky);
//!
//!     assert_eq!(handle.join().await, 1);
//!     assert_eq!(runs.load(Ordering::SeqCst), 2);
//! }
//! ```

use std::sync::{Arc, Mutex, atomic::AtomicU64};

use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        actor::TaskActor, builder::SupervisorBuilder, config::SupervisorConfig,
        handle::SupervisorHandle, restart::RestartState,
    },
    logger::LoggerRef,
    tasks::TaskRef,
};

/// Runs one task perpetually, relaunching it after every panic with a rate-limited delay.
pub struct Supervisor {
    cfg: SupervisorConfig,
    logger: Option<LoggerRef>,
}

impl Supervisor {
    /// Creates a supervisor without a logger.
    pub fn new(cfg: SupervisorConfig) -> Self {
        Self { cfg, logger: None }
    }

    /// Returns a builder for attaching optional collaborators.
    pub fn builder(cfg: SupervisorConfig) -> SupervisorBuilder {
        SupervisorBuilder::new(cfg)
    }

    pub(crate) fn from_parts(cfg: SupervisorConfig, logger: Option<LoggerRef>) -> Self {
        Self { cfg, logger }
    }

    /// Returns the restart configuration.
    pub fn config(&self) -> &SupervisorConfig {
        &self.cfg
    }

    /// Starts supervising `task` and returns immediately.
    ///
    /// Consumes the supervisor: restart state belongs to exactly one task.
    ///
    /// # Panics
    /// Panics if called outside of a Tokio runtime (same contract as `tokio::spawn`).
    pub fn start(self, task: TaskRef) -> SupervisorHandle {
        let token = CancellationToken::new();
        let restarts = Arc::new(AtomicU64::new(0));

        let actor = TaskActor {
            task,
            logger: self.logger,
            state: Arc::new(Mutex::new(RestartState::new(&self.cfg))),
            restarts: Arc::clone(&restarts),
        };
        let join = tokio::spawn(actor.run(token.clone()));

        SupervisorHandle::new(join, token, restarts)
    }

    /// Shorthand for a default-configured supervisor.
    ///
    /// A `None` task is a silent no-op and returns `None`.
    pub fn go(logger: Option<LoggerRef>, task: Option<TaskRef>) -> Option<SupervisorHandle> {
        let task = task?;
        Some(Self::from_parts(SupervisorConfig::default(), logger).start(task))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use tokio::time::Instant;

    use super::*;
    use crate::logger::testing::Recorder;
    use crate::tasks::TaskFn;

    fn panics_until(limit: u32, counter: Arc<AtomicU32>) -> TaskRef {
        TaskFn::arc("flaky", move || {
            let counter = counter.clone();
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                if n < limit {
                    panic!("panic-error");
                }
            }
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_restarts_until_task_stops_panicking() {
        let logger = Arc::new(Recorder::default());
        let counter = Arc::new(AtomicU32::new(0));

        let handle = Supervisor::builder(SupervisorConfig::default())
            .with_logger(logger.clone())
            .build()
            .start(panics_until(5, counter.clone()));

        let restarts = handle.join().await;
        assert_eq!(counter.load(Ordering::SeqCst), 5);
        assert_eq!(restarts, 4);
        assert_eq!(logger.count(), 4);
        assert_eq!(logger.last_field("error").as_deref(), Some("panic-error"));
        assert_eq!(logger.last_field("task").as_deref(), Some("flaky"));
        assert_eq!(logger.last_field("restart").as_deref(), Some("4"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_faults_are_rate_limited() {
        let counter = Arc::new(AtomicU32::new(0));
        let started = Instant::now();

        let handle = Supervisor::new(SupervisorConfig::default())
            .start(panics_until(5, counter.clone()));
        handle.join().await;

        // First restart is immediate, the next three wait one second each.
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(3), "elapsed={elapsed:?}");
        assert!(elapsed < Duration::from_secs(4), "elapsed={elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_faults_are_not_delayed() {
        let counter = Arc::new(AtomicU32::new(0));
        let c = counter.clone();
        let task: TaskRef = TaskFn::arc("slow-flaky", move || {
            let c = c.clone();
            async move {
                tokio::time::sleep(Duration::from_secs(2)).await;
                if c.fetch_add(1, Ordering::SeqCst) + 1 < 4 {
                    panic!("panic-error");
                }
            }
        });

        let started = Instant::now();
        let restarts = Supervisor::new(SupervisorConfig::default()).start(task).join().await;

        // Four runs of two seconds each, no backoff in between.
        let elapsed = started.elapsed();
        assert_eq!(restarts, 3);
        assert!(elapsed >= Duration::from_secs(8), "elapsed={elapsed:?}");
        assert!(elapsed < Duration::from_secs(9), "elapsed={elapsed:?}");
    }

    #[tokio::test]
    async fn test_normal_completion_does_not_restart() {
        let counter = Arc::new(AtomicU32::new(0));
        let handle = Supervisor::new(SupervisorConfig::default())
            .start(panics_until(0, counter.clone()));

        assert_eq!(handle.join().await, 0);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_endless_task() {
        let counter = Arc::new(AtomicU32::new(0));
        let handle = Supervisor::new(SupervisorConfig::default())
            .start(panics_until(u32::MAX, counter.clone()));

        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert!(handle.restarts() >= 2);
        assert!(!handle.is_finished());

        handle.shutdown();
        let restarts = handle.join().await;
        let runs = counter.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(counter.load(Ordering::SeqCst), runs, "no launches after shutdown");
        assert!(restarts >= 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_panic_while_creating_future_is_restarted() {
        let logger = Arc::new(Recorder::default());
        let counter = Arc::new(AtomicU32::new(0));
        let c = counter.clone();
        let task: TaskRef = TaskFn::arc("eager", move || {
            if c.fetch_add(1, Ordering::SeqCst) + 1 < 3 {
                panic!("setup failed");
            }
            async {}
        });

        let handle = Supervisor::builder(SupervisorConfig::default())
            .with_logger(logger.clone())
            .build()
            .start(task);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(handle.is_finished());
        assert_eq!(handle.join().await, 2);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert_eq!(logger.count(), 2);
        assert_eq!(logger.last_field("error").as_deref(), Some("setup failed"));
    }

    #[tokio::test]
    async fn test_go_without_task_is_noop() {
        assert!(Supervisor::go(None, None).is_none());
    }

    #[tokio::test]
    async fn test_go_runs_task() {
        let counter = Arc::new(AtomicU32::new(0));
        let handle = Supervisor::go(None, Some(panics_until(2, counter.clone())))
            .expect("task given");

        assert_eq!(handle.join().await, 1);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_faults_logged_from_worker_threads() {
        let logger = Arc::new(Recorder::default());
        let counter = Arc::new(AtomicU32::new(0));
        let cfg = SupervisorConfig {
            window: Duration::from_millis(100),
            max_restarts: 100,
        };

        let restarts = Supervisor::builder(cfg)
            .with_logger(logger.clone())
            .build()
            .start(panics_until(3, counter))
            .join()
            .await;

        assert_eq!(restarts, 2);
        assert_eq!(logger.count(), 2);
        let stack = logger.last_message().unwrap();
        assert!(stack.contains("panic-error"), "stack: {stack}");
    }
}

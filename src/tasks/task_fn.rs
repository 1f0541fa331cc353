//! # Function-backed task (`TaskFn`)
//!
//! [`TaskFn`] wraps a closure `F: Fn() -> Fut`, producing a fresh future per spawn.
//!
//! ## Concurrency semantics
//! - Each call to [`Task::spawn`] creates a **new** future owning its own state.
//! - No hidden mutation between restarts; if shared state is needed use `Arc<...>`
//!   explicitly inside the closure.
//!
//! ## Example
//! ```rust
//! use faultvisor::{TaskFn, TaskRef};
//!
//! let t: TaskRef = TaskFn::arc("worker", || async {
//!     // do work...
//! });
//!
//! assert_eq!(t.name(), "worker");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use crate::tasks::task::{BoxTaskFuture, Task};

/// Function-backed task implementation.
///
/// Wraps a closure that *creates* a new future per spawn.
#[derive(Debug)]
pub struct TaskFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> TaskFn<F> {
    /// Creates a new function-backed task.
    ///
    /// Prefer [`TaskFn::arc`] when you immediately need a [`TaskRef`](crate::TaskRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the task and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

impl<F, Fut> Task for TaskFn<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn spawn(&self) -> BoxTaskFuture {
        Box::pin((self.f)())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::tasks::TaskRef;

    #[tokio::test]
    async fn test_each_spawn_runs_a_fresh_future() {
        let runs = Arc::new(AtomicUsize::new(0));
        let r = runs.clone();
        let task: TaskRef = TaskFn::arc("counter", move || {
            let r = r.clone();
            async move {
                r.fetch_add(1, Ordering::SeqCst);
            }
        });

        task.spawn().await;
        task.spawn().await;
        assert_eq!(runs.load(Ordering::SeqCst), 2);
        assert_eq!(task.name(), "counter");
    }

    #[test]
    fn test_owned_name() {
        let id = 7;
        let task = TaskFn::new(format!("worker-{id}"), || async {});
        assert_eq!(Task::name(&task), "worker-7");
    }
}

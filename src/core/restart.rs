//! # Restart-rate state.
//!
//! [`RestartState`] remembers when the supervised task was last restarted and
//! turns the current fault time into the delay to apply before the next launch.
//!
//! ## Algorithm
//! ```text
//! elapsed = now - last_restart
//! last_restart unset        → 0
//! elapsed >= window         → 0
//! elapsed <  min_interval   → min_interval - elapsed
//! otherwise                 → 0
//! last_restart = now + delay
//! ```
//!
//! `last_restart` is the moment the relaunch actually happens, not the moment of
//! the fault. A task that faults right after a delayed relaunch is therefore
//! delayed again, which keeps the steady-state rate at `max_restarts` per `window`.
//!
//! The caller holds the surrounding mutex only for [`RestartState::next_delay`]
//! and sleeps after releasing it.

use std::time::Duration;

use tokio::time::Instant;

use crate::core::config::SupervisorConfig;

/// Per-supervisor restart bookkeeping.
#[derive(Debug)]
pub(crate) struct RestartState {
    last_restart: Option<Instant>,
    window: Duration,
    min_interval: Duration,
}

impl RestartState {
    pub(crate) fn new(cfg: &SupervisorConfig) -> Self {
        Self {
            last_restart: None,
            window: cfg.window,
            min_interval: cfg.min_interval(),
        }
    }

    /// Records a fault at `now` and returns how long to wait before relaunching.
    ///
    /// Stores the relaunch time (`now + delay`), not the fault time. Storing the
    /// fault time would let a task that faults on every launch alternate between
    /// zero and `min_interval` delays and restart twice as often as `max_restarts`
    /// allows; see `test_steady_state_rate_is_capped`.
    pub(crate) fn next_delay(&mut self, now: Instant) -> Duration {
        let delay = match self.last_restart {
            Some(last) => {
                let elapsed = now.saturating_duration_since(last);
                if elapsed < self.window && elapsed < self.min_interval {
                    self.min_interval - elapsed
                } else {
                    Duration::ZERO
                }
            }
            None => Duration::ZERO,
        };
        self.last_restart = Some(now + delay);
        delay
    }
}

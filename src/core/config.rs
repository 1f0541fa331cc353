//! # Supervisor configuration.
//!
//! Provides [`SupervisorConfig`] the restart-rate limits for one supervisor.
//!
//! ## Sentinel values
//! - `max_restarts = 0` → clamped to 1 (one restart per `window`)
//! - `window = 0s` → no rate limiting (every restart is immediate)

use std::time::Duration;

/// Restart-rate configuration for a [`Supervisor`](crate::Supervisor).
///
/// ## Field semantics
/// - `window`: Faults further apart than this never delay a restart
/// - `max_restarts`: Steady-state cap on restarts per `window`
///
/// The minimum spacing between two restarts is `window / max_restarts`
/// (1 second with the defaults).
///
/// ## Notes
/// All fields are public for flexibility. Prefer using helper accessors to avoid
/// sprinkling sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug)]
pub struct SupervisorConfig {
    /// Observation window for the restart rate.
    pub window: Duration,

    /// Maximum number of restarts per `window`.
    pub max_restarts: u32,
}

impl SupervisorConfig {
    /// Returns `max_restarts` clamped to a minimum of 1.
    #[inline]
    pub fn max_restarts_clamped(&self) -> u32 {
        self.max_restarts.max(1)
    }

    /// Returns the minimum spacing enforced between consecutive restarts.
    ///
    /// # Example
    /// ```
    /// use faultvisor::SupervisorConfig;
    /// use std::time::Duration;
    ///
    /// assert_eq!(SupervisorConfig::default().min_interval(), Duration::from_secs(1));
    /// ```
    #[inline]
    pub fn min_interval(&self) -> Duration {
        self.window / self.max_restarts_clamped()
    }
}

impl Default for SupervisorConfig {
    /// Default configuration:
    ///
    /// - `window = 60s`
    /// - `max_restarts = 60` (one restart per second on average)
    fn default() -> Self {
        Self {
            window: Duration::from_secs(60),
            max_restarts: 60,
        }
    }
}

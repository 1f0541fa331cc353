//! Error types returned by the faultvisor primitives.
//!
//! This module defines three error enums:
//!
//! - [`FaultError`]: a trapped panic converted into an ordinary error value.
//! - [`RetryError`]: a bounded retry ran out of attempts.
//! - [`TimeoutError`]: a deadline-bounded operation either expired or failed on its own.
//!
//! All of them provide helper methods (`as_label`, `as_message`) for logging.
//! The timeout sentinel ([`TimeoutError::Elapsed`]) is never conflated with an
//! error produced by the operation itself ([`TimeoutError::Failed`]).

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// # A panic neutralized by a trap.
///
/// Carries only the stringified panic payload; the raw payload is available
/// through [`Fault`](crate::Fault) when the caller needs it.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FaultError {
    /// The guarded code panicked.
    #[error("{message}")]
    Panicked {
        /// Stringified panic payload.
        message: String,
    },
}

impl FaultError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use faultvisor::FaultError;
    ///
    /// let err = FaultError::Panicked { message: "boom".into() };
    /// assert_eq!(err.as_label(), "fault_panicked");
    /// assert_eq!(err.to_string(), "boom");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            FaultError::Panicked { .. } => "fault_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            FaultError::Panicked { message } => format!("panicked: {message}"),
        }
    }
}

/// # Errors produced by [`retry`](crate::retry).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RetryError<E> {
    /// Every attempt failed; `source` is the failure of the last one.
    #[error("failed after {attempts} attempts: {source}")]
    Exhausted {
        /// Number of attempts that were made.
        attempts: u32,
        /// The last underlying failure.
        source: E,
    },

    /// `max_attempts` was zero, so the operation was never invoked.
    #[error("failed after 0 attempts: no attempt was made")]
    NoAttempts,
}

impl<E> RetryError<E> {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            RetryError::Exhausted { .. } => "retry_exhausted",
            RetryError::NoAttempts => "retry_no_attempts",
        }
    }

    /// Number of attempts that were made before giving up.
    pub fn attempts(&self) -> u32 {
        match self {
            RetryError::Exhausted { attempts, .. } => *attempts,
            RetryError::NoAttempts => 0,
        }
    }

    /// Returns the last underlying failure, if any attempt was made.
    pub fn into_last(self) -> Option<E> {
        match self {
            RetryError::Exhausted { source, .. } => Some(source),
            RetryError::NoAttempts => None,
        }
    }
}

impl<E: fmt::Display> RetryError<E> {
    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RetryError::Exhausted { attempts, source } => {
                format!("exhausted after {attempts} attempts; last error: {source}")
            }
            RetryError::NoAttempts => "no attempts allowed".to_string(),
        }
    }
}

/// # Errors produced by [`run_with_timeout`](crate::run_with_timeout).
///
/// # Example
/// ```
/// use faultvisor::TimeoutError;
/// use std::time::Duration;
///
/// let err: TimeoutError<String> = TimeoutError::Elapsed { timeout: Duration::from_millis(50) };
/// assert!(err.is_elapsed());
/// assert_eq!(err.as_label(), "timeout_elapsed");
///
/// let err = TimeoutError::Failed("refused".to_string());
/// assert!(!err.is_elapsed());
/// assert_eq!(err.into_inner().as_deref(), Some("refused"));
/// ```
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TimeoutError<E> {
    /// The deadline elapsed before the operation completed.
    #[error("operation timed out after {timeout:?}")]
    Elapsed {
        /// The deadline that was exceeded.
        timeout: Duration,
    },

    /// The operation completed in time but returned its own error.
    #[error("{0}")]
    Failed(E),

    /// The runtime dropped the operation before it completed.
    #[error("operation cancelled before completion")]
    Canceled,
}

impl<E> TimeoutError<E> {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            TimeoutError::Elapsed { .. } => "timeout_elapsed",
            TimeoutError::Failed(_) => "timeout_operation_failed",
            TimeoutError::Canceled => "timeout_canceled",
        }
    }

    /// True if this is the deadline sentinel.
    pub fn is_elapsed(&self) -> bool {
        matches!(self, TimeoutError::Elapsed { .. })
    }

    /// Returns the operation's own error, if that is what ended the call.
    pub fn into_inner(self) -> Option<E> {
        match self {
            TimeoutError::Failed(e) => Some(e),
            _ => None,
        }
    }
}

impl<E: fmt::Display> TimeoutError<E> {
    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            TimeoutError::Elapsed { timeout } => format!("deadline: {timeout:?}"),
            TimeoutError::Failed(e) => format!("error: {e}"),
            TimeoutError::Canceled => "operation cancelled".to_string(),
        }
    }
}

//! # Fault: a trapped panic.
//!
//! [`Fault`] owns the opaque panic payload together with its stringified form and
//! the report captured at the panic site. The payload is never inspected beyond
//! stringification: `&str` and `String` payloads render as their text, anything
//! else as `"unknown panic"`.

use std::any::Any;
use std::backtrace::Backtrace;
use std::fmt;
use std::panic;

use crate::error::FaultError;
use crate::logger::{Logger, record_guarded};
use crate::trap::hook;

/// Payload and context of a panic that was intercepted at a trap boundary.
pub struct Fault {
    payload: Box<dyn Any + Send>,
    message: String,
    backtrace: Option<String>,
}

impl Fault {
    /// Wraps a payload returned by `catch_unwind`, collecting the panic-site report if one was captured.
    pub(crate) fn capture(payload: Box<dyn Any + Send>) -> Self {
        let message = payload_message(&*payload);
        Self {
            payload,
            message,
            backtrace: hook::take_backtrace(),
        }
    }

    /// Wraps a payload caught outside any trap scope; carries no panic-site report.
    pub(crate) fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = payload_message(&*payload);
        Self {
            payload,
            message,
            backtrace: None,
        }
    }

    /// Stringified panic payload.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Panic location and stack backtrace captured where the panic was raised.
    ///
    /// `None` when the process panic hook was replaced after the trap installed its own.
    pub fn backtrace(&self) -> Option<&str> {
        self.backtrace.as_deref()
    }

    /// Borrows the raw payload.
    pub fn payload(&self) -> &(dyn Any + Send) {
        &*self.payload
    }

    /// Returns the raw payload.
    pub fn into_payload(self) -> Box<dyn Any + Send> {
        self.payload
    }

    /// Converts into a string-based error value.
    pub fn into_error(self) -> FaultError {
        FaultError::Panicked {
            message: self.message,
        }
    }

    /// Re-raises the original panic.
    pub fn resume(self) -> ! {
        panic::resume_unwind(self.payload)
    }

    /// Sends the stack trace to `logger` with the fault text as the `error` field.
    ///
    /// `extra` fields are appended after `error`. Absent logger is a no-op.
    pub(crate) fn report(&self, logger: Option<&dyn Logger>, extra: &[(&str, &str)]) {
        let Some(logger) = logger else {
            return;
        };

        let fallback;
        let stack = match self.backtrace.as_deref() {
            Some(stack) => stack,
            None => {
                fallback = format!(
                    "panicked: {}\nstack backtrace:\n{}",
                    self.message,
                    Backtrace::force_capture()
                );
                fallback.as_str()
            }
        };

        let mut fields = Vec::with_capacity(extra.len() + 1);
        fields.push(("error", self.message.as_str()));
        fields.extend_from_slice(extra);
        record_guarded(logger, stack, &fields);
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fault")
            .field("message", &self.message)
            .field("backtrace", &self.backtrace.is_some())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<Fault> for FaultError {
    fn from(fault: Fault) -> Self {
        fault.into_error()
    }
}

fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

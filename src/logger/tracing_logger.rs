//! # TracingLogger: forwards fault reports to `tracing`
//!
//! Fields are rendered as `key=value` pairs because `tracing` field names are
//! static; the message (stack trace) goes into the event's message.
//!
//! ## Example output (with `tracing_subscriber::fmt`)
//! ```text
//! ERROR faultvisor: fields="error=\"boom\" task=\"worker\"" panicked at src/main.rs:9:13: ...
//! ```

use std::fmt::Write as _;

use crate::logger::Logger;

/// Logger that emits every record as a `tracing` event at `ERROR` level.
#[derive(Clone, Debug, Default)]
pub struct TracingLogger;

impl TracingLogger {
    /// Construct a new [`TracingLogger`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn record(&self, message: &str, fields: &[(&str, &str)]) {
        tracing::error!(target: "faultvisor", fields = %render_fields(fields), "{message}");
    }
}

fn render_fields(fields: &[(&str, &str)]) -> String {
    let mut out = String::new();
    for (i, (key, value)) in fields.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{key}={value:?}");
    }
    out
}

//! # LogWriter: simple fault printer
//!
//! A minimal logger that prints incoming records to stdout.
//! Use it for test or demo.
//!
//! ## Example output
//! ```text
//! [fault] error="panic-error" task="worker" restart="3"
//! panicked at src/main.rs:12:17:
//! panic-error
//! stack backtrace:
//! ...
//! ```

use crate::logger::Logger;

/// Stdout logger.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Logger for LogWriter {
    fn record(&self, message: &str, fields: &[(&str, &str)]) {
        let mut line = String::from("[fault]");
        for (key, value) in fields {
            line.push_str(&format!(" {key}={value:?}"));
        }
        println!("{line}\n{message}");
    }
}

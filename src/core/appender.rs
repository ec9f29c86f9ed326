//! Appender trait for log output destinations

use super::{error::Result, formatter::FormatterConfig, log_entry::LogEntry};

/// A sink that renders and writes entries
///
/// Appenders are owned by a dispatcher that serializes access to each one,
/// so implementations only need to be `Send`.
pub trait Appender: Send {
    fn append(&mut self, entry: &LogEntry, config: &FormatterConfig) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

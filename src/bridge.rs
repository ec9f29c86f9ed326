//! Bridge from the `log` crate facade
//!
//! Libraries that log through `log::info!` and friends can be routed into a
//! [`Logger`]. Records keep the file and line reported by the `log` macros.

use crate::core::{CallerInfo, LogLevel, Logger};
use std::sync::Arc;

fn map_level(level: log::Level) -> LogLevel {
    match level {
        log::Level::Error => LogLevel::Error,
        log::Level::Warn => LogLevel::Warning,
        log::Level::Info => LogLevel::Info,
        log::Level::Debug | log::Level::Trace => LogLevel::Debug,
    }
}

impl log::Log for Logger {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        // The file sink takes every level
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        let caller = record
            .file()
            .map(|file| CallerInfo::new(file, record.line().unwrap_or(0), None));
        self.log_with_caller(map_level(record.level()), record.args().to_string(), None, caller);
    }

    fn flush(&self) {
        let _ = Logger::flush(self);
    }
}

struct SharedLogger(Arc<Logger>);

impl log::Log for SharedLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        log::Log::enabled(self.0.as_ref(), metadata)
    }

    fn log(&self, record: &log::Record<'_>) {
        log::Log::log(self.0.as_ref(), record);
    }

    fn flush(&self) {
        log::Log::flush(self.0.as_ref());
    }
}

/// Install `logger` as the global `log` crate logger
///
/// Fails if another `log` implementation is already installed.
///
/// # Example
///
/// ```no_run
/// let logger = unified_logger::get_logger("app.log", true);
/// unified_logger::init_log_bridge(logger).expect("no other log backend installed");
/// log::warn!("routed through unified_logger");
/// ```
pub fn init_log_bridge(logger: Arc<Logger>) -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(SharedLogger(logger)))?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

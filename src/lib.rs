//! # Unified Logger
//!
//! A process-wide logging facade that writes every record to a plain text
//! file and mirrors it, colorized and filtered by level, to the console.
//!
//! ## Features
//!
//! - **Eight Levels**: DEBUG, INFO, SUCCESS, MESSAGE, WARNING, FAILED, ERROR, CRITICAL
//! - **Two Sinks**: Complete plain file log and a threshold-filtered colored console
//! - **Structured Payloads**: JSON data appended to records, with a string fallback
//! - **Caller Annotation**: `(file:function)` resolved from the call site
//! - **Per-Path Instances**: One shared logger per target file
//!
//! ## Example
//!
//! ```no_run
//! use unified_logger::get_logger;
//! use serde_json::json;
//!
//! let logger = get_logger("app.log", true);
//! logger.info("service started");
//! logger.success_with_data("user created", json!({"id": 42}));
//!
//! if let Err(err) = std::fs::read_to_string("/etc/app/missing.toml") {
//!     logger.exception(Some("loading config"), &err);
//! }
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

#[cfg(feature = "log-bridge")]
pub mod bridge;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender};
    pub use crate::core::{
        get_logger, Appender, CallerInfo, ExceptionInfo, FormatterConfig, LogEntry, LogLevel,
        Logger, LoggerBuilder, LoggerError, LoggerMetrics, LoggerRegistry, Payload, PayloadStyle,
        Result, StackFrame, TimestampFormat,
    };
}

pub use appenders::{ConsoleAppender, FileAppender};
#[cfg(feature = "log-bridge")]
pub use bridge::init_log_bridge;
pub use core::{
    get_logger, Appender, CallerInfo, EntryBody, ExceptionInfo, FormatterConfig, LogEntry,
    LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics, LoggerRegistry, Payload,
    PayloadStyle, Result, StackFrame, TimestampFormat, CONSOLE_LOG_LEVEL_VAR,
    NO_EXCEPTION_CONTEXT,
};

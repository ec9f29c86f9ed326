//! Core logger types and traits

pub mod appender;
pub mod caller;
pub mod dispatcher;
pub mod error;
pub mod exception;
pub mod formatter;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod payload;
pub mod registry;
pub mod stack;
pub mod timestamp;

pub use appender::Appender;
pub use caller::CallerInfo;
pub use dispatcher::SinkDispatcher;
pub use error::{LoggerError, Result};
pub use exception::ExceptionInfo;
pub use formatter::{FormatterConfig, PayloadStyle};
pub use log_entry::{EntryBody, LogEntry};
pub use log_level::{LogLevel, CONSOLE_LOG_LEVEL_VAR};
pub use logger::{Logger, LoggerBuilder, NO_EXCEPTION_CONTEXT};
pub use metrics::LoggerMetrics;
pub use payload::Payload;
pub use registry::{get_logger, LoggerRegistry};
pub use stack::StackFrame;
pub use timestamp::TimestampFormat;

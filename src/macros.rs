//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. Unlike the plain
//! methods they record the caller at compile time, so the enclosing
//! function name is available even in builds without debug info.
//!
//! A structured payload goes before the format string, separated by `;`.
//!
//! # Examples
//!
//! ```no_run
//! use unified_logger::{get_logger, info, warning};
//! use serde_json::json;
//!
//! let logger = get_logger("server.log", true);
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With a payload
//! warning!(logger, data = json!({"free_mb": 112}); "Low disk space on {}", "/var");
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```no_run
/// # use unified_logger::prelude::*;
/// # let logger = get_logger("app.log", true);
/// use unified_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, data = $data:expr; $($arg:tt)+) => {
        $logger.log_with_caller(
            $level,
            ::std::format!($($arg)+),
            ::std::option::Option::Some(::std::convert::Into::<$crate::Payload>::into($data)),
            ::std::option::Option::Some($crate::__caller!()),
        )
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_with_caller(
            $level,
            ::std::format!($($arg)+),
            ::std::option::Option::None,
            ::std::option::Option::Some($crate::__caller!()),
        )
    };
}

/// Caller info for the macro invocation site.
#[doc(hidden)]
#[macro_export]
macro_rules! __caller {
    () => {
        $crate::CallerInfo::new(
            ::std::file!(),
            ::std::line!(),
            ::std::option::Option::Some($crate::__function_name!()),
        )
    };
}

/// Full path of the enclosing function.
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = __type_name_of(__here);
        name.strip_suffix("::__here").unwrap_or(name)
    }};
}

/// Log a debug-level message.
///
/// ```no_run
/// # let logger = unified_logger::get_logger("app.log", true);
/// use unified_logger::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a success-level message.
///
/// ```no_run
/// # let logger = unified_logger::get_logger("app.log", true);
/// use unified_logger::success;
/// success!(logger, "Migrated {} tables", 12);
/// ```
#[macro_export]
macro_rules! success {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Success, $($arg)+)
    };
}

/// Log a message-level record.
#[macro_export]
macro_rules! message {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Message, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// ```no_run
/// # let logger = unified_logger::get_logger("app.log", true);
/// use unified_logger::warning;
/// warning!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log a failed-level message.
#[macro_export]
macro_rules! failed {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Failed, $($arg)+)
    };
}

/// Log an error-level message.
///
/// ```no_run
/// # let logger = unified_logger::get_logger("app.log", true);
/// use unified_logger::error;
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

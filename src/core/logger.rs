//! Main logger implementation
//!
//! A [`Logger`] owns one file target and the console. Its configuration is
//! fixed at construction: the target path, whether caller info is
//! attached, and the console threshold resolved from the environment.
//! Logging methods never return errors and never panic.

use super::{
    caller::{self, CallerInfo},
    dispatcher::SinkDispatcher,
    error::{LoggerError, Result},
    exception::ExceptionInfo,
    formatter::{FormatterConfig, PayloadStyle},
    log_entry::LogEntry,
    log_level::{LogLevel, CONSOLE_LOG_LEVEL_VAR},
    metrics::LoggerMetrics,
    payload::Payload,
    registry,
    timestamp::TimestampFormat,
};
use crate::appenders::{ConsoleAppender, FileAppender};
use std::error::Error;
use std::io::Write;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Message logged by [`Logger::exception_info`] when no error is supplied
pub const NO_EXCEPTION_CONTEXT: &str = "exception() called without an active exception context";

pub struct Logger {
    path: PathBuf,
    include_caller: bool,
    dispatcher: SinkDispatcher,
}

impl Logger {
    /// Create a builder for a logger writing to `path`
    ///
    /// # Example
    /// ```no_run
    /// use unified_logger::prelude::*;
    ///
    /// let logger = Logger::builder("app.log")
    ///     .include_caller(false)
    ///     .console_level(LogLevel::Warning)
    ///     .build()?;
    /// logger.warning("cache miss ratio above 50%");
    /// # Ok::<(), LoggerError>(())
    /// ```
    #[must_use]
    pub fn builder(path: impl AsRef<Path>) -> LoggerBuilder {
        LoggerBuilder::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn include_caller(&self) -> bool {
        self.include_caller
    }

    pub fn console_threshold(&self) -> LogLevel {
        self.dispatcher.console_threshold()
    }

    pub fn formatter_config(&self) -> &FormatterConfig {
        self.dispatcher.config()
    }

    /// `false` when the file target could not be opened and the logger
    /// degraded to console output only
    pub fn has_file_sink(&self) -> bool {
        self.dispatcher.has_file_sink()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        self.dispatcher.metrics()
    }

    pub fn flush(&self) -> Result<()> {
        self.dispatcher.flush()
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        let caller = caller::resolve(self.include_caller, Location::caller());
        self.emit(LogEntry::new(level, message).with_caller(caller));
    }

    /// Log with a structured payload appended to the record
    #[track_caller]
    pub fn log_with_data(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        data: impl Into<Payload>,
    ) {
        let caller = caller::resolve(self.include_caller, Location::caller());
        self.emit(
            LogEntry::new(level, message)
                .with_payload(Some(data.into()))
                .with_caller(caller),
        );
    }

    /// Log with caller info resolved by the caller (used by the macros)
    ///
    /// `caller` is ignored when the logger was built without caller info.
    pub fn log_with_caller(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        data: Option<Payload>,
        caller: Option<CallerInfo>,
    ) {
        let caller = caller.filter(|_| self.include_caller);
        self.emit(LogEntry::new(level, message).with_payload(data).with_caller(caller));
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    #[track_caller]
    pub fn success(&self, message: impl Into<String>) {
        self.log(LogLevel::Success, message);
    }

    #[inline]
    #[track_caller]
    pub fn message(&self, message: impl Into<String>) {
        self.log(LogLevel::Message, message);
    }

    #[inline]
    #[track_caller]
    pub fn warning(&self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    #[inline]
    #[track_caller]
    pub fn failed(&self, message: impl Into<String>) {
        self.log(LogLevel::Failed, message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    #[track_caller]
    pub fn critical(&self, message: impl Into<String>) {
        self.log(LogLevel::Critical, message);
    }

    #[inline]
    #[track_caller]
    pub fn debug_with_data(&self, message: impl Into<String>, data: impl Into<Payload>) {
        self.log_with_data(LogLevel::Debug, message, data);
    }

    #[inline]
    #[track_caller]
    pub fn info_with_data(&self, message: impl Into<String>, data: impl Into<Payload>) {
        self.log_with_data(LogLevel::Info, message, data);
    }

    #[inline]
    #[track_caller]
    pub fn success_with_data(&self, message: impl Into<String>, data: impl Into<Payload>) {
        self.log_with_data(LogLevel::Success, message, data);
    }

    #[inline]
    #[track_caller]
    pub fn message_with_data(&self, message: impl Into<String>, data: impl Into<Payload>) {
        self.log_with_data(LogLevel::Message, message, data);
    }

    #[inline]
    #[track_caller]
    pub fn warning_with_data(&self, message: impl Into<String>, data: impl Into<Payload>) {
        self.log_with_data(LogLevel::Warning, message, data);
    }

    #[inline]
    #[track_caller]
    pub fn failed_with_data(&self, message: impl Into<String>, data: impl Into<Payload>) {
        self.log_with_data(LogLevel::Failed, message, data);
    }

    #[inline]
    #[track_caller]
    pub fn error_with_data(&self, message: impl Into<String>, data: impl Into<Payload>) {
        self.log_with_data(LogLevel::Error, message, data);
    }

    #[inline]
    #[track_caller]
    pub fn critical_with_data(&self, message: impl Into<String>, data: impl Into<Payload>) {
        self.log_with_data(LogLevel::Critical, message, data);
    }

    /// Log an error value at ERROR level with its cause chain and stack
    ///
    /// # Example
    ///
    /// ```no_run
    /// # let logger = unified_logger::get_logger("app.log", true);
    /// if let Err(err) = "80a".parse::<u16>() {
    ///     logger.exception(Some("invalid port"), &err);
    /// }
    /// ```
    #[track_caller]
    pub fn exception<E>(&self, message: Option<&str>, error: &E)
    where
        E: Error + ?Sized,
    {
        let location = Location::caller();
        let info = ExceptionInfo::from_error(error);
        self.emit_exception(message, Some(info), location);
    }

    /// Log prepared exception info, or note that none was available
    ///
    /// With `None`, an ERROR record stating that no exception context was
    /// found is written instead.
    #[track_caller]
    pub fn exception_info(&self, message: Option<&str>, info: Option<ExceptionInfo>) {
        self.emit_exception(message, info, Location::caller());
    }

    fn emit_exception(
        &self,
        message: Option<&str>,
        info: Option<ExceptionInfo>,
        location: &Location<'_>,
    ) {
        let caller = caller::resolve(self.include_caller, location);
        let entry = match info {
            Some(info) => LogEntry::exception(message, info),
            None => {
                let text = match message {
                    Some(message) => format!("{} ({})", message, NO_EXCEPTION_CONTEXT),
                    None => NO_EXCEPTION_CONTEXT.to_string(),
                };
                LogEntry::new(LogLevel::Error, text)
            }
        };
        self.emit(entry.with_caller(caller));
    }

    fn emit(&self, entry: LogEntry) {
        self.dispatcher.dispatch(&entry);
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("path", &self.path)
            .field("include_caller", &self.include_caller)
            .field("console_threshold", &self.console_threshold())
            .field("has_file_sink", &self.has_file_sink())
            .finish()
    }
}

/// Builder for constructing a [`Logger`] with a fluent API
///
/// The console threshold is resolved once, at build time: a recognized
/// value of the environment variable (default `CONSOLE_LOG_LEVEL`) wins,
/// then the explicit [`console_level`](Self::console_level), then INFO.
///
/// # Example
/// ```no_run
/// use unified_logger::prelude::*;
///
/// let logger = Logger::builder("service.log")
///     .console_level(LogLevel::Debug)
///     .payload_style(PayloadStyle::Pretty)
///     .get_or_init()?;
/// # Ok::<(), LoggerError>(())
/// ```
pub struct LoggerBuilder {
    path: PathBuf,
    include_caller: bool,
    console_level: Option<LogLevel>,
    console_level_var: String,
    formatter: FormatterConfig,
    truncate: bool,
    console_colors: Option<bool>,
    console_writer: Option<Box<dyn Write + Send>>,
}

impl LoggerBuilder {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            include_caller: true,
            console_level: None,
            console_level_var: CONSOLE_LOG_LEVEL_VAR.to_string(),
            formatter: FormatterConfig::default(),
            truncate: false,
            console_colors: None,
            console_writer: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Attach `(file:function)` caller info to records (default `true`)
    #[must_use = "builder methods return a new value"]
    pub fn include_caller(mut self, include: bool) -> Self {
        self.include_caller = include;
        self
    }

    /// Console threshold used when the environment does not set one
    #[must_use = "builder methods return a new value"]
    pub fn console_level(mut self, level: LogLevel) -> Self {
        self.console_level = Some(level);
        self
    }

    /// Environment variable holding the console threshold
    #[must_use = "builder methods return a new value"]
    pub fn console_level_var(mut self, name: impl Into<String>) -> Self {
        self.console_level_var = name.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.formatter.timestamp_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn payload_style(mut self, style: PayloadStyle) -> Self {
        self.formatter.payload_style = style;
        self
    }

    /// Discard existing file content instead of appending
    #[must_use = "builder methods return a new value"]
    pub fn truncate(mut self, truncate: bool) -> Self {
        self.truncate = truncate;
        self
    }

    /// Force console colors on or off instead of detecting a terminal
    #[must_use = "builder methods return a new value"]
    pub fn console_colors(mut self, enabled: bool) -> Self {
        self.console_colors = Some(enabled);
        self
    }

    /// Send console output to `writer` instead of stderr
    #[must_use = "builder methods return a new value"]
    pub fn console_writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.console_writer = Some(Box::new(writer));
        self
    }

    pub(crate) fn truncates(&self) -> bool {
        self.truncate
    }

    fn resolve_threshold(&self) -> LogLevel {
        LogLevel::from_env(&self.console_level_var)
            .or(self.console_level)
            .unwrap_or_default()
    }

    /// Build a standalone logger, failing if the file cannot be opened
    ///
    /// The result is not registered. It opens its own handle on the file,
    /// so two loggers built for one path interleave whole records; with
    /// `truncate(true)` the second one also wipes what the first wrote.
    pub fn build(self) -> Result<Logger> {
        match self.build_lenient() {
            (logger, None) => Ok(logger),
            (_, Some(err)) => Err(err),
        }
    }

    /// Get the registered logger for this path, creating it from this
    /// builder if none exists yet
    ///
    /// An existing instance is returned unchanged; this builder's settings
    /// are then ignored.
    pub fn get_or_init(self) -> Result<Arc<Logger>> {
        registry::global().get_or_try_init(self)
    }

    /// Build a logger that degrades to console-only output when the file
    /// cannot be opened, returning the open error alongside
    pub(crate) fn build_lenient(self) -> (Logger, Option<LoggerError>) {
        let threshold = self.resolve_threshold();

        let (file, open_error) = match FileAppender::open(&self.path, self.truncate) {
            Ok(appender) => (Some(appender), None),
            Err(err) => (None, Some(err)),
        };

        let console = match self.console_writer {
            Some(writer) => ConsoleAppender::with_writer(writer),
            None => ConsoleAppender::new(),
        };
        let console = match self.console_colors {
            Some(enabled) => console.colors(enabled),
            None => console,
        };

        let dispatcher = SinkDispatcher::new(
            file.map(|f| Box::new(f) as Box<dyn super::appender::Appender>),
            Some(Box::new(console)),
            threshold,
            self.formatter,
        );

        let logger = Logger {
            path: self.path,
            include_caller: self.include_caller,
            dispatcher,
        };
        (logger, open_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn logger_in(dir: &TempDir, var: &str) -> (Logger, Captured) {
        let console = Captured::default();
        let logger = Logger::builder(dir.path().join("test.log"))
            .console_level_var(var)
            .console_colors(false)
            .console_writer(console.clone())
            .build()
            .expect("build logger");
        (logger, console)
    }

    #[test]
    fn test_builder_defaults() {
        let dir = TempDir::new().unwrap();
        let (logger, _) = logger_in(&dir, "UNIFIED_LOGGER_TEST_UNSET_VAR");
        assert!(logger.include_caller());
        assert_eq!(logger.console_threshold(), LogLevel::Info);
        assert!(logger.has_file_sink());
        assert_eq!(logger.path(), dir.path().join("test.log"));
    }

    #[test]
    fn test_explicit_level_used_without_env() {
        let dir = TempDir::new().unwrap();
        let logger = Logger::builder(dir.path().join("a.log"))
            .console_level_var("UNIFIED_LOGGER_TEST_UNSET_VAR")
            .console_level(LogLevel::Failed)
            .build()
            .unwrap();
        assert_eq!(logger.console_threshold(), LogLevel::Failed);
    }

    #[test]
    fn test_env_overrides_explicit_level() {
        let dir = TempDir::new().unwrap();
        std::env::set_var("UNIFIED_LOGGER_TEST_ENV_WINS", "critical");
        let logger = Logger::builder(dir.path().join("a.log"))
            .console_level_var("UNIFIED_LOGGER_TEST_ENV_WINS")
            .console_level(LogLevel::Debug)
            .build()
            .unwrap();
        assert_eq!(logger.console_threshold(), LogLevel::Critical);
    }

    #[test]
    fn test_unrecognized_env_falls_back() {
        let dir = TempDir::new().unwrap();
        std::env::set_var("UNIFIED_LOGGER_TEST_BAD_VALUE", "chatty");
        let logger = Logger::builder(dir.path().join("a.log"))
            .console_level_var("UNIFIED_LOGGER_TEST_BAD_VALUE")
            .build()
            .unwrap();
        assert_eq!(logger.console_threshold(), LogLevel::Info);
    }

    #[test]
    fn test_every_level_reaches_the_file() {
        let dir = TempDir::new().unwrap();
        let (logger, console) = logger_in(&dir, "UNIFIED_LOGGER_TEST_UNSET_VAR");

        logger.debug("d");
        logger.info("i");
        logger.success("s");
        logger.message("m");
        logger.warning("w");
        logger.failed("f");
        logger.error("e");
        logger.critical("c");

        let content = fs::read_to_string(logger.path()).unwrap();
        let labels: Vec<&str> = content
            .lines()
            .map(|l| l.split("] [").nth(1).unwrap().split(']').next().unwrap().trim())
            .collect();
        assert_eq!(
            labels,
            vec!["DEBUG", "INFO", "SUCCESS", "MESSAGE", "WARNING", "FAILED", "ERROR", "CRITICAL"]
        );
        // DEBUG is below the default INFO threshold
        assert_eq!(console.text().lines().count(), 7);
    }

    #[test]
    fn test_caller_is_attached() {
        let dir = TempDir::new().unwrap();
        let (logger, _) = logger_in(&dir, "UNIFIED_LOGGER_TEST_UNSET_VAR");

        logger.info("with caller");

        let content = fs::read_to_string(logger.path()).unwrap();
        assert!(content.contains("(logger.rs:"), "got: {}", content);
    }

    #[test]
    fn test_caller_can_be_disabled() {
        let dir = TempDir::new().unwrap();
        let logger = Logger::builder(dir.path().join("a.log"))
            .include_caller(false)
            .console_writer(std::io::sink())
            .build()
            .unwrap();

        logger.info("bare");
        logger.log_with_caller(
            LogLevel::Info,
            "macro style",
            None,
            Some(CallerInfo::new("x.rs", 1, Some("f"))),
        );

        let content = fs::read_to_string(logger.path()).unwrap();
        assert!(!content.contains('('));
        assert!(content.contains("] bare"));
    }

    #[test]
    fn test_payload_is_appended() {
        let dir = TempDir::new().unwrap();
        let (logger, _) = logger_in(&dir, "UNIFIED_LOGGER_TEST_UNSET_VAR");

        logger.info_with_data("user created", json!({"id": 7, "role": "admin"}));

        let content = fs::read_to_string(logger.path()).unwrap();
        assert!(content.trim_end().ends_with(r#"user created | {"id":7,"role":"admin"}"#));
    }

    #[test]
    fn test_exception_without_context() {
        let dir = TempDir::new().unwrap();
        let (logger, console) = logger_in(&dir, "UNIFIED_LOGGER_TEST_UNSET_VAR");

        logger.exception_info(None, None);

        let content = fs::read_to_string(logger.path()).unwrap();
        assert!(content.contains("[ERROR   ]"));
        assert!(content.contains(NO_EXCEPTION_CONTEXT));
        assert!(console.text().contains(NO_EXCEPTION_CONTEXT));
    }

    #[test]
    fn test_exception_with_error() {
        let dir = TempDir::new().unwrap();
        let (logger, _) = logger_in(&dir, "UNIFIED_LOGGER_TEST_UNSET_VAR");

        let err = "twelve".parse::<u32>().unwrap_err();
        logger.exception(Some("parsing retry count"), &err);

        let content = fs::read_to_string(logger.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert!(lines[0].contains("[ERROR   ]"));
        assert!(lines[0].ends_with("parsing retry count"));
        assert_eq!(lines[1], "    ParseIntError: invalid digit found in string");
        assert_eq!(lines[2], "    Traceback (most recent call first):");
        assert!(lines.len() > 3);
    }

    #[test]
    fn test_build_fails_for_unopenable_path() {
        let dir = TempDir::new().unwrap();
        let result = Logger::builder(dir.path().join("no/such/dir/app.log")).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_lenient_build_degrades_to_console() {
        let dir = TempDir::new().unwrap();
        let console = Captured::default();
        let (logger, err) = Logger::builder(dir.path().join("no/such/dir/app.log"))
            .console_writer(console.clone())
            .console_colors(false)
            .build_lenient();

        assert!(err.is_some());
        assert!(!logger.has_file_sink());
        logger.error("console still works");
        assert!(console.text().contains("console still works"));
    }
}

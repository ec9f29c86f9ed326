//! Per-path logger instances
//!
//! Loggers are keyed by the absolute form of their target path, so every
//! request for the same file yields the same shared instance. The first
//! request fixes the configuration; later requests ignore their own.

use super::{
    error::{LoggerError, Result},
    logger::{Logger, LoggerBuilder},
};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

static GLOBAL: Lazy<LoggerRegistry> = Lazy::new(LoggerRegistry::new);

/// Process-wide registry used by [`get_logger`]
pub fn global() -> &'static LoggerRegistry {
    &GLOBAL
}

/// Get the shared logger for `path`, creating it on first use
///
/// Never fails: if the file cannot be opened, the error is reported once on
/// stderr and a console-only logger is registered for the path.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
///
/// let first = unified_logger::get_logger("app.log", true);
/// let second = unified_logger::get_logger("app.log", false);
/// assert!(Arc::ptr_eq(&first, &second));
/// assert!(second.include_caller());
/// ```
pub fn get_logger(path: impl AsRef<Path>, include_caller: bool) -> Arc<Logger> {
    global().get_or_init(LoggerBuilder::new(path).include_caller(include_caller))
}

/// Normalize a target path into a registry key
pub fn registry_key(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[derive(Default)]
pub struct LoggerRegistry {
    loggers: Mutex<HashMap<PathBuf, Arc<Logger>>>,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the registered logger or build one, propagating open errors
    ///
    /// Nothing is registered when the build fails, so a later call retries.
    pub fn get_or_try_init(&self, builder: LoggerBuilder) -> Result<Arc<Logger>> {
        let key = registry_key(builder.path());
        let mut loggers = self.loggers.lock();
        if let Some(existing) = loggers.get(&key) {
            return Ok(Arc::clone(existing));
        }
        let logger = Arc::new(builder.build()?);
        loggers.insert(key, Arc::clone(&logger));
        Ok(logger)
    }

    /// Return the registered logger or build one, degrading to console-only
    /// output if the file cannot be opened
    pub fn get_or_init(&self, builder: LoggerBuilder) -> Arc<Logger> {
        let key = registry_key(builder.path());
        let mut loggers = self.loggers.lock();
        if let Some(existing) = loggers.get(&key) {
            return Arc::clone(existing);
        }

        let (logger, open_error) = builder.build_lenient();
        if let Some(err) = open_error {
            report_open_failure(&key, &err);
        }
        let logger = Arc::new(logger);
        loggers.insert(key, Arc::clone(&logger));
        logger
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<Arc<Logger>> {
        self.loggers.lock().get(&registry_key(path.as_ref())).cloned()
    }

    /// Replace the logger for the builder's path with a freshly built one
    ///
    /// Holders of the previous instance keep writing through their own file
    /// handle until they drop it. Truncating is refused while an instance is
    /// registered, since it would discard records that instance wrote.
    pub fn reinit(&self, builder: LoggerBuilder) -> Result<Arc<Logger>> {
        let key = registry_key(builder.path());
        let mut loggers = self.loggers.lock();
        if builder.truncates() && loggers.contains_key(&key) {
            return Err(LoggerError::file_appender(
                key.display().to_string(),
                "cannot truncate a file owned by a registered logger",
            ));
        }
        let logger = Arc::new(builder.build()?);
        loggers.insert(key, Arc::clone(&logger));
        Ok(logger)
    }

    pub fn remove(&self, path: impl AsRef<Path>) -> Option<Arc<Logger>> {
        self.loggers.lock().remove(&registry_key(path.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.loggers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.lock().is_empty()
    }
}

fn report_open_failure(path: &Path, err: &LoggerError) {
    let _ = writeln!(
        std::io::stderr(),
        "[LOGGER ERROR] {} ({}). Logging to console only.",
        err,
        path.display()
    );
}

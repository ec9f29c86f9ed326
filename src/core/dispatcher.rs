//! Sink dispatch
//!
//! Every entry goes to the file sink; it reaches the console only when its
//! level meets the console threshold. Each sink sits behind its own mutex,
//! so there is at most one in-flight write per target, and the two sinks
//! are isolated: an error or a panic in one never skips the other.

use super::{
    appender::Appender, exception::panic_message, formatter::FormatterConfig,
    log_entry::LogEntry, log_level::LogLevel, metrics::LoggerMetrics,
};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

struct Sink {
    appender: Mutex<Box<dyn Appender>>,
    /// Set once the first failure has been reported on stderr
    failure_reported: AtomicBool,
}

impl Sink {
    fn new(appender: Box<dyn Appender>) -> Self {
        Self {
            appender: Mutex::new(appender),
            failure_reported: AtomicBool::new(false),
        }
    }

    /// Append and flush one entry with panic isolation
    fn write(&self, entry: &LogEntry, config: &FormatterConfig) -> Result<(), String> {
        let mut appender = self.appender.lock();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            appender.append(entry, config)?;
            appender.flush()
        }));

        match result {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(format!("{} appender failed: {}", appender.name(), e)),
            Err(panic_info) => Err(format!(
                "{} appender panicked: {}",
                appender.name(),
                panic_message(panic_info.as_ref())
            )),
        }
    }

    fn flush(&self) -> super::error::Result<()> {
        self.appender.lock().flush()
    }

    /// Report the first failure of this sink; later ones are only counted
    fn report_failure(&self, message: &str) {
        if !self.failure_reported.swap(true, Ordering::Relaxed) {
            // stderr itself may be the failing sink, so ignore this write's result
            let _ = writeln!(
                std::io::stderr(),
                "[LOGGER ERROR] {}. Further failures on this sink are counted silently.",
                message
            );
        }
    }
}

pub struct SinkDispatcher {
    file: Option<Sink>,
    console: Option<Sink>,
    console_threshold: LogLevel,
    config: FormatterConfig,
    metrics: LoggerMetrics,
}

impl SinkDispatcher {
    pub fn new(
        file: Option<Box<dyn Appender>>,
        console: Option<Box<dyn Appender>>,
        console_threshold: LogLevel,
        config: FormatterConfig,
    ) -> Self {
        Self {
            file: file.map(Sink::new),
            console: console.map(Sink::new),
            console_threshold,
            config,
            metrics: LoggerMetrics::new(),
        }
    }

    pub fn dispatch(&self, entry: &LogEntry) {
        self.metrics.record_logged();

        if let Some(ref file) = self.file {
            if let Err(message) = file.write(entry, &self.config) {
                self.metrics.record_file_failure();
                file.report_failure(&message);
            }
        }

        let Some(ref console) = self.console else {
            return;
        };
        if !entry.level.meets_threshold(self.console_threshold) {
            self.metrics.record_console_filtered();
            return;
        }
        match console.write(entry, &self.config) {
            Ok(()) => {
                self.metrics.record_console_written();
            }
            Err(message) => {
                self.metrics.record_console_failure();
                console.report_failure(&message);
            }
        }
    }

    pub fn flush(&self) -> super::error::Result<()> {
        if let Some(ref file) = self.file {
            file.flush()?;
        }
        if let Some(ref console) = self.console {
            console.flush()?;
        }
        Ok(())
    }

    pub fn console_threshold(&self) -> LogLevel {
        self.console_threshold
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    pub fn has_file_sink(&self) -> bool {
        self.file.is_some()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LoggerError, Result};
    use std::sync::Arc;

    /// Records rendered plain lines into a shared buffer
    struct Recording {
        lines: Arc<Mutex<Vec<String>>>,
    }

    impl Appender for Recording {
        fn append(&mut self, entry: &LogEntry, config: &FormatterConfig) -> Result<()> {
            self.lines
                .lock()
                .push(crate::core::formatter::render(entry, false, config));
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    struct Failing;

    impl Appender for Failing {
        fn append(&mut self, _entry: &LogEntry, _config: &FormatterConfig) -> Result<()> {
            Err(LoggerError::writer("stream closed"))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct Panicking;

    impl Appender for Panicking {
        fn append(&mut self, _entry: &LogEntry, _config: &FormatterConfig) -> Result<()> {
            panic!("appender exploded");
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    fn recording() -> (Box<dyn Appender>, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        (
            Box::new(Recording {
                lines: Arc::clone(&lines),
            }),
            lines,
        )
    }

    #[test]
    fn test_threshold_filters_console_only() {
        let (file, file_lines) = recording();
        let (console, console_lines) = recording();
        let dispatcher = SinkDispatcher::new(
            Some(file),
            Some(console),
            LogLevel::Error,
            FormatterConfig::default(),
        );

        dispatcher.dispatch(&LogEntry::new(LogLevel::Info, "routine"));
        dispatcher.dispatch(&LogEntry::new(LogLevel::Error, "broken"));

        assert_eq!(file_lines.lock().len(), 2);
        let console_lines = console_lines.lock();
        assert_eq!(console_lines.len(), 1);
        assert!(console_lines[0].ends_with("broken"));
        assert_eq!(dispatcher.metrics().console_filtered(), 1);
        assert_eq!(dispatcher.metrics().console_written(), 1);
    }

    #[test]
    fn test_file_failure_does_not_block_console() {
        let (console, console_lines) = recording();
        let dispatcher = SinkDispatcher::new(
            Some(Box::new(Failing)),
            Some(console),
            LogLevel::Debug,
            FormatterConfig::default(),
        );

        dispatcher.dispatch(&LogEntry::new(LogLevel::Warning, "one"));
        dispatcher.dispatch(&LogEntry::new(LogLevel::Warning, "two"));

        assert_eq!(console_lines.lock().len(), 2);
        assert_eq!(dispatcher.metrics().file_failures(), 2);
    }

    #[test]
    fn test_console_panic_does_not_block_file() {
        let (file, file_lines) = recording();
        let dispatcher = SinkDispatcher::new(
            Some(file),
            Some(Box::new(Panicking)),
            LogLevel::Debug,
            FormatterConfig::default(),
        );

        dispatcher.dispatch(&LogEntry::new(LogLevel::Critical, "still recorded"));

        assert_eq!(file_lines.lock().len(), 1);
        assert_eq!(dispatcher.metrics().console_failures(), 1);
    }

    #[test]
    fn test_console_only_dispatcher() {
        let (console, console_lines) = recording();
        let dispatcher =
            SinkDispatcher::new(None, Some(console), LogLevel::Info, FormatterConfig::default());

        dispatcher.dispatch(&LogEntry::new(LogLevel::Info, "no file"));

        assert!(!dispatcher.has_file_sink());
        assert_eq!(console_lines.lock().len(), 1);
    }
}

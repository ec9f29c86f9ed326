//! Console appender implementation

use crate::core::{formatter, Appender, FormatterConfig, LogEntry, Result};
use std::io::{IsTerminal, Write};

/// Writes colorized records to the standard error stream
///
/// Colors are on by default when stderr is a terminal and `NO_COLOR` is
/// not set. The writer can be replaced, which tests use to capture output.
pub struct ConsoleAppender {
    writer: Box<dyn Write + Send>,
    use_colors: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
            use_colors: Self::colors_supported(),
        }
    }

    /// Write to `writer` instead of stderr
    ///
    /// # Example
    ///
    /// ```
    /// use unified_logger::appenders::ConsoleAppender;
    ///
    /// let appender = ConsoleAppender::with_writer(std::io::sink()).colors(false);
    /// ```
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Box::new(writer),
            use_colors: Self::colors_supported(),
        }
    }

    #[must_use]
    pub fn colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn uses_colors(&self) -> bool {
        self.use_colors
    }

    fn colors_supported() -> bool {
        std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry, config: &FormatterConfig) -> Result<()> {
        let output = formatter::render(entry, self.use_colors, config);
        writeln!(self.writer, "{}", output)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

//! Record rendering
//!
//! One function renders a [`LogEntry`] for both sinks. The colored form is
//! the plain form wrapped in the level's ANSI color and a reset, so
//! stripping escape sequences from it yields the plain form byte for byte.
//!
//! Layout:
//!
//! ```text
//! [08-01-25 10:30:45] [INFO    ] (server.rs:start) listening | {"port":8080}
//! [08-01-25 10:30:46] [ERROR   ] (server.rs:accept) accept failed
//!     Os: connection reset by peer
//!     Traceback (most recent call first):
//!       ./src/server.rs:88 in accept
//! ```

use super::log_entry::{push_sanitized, LogEntry};
use super::payload::Payload;
use super::timestamp::TimestampFormat;
use super::log_level::LogLevel;
use std::fmt::Write;

/// Width the level label is padded to
pub const LEVEL_WIDTH: usize = 8;

const RESET: &str = "\x1b[0m";
const CONTINUATION_INDENT: &str = "    ";
const FRAME_INDENT: &str = "      ";

/// How a structured payload is laid out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PayloadStyle {
    /// Compact JSON on the record's own line, after ` | `
    #[default]
    Inline,
    /// Four-space indented JSON on continuation lines
    Pretty,
}

/// Configuration for log formatting
///
/// # Examples
///
/// ```
/// use unified_logger::{FormatterConfig, PayloadStyle, TimestampFormat};
///
/// let config = FormatterConfig::new()
///     .with_timestamp_format(TimestampFormat::Iso8601)
///     .with_payload_style(PayloadStyle::Pretty);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatterConfig {
    pub timestamp_format: TimestampFormat,
    pub payload_style: PayloadStyle,
}

impl FormatterConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Set a custom timestamp format using a strftime-compatible format string
    #[must_use]
    pub fn with_custom_timestamp(mut self, format_str: &str) -> Self {
        self.timestamp_format = TimestampFormat::Custom(format_str.to_string());
        self
    }

    #[must_use]
    pub fn with_payload_style(mut self, style: PayloadStyle) -> Self {
        self.payload_style = style;
        self
    }

}

/// Render an entry as text, optionally colorized for a terminal
///
/// Every text field is escaped again here, so entries assembled through
/// public fields cannot break the one-record-per-line layout.
pub fn render(entry: &LogEntry, colorize: bool, config: &FormatterConfig) -> String {
    let mut out = String::with_capacity(96);

    let _ = write!(
        out,
        "[{}] [{:<width$}]",
        config.timestamp_format.format(&entry.timestamp),
        entry.level.label(),
        width = LEVEL_WIDTH
    );

    if let Some(ref caller) = entry.caller {
        out.push_str(" (");
        push_sanitized(&mut out, &caller.to_string());
        out.push(')');
    }

    out.push(' ');
    push_sanitized(&mut out, entry.headline());

    if let Some(ref payload) = entry.payload {
        push_payload(&mut out, payload, config.payload_style);
    }

    if let Some(info) = entry.exception_info() {
        out.push('\n');
        out.push_str(CONTINUATION_INDENT);
        push_sanitized(&mut out, &info.type_name);
        out.push_str(": ");
        push_sanitized(&mut out, &info.message);
        for cause in &info.causes {
            out.push('\n');
            out.push_str(CONTINUATION_INDENT);
            out.push_str("caused by: ");
            push_sanitized(&mut out, cause);
        }
        let _ = write!(out, "\n{}Traceback (most recent call first):", CONTINUATION_INDENT);
        if info.frames.is_empty() {
            let _ = write!(out, "\n{}<stack unavailable>", FRAME_INDENT);
        }
        for frame in &info.frames {
            out.push('\n');
            out.push_str(FRAME_INDENT);
            push_sanitized(&mut out, &frame.to_string());
        }
    }

    if colorize {
        paint(entry.level, &out)
    } else {
        out
    }
}

fn push_payload(out: &mut String, payload: &Payload, style: PayloadStyle) {
    match (style, payload) {
        (PayloadStyle::Pretty, Payload::Json(_)) => {
            out.push_str(" |");
            for line in payload.render_pretty().lines() {
                out.push('\n');
                out.push_str(CONTINUATION_INDENT);
                out.push_str(line);
            }
        }
        _ => {
            out.push_str(" | ");
            out.push_str(&payload.render_compact());
        }
    }
}

/// Wrap text in the ANSI foreground color of `level`
pub fn paint(level: LogLevel, text: &str) -> String {
    format!("\x1b[{}m{}{}", level.color().to_fg_str(), text, RESET)
}

/// Remove ANSI CSI escape sequences (`ESC [ ... final`) from text
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for next in chars.by_ref() {
                if ('\x40'..='\x7e').contains(&next) {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}

/// Split a rendered inline record into its text and JSON payload segments
///
/// The separator is the first ` | ` whose remainder parses as JSON, so a
/// message that itself contains ` | ` is handled. Returns `None` if the
/// line carries no JSON payload.
pub fn split_payload(line: &str) -> Option<(&str, &str)> {
    line.match_indices(" | ").find_map(|(idx, sep)| {
        let rest = &line[idx + sep.len()..];
        serde_json::from_str::<serde_json::Value>(rest)
            .ok()
            .map(|_| (&line[..idx], rest))
    })
}

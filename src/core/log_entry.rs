//! Log entry structure

use super::caller::CallerInfo;
use super::exception::ExceptionInfo;
use super::log_level::LogLevel;
use super::payload::Payload;
use chrono::{DateTime, Local};

/// Primary content of a record: a plain message or a captured exception
#[derive(Debug, Clone, PartialEq)]
pub enum EntryBody {
    Message(String),
    Exception {
        message: Option<String>,
        info: ExceptionInfo,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub timestamp: DateTime<Local>,
    pub body: EntryBody,
    pub payload: Option<Payload>,
    pub caller: Option<CallerInfo>,
}

/// Sanitize text to prevent log injection
///
/// Newlines, carriage returns and tabs become their backslash escapes; any
/// other control character (including ESC) becomes a `\u{..}` escape, so a
/// record can neither forge extra lines nor smuggle terminal sequences.
pub(crate) fn sanitize_message(message: &str) -> String {
    let mut out = String::with_capacity(message.len());
    push_sanitized(&mut out, message);
    out
}

/// Append `text` to `out` with the escaping of [`sanitize_message`]
///
/// Already sanitized text passes through unchanged.
pub(crate) fn push_sanitized(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.extend(c.escape_default()),
            c => out.push(c),
        }
    }
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            timestamp: Local::now(),
            body: EntryBody::Message(sanitize_message(&message.into())),
            payload: None,
            caller: None,
        }
    }

    /// Create an ERROR entry carrying exception details
    pub fn exception(message: Option<&str>, info: ExceptionInfo) -> Self {
        Self {
            level: LogLevel::Error,
            timestamp: Local::now(),
            body: EntryBody::Exception {
                message: message.map(sanitize_message),
                info,
            },
            payload: None,
            caller: None,
        }
    }

    #[must_use]
    pub fn with_payload(mut self, payload: Option<Payload>) -> Self {
        self.payload = payload;
        self
    }

    #[must_use]
    pub fn with_caller(mut self, caller: Option<CallerInfo>) -> Self {
        self.caller = caller;
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Text shown after the level and caller
    ///
    /// For exception entries without an explicit message this is the
    /// exception's type name.
    pub fn headline(&self) -> &str {
        match &self.body {
            EntryBody::Message(message) => message,
            EntryBody::Exception {
                message: Some(message),
                ..
            } => message,
            EntryBody::Exception { message: None, info } => &info.type_name,
        }
    }

    pub fn exception_info(&self) -> Option<&ExceptionInfo> {
        match &self.body {
            EntryBody::Exception { info, .. } => Some(info),
            EntryBody::Message(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_sanitized() {
        let entry = LogEntry::new(LogLevel::Info, "line one\nERROR forged\r\tend");
        assert_eq!(entry.headline(), "line one\\nERROR forged\\r\\tend");
    }

    #[test]
    fn test_escape_sequences_are_neutralized() {
        let entry = LogEntry::new(LogLevel::Warning, "\x1b[31mred\x1b[0m");
        assert!(!entry.headline().contains('\x1b'));
        assert!(entry.headline().contains("\\u{1b}"));
    }

    #[test]
    fn test_exception_headline_defaults_to_type() {
        let info = ExceptionInfo::new("ParseIntError", "invalid digit found in string");
        let entry = LogEntry::exception(None, info);
        assert_eq!(entry.level, LogLevel::Error);
        assert_eq!(entry.headline(), "ParseIntError");
        assert!(entry.exception_info().is_some());

        let info = ExceptionInfo::new("ParseIntError", "invalid digit found in string");
        let entry = LogEntry::exception(Some("reading port"), info);
        assert_eq!(entry.headline(), "reading port");
    }
}

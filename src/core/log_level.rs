//! Log level definitions
//!
//! The level set is closed. Each level carries a numeric rank used for
//! threshold comparisons, an uppercase label and a console color. The
//! derived ordering follows the discriminants, which are the ranks.

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Environment variable consulted for the console threshold
pub const CONSOLE_LOG_LEVEL_VAR: &str = "CONSOLE_LOG_LEVEL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    Debug = 10,
    #[default]
    Info = 20,
    Success = 25,
    Message = 28,
    Warning = 30,
    Failed = 35,
    Error = 40,
    Critical = 50,
}

impl LogLevel {
    /// Every level, lowest rank first
    pub const ALL: [LogLevel; 8] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Success,
        LogLevel::Message,
        LogLevel::Warning,
        LogLevel::Failed,
        LogLevel::Error,
        LogLevel::Critical,
    ];

    #[inline]
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Success => "SUCCESS",
            LogLevel::Message => "MESSAGE",
            LogLevel::Warning => "WARNING",
            LogLevel::Failed => "FAILED",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }

    pub fn color(self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => Blue,
            LogLevel::Info => Cyan,
            LogLevel::Success => Green,
            LogLevel::Message => BrightCyan,
            LogLevel::Warning => Yellow,
            LogLevel::Failed => BrightRed,
            LogLevel::Error => Red,
            LogLevel::Critical => Magenta,
        }
    }

    /// `true` when this level is at or above `threshold`
    #[inline]
    pub fn meets_threshold(self, threshold: LogLevel) -> bool {
        self.rank() >= threshold.rank()
    }

    /// Map a raw environment value to a level
    ///
    /// Absent or unrecognized values resolve to [`LogLevel::Info`].
    pub fn from_env_value(value: Option<&str>) -> LogLevel {
        value
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or_default()
    }

    /// Read `var` from the environment and map it to a level
    ///
    /// Returns `None` when the variable is unset or holds an unknown label,
    /// so callers can fall back to their own default.
    pub fn from_env(var: &str) -> Option<LogLevel> {
        std::env::var(var).ok().and_then(|v| v.trim().parse().ok())
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "SUCCESS" => Ok(LogLevel::Success),
            "MESSAGE" => Ok(LogLevel::Message),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "FAILED" => Ok(LogLevel::Failed),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" | "FATAL" => Ok(LogLevel::Critical),
            _ => Err(LoggerError::invalid_level(s)),
        }
    }
}

//! Caller resolution
//!
//! Public logging methods are `#[track_caller]`, so the `Location` they see
//! already points at the first frame outside the logging system. The file
//! and line come from that location; the enclosing function name is looked
//! up on the active stack by matching the same source position.

use super::stack::{self, basename, shorten_function};
use std::fmt;
use std::panic::Location;

/// Source position a log call originated from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerInfo {
    /// Source file basename
    pub file: String,
    pub line: u32,
    /// Enclosing function, when it could be recovered
    pub function: Option<String>,
}

impl CallerInfo {
    /// Build caller info from a file path, line and full function path
    pub fn new(file: &str, line: u32, function: Option<&str>) -> Self {
        Self {
            file: basename(file).to_string(),
            line,
            function: function
                .map(shorten_function)
                .filter(|f| !f.is_empty())
                .map(str::to_string),
        }
    }

    pub fn from_location(location: &Location<'_>) -> Self {
        Self::new(location.file(), location.line(), None)
    }
}

impl fmt::Display for CallerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.function {
            Some(function) => write!(f, "{}:{}", self.file, function),
            None => write!(f, "{}:{}", self.file, self.line),
        }
    }
}

/// Resolve the caller of a logging method
///
/// Returns `None` when caller inclusion is disabled. The function name
/// degrades to `None` if the stack cannot be captured or carries no debug
/// info for the location.
pub fn resolve(include_caller: bool, location: &Location<'_>) -> Option<CallerInfo> {
    if !include_caller {
        return None;
    }
    let mut caller = CallerInfo::from_location(location);
    caller.function = enclosing_function(location.file(), location.line());
    Some(caller)
}

fn enclosing_function(file: &str, line: u32) -> Option<String> {
    stack::capture()
        .iter()
        .find(|frame| frame.is_at(file, line))
        .map(|frame| frame.short_function().to_string())
        .filter(|f| !f.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn here() -> &'static Location<'static> {
        Location::caller()
    }

    #[test]
    fn test_disabled_returns_none() {
        assert_eq!(resolve(false, here()), None);
    }

    #[test]
    fn test_resolves_file_and_function() {
        let caller = resolve(true, here()).expect("caller enabled");
        assert_eq!(caller.file, "caller.rs");
        assert!(caller.line > 0);
        #[cfg(debug_assertions)]
        assert_eq!(
            caller.function.as_deref(),
            Some("test_resolves_file_and_function")
        );
    }

    #[test]
    fn test_new_shortens_paths() {
        let caller = CallerInfo::new("src/handlers/auth.rs", 12, Some("app::handlers::login"));
        assert_eq!(caller.file, "auth.rs");
        assert_eq!(caller.function.as_deref(), Some("login"));
        assert_eq!(caller.to_string(), "auth.rs:login");
    }

    #[test]
    fn test_display_without_function_uses_line() {
        let caller = CallerInfo::new("src/main.rs", 42, None);
        assert_eq!(caller.to_string(), "main.rs:42");
    }
}

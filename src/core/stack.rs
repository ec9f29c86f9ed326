//! Active call stack inspection
//!
//! Frames are obtained from `std::backtrace::Backtrace` and parsed from its
//! textual form, which lists one `N: symbol` line per frame optionally
//! followed by an `at file:line:column` line. When the host cannot capture
//! a backtrace the frame list is empty.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;

/// Modules of this crate whose frames belong to the logging machinery
const INTERNAL_MODULES: &[&str] = &[
    "core::stack::",
    "core::caller::",
    "core::exception::",
    "core::logger::",
    "core::dispatcher::",
    "bridge::",
];

/// Symbol prefixes of the standard library and runtime glue
const RUNTIME_PREFIXES: &[&str] = &[
    "std::",
    "core::",
    "alloc::",
    "test::",
    "backtrace::",
    "__rust",
    "rust_begin_unwind",
    "__libc_start",
];

/// Thread entry symbols that carry no module path
const RUNTIME_SYMBOLS: &[&str] = &[
    "<unknown>",
    "_start",
    "start_thread",
    "clone",
    "clone3",
    "__clone",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    pub function: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl StackFrame {
    /// Basename of the source file
    pub fn file_name(&self) -> Option<&str> {
        self.file.as_deref().map(basename)
    }

    /// Function name without module path or closure suffixes
    pub fn short_function(&self) -> &str {
        shorten_function(&self.function)
    }

    /// `true` if this frame's source position is `file:line`
    ///
    /// `file` is compared as a path suffix so that a relative location
    /// such as `src/main.rs` matches `./src/main.rs` or an absolute path.
    pub fn is_at(&self, file: &str, line: u32) -> bool {
        let Some(frame_file) = self.file.as_deref() else {
            return false;
        };
        if self.line != Some(line) {
            return false;
        }
        let frame_file = frame_file.replace('\\', "/");
        let file = file.replace('\\', "/");
        let file = file.trim_start_matches("./");
        match frame_file.strip_suffix(file) {
            Some(rest) => rest.is_empty() || rest.ends_with('/'),
            None => false,
        }
    }

    fn is_runtime(&self) -> bool {
        let symbol = self.function.trim_start_matches('<');
        RUNTIME_SYMBOLS.contains(&self.function.as_str())
            || RUNTIME_PREFIXES.iter().any(|p| symbol.starts_with(p))
            || symbol.contains(" as core::ops::function::")
    }

    fn is_internal(&self) -> bool {
        let symbol = self.function.trim_start_matches('<');
        let Some(rest) = symbol
            .strip_prefix(env!("CARGO_CRATE_NAME"))
            .and_then(|r| r.strip_prefix("::"))
        else {
            return false;
        };
        // unit tests live inside these modules and count as callers
        INTERNAL_MODULES.iter().any(|m| rest.starts_with(m)) && !rest.contains("::tests::")
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.file.as_deref(), self.line) {
            (Some(file), Some(line)) => write!(f, "{}:{} in {}", file, line, self.short_function()),
            (Some(file), None) => write!(f, "{} in {}", file, self.short_function()),
            _ => write!(f, "<unknown> in {}", self.short_function()),
        }
    }
}

pub(crate) fn basename(path: &str) -> &str {
    path.rsplit(&['/', '\\'][..]).next().unwrap_or(path)
}

/// Reduce a symbol path to the enclosing function's own name
///
/// `app::handlers::login::{{closure}}` becomes `login`, and
/// `<app::Db as app::Store>::get` becomes `get`.
pub(crate) fn shorten_function(symbol: &str) -> &str {
    let mut symbol = symbol.trim();
    while let Some(rest) = strip_closure_suffix(symbol) {
        symbol = rest;
    }
    symbol.rsplit("::").next().unwrap_or(symbol)
}

fn strip_closure_suffix(symbol: &str) -> Option<&str> {
    if let Some(rest) = symbol.strip_suffix("::{{closure}}") {
        return Some(rest);
    }
    if symbol.ends_with('}') {
        return symbol.rfind("::{closure#").map(|idx| &symbol[..idx]);
    }
    None
}

/// Parse the textual form of a captured backtrace
pub fn parse_backtrace(text: &str) -> Vec<StackFrame> {
    let mut frames: Vec<StackFrame> = Vec::new();
    for raw in text.lines() {
        let line = raw.trim();
        if let Some(location) = line.strip_prefix("at ") {
            if let Some(frame) = frames.last_mut() {
                if frame.file.is_none() {
                    let (file, line_no) = split_location(location);
                    frame.file = Some(file.to_string());
                    frame.line = line_no;
                }
            }
            continue;
        }
        if let Some((index, symbol)) = line.split_once(": ") {
            if !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()) {
                frames.push(StackFrame {
                    function: symbol.trim().to_string(),
                    file: None,
                    line: None,
                });
            }
        }
    }
    frames
}

/// Split `path:line:column` (column optional) into path and line
fn split_location(location: &str) -> (&str, Option<u32>) {
    let mut parts = location.rsplitn(3, ':');
    let last = parts.next();
    let middle = parts.next();
    let head = parts.next();
    match (head, middle, last) {
        (Some(path), Some(line), Some(col))
            if line.parse::<u32>().is_ok() && col.parse::<u32>().is_ok() =>
        {
            (path, line.parse().ok())
        }
        _ => match location.rsplit_once(':') {
            Some((path, line)) if line.parse::<u32>().is_ok() => (path, line.parse().ok()),
            _ => (location, None),
        },
    }
}

/// Capture every frame of the current thread's stack, innermost first
pub fn capture() -> Vec<StackFrame> {
    let backtrace = Backtrace::force_capture();
    if backtrace.status() != BacktraceStatus::Captured {
        return Vec::new();
    }
    parse_backtrace(&backtrace.to_string())
}

/// Capture the stack as seen from outside the logging system
///
/// Leading frames of the runtime and of this crate's machinery are
/// dropped; runtime frames further out are filtered as well. A closure
/// frame and the function enclosing it collapse into one entry.
pub fn capture_external() -> Vec<StackFrame> {
    external_frames(capture())
}

pub(crate) fn external_frames(frames: Vec<StackFrame>) -> Vec<StackFrame> {
    let mut frames: Vec<StackFrame> = frames
        .into_iter()
        .skip_while(|f| f.is_runtime() || f.is_internal())
        .filter(|f| !f.is_runtime())
        .collect();
    // keep the innermost position of each run
    frames.dedup_by(|outer, inner| {
        outer.file == inner.file && outer.short_function() == inner.short_function()
    });
    frames
}

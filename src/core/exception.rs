//! Exception capture
//!
//! Rust has no ambient "currently propagating exception", so the error is
//! passed in explicitly: either an `std::error::Error` value or the payload
//! of a panic caught with `std::panic::catch_unwind`. The stack is captured
//! at the point the exception info is built.

use super::log_entry::sanitize_message;
use super::stack::{self, StackFrame};
use std::any::Any;
use std::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionInfo {
    /// Short type name of the error, `panic` for caught panics
    pub type_name: String,
    pub message: String,
    /// Messages of the `source()` chain, outermost first
    pub causes: Vec<String>,
    /// Frames outside the logging system, innermost first
    pub frames: Vec<StackFrame>,
}

impl ExceptionInfo {
    pub fn new(type_name: impl AsRef<str>, message: impl AsRef<str>) -> Self {
        Self {
            type_name: sanitize_message(type_name.as_ref()),
            message: sanitize_message(message.as_ref()),
            causes: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Capture an error value together with its cause chain and the current stack
    pub fn from_error<E>(error: &E) -> Self
    where
        E: Error + ?Sized,
    {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(sanitize_message(&cause.to_string()));
            source = cause.source();
        }

        Self {
            type_name: sanitize_message(short_type_name(std::any::type_name::<E>())),
            message: sanitize_message(&error.to_string()),
            causes,
            frames: stack::capture_external(),
        }
    }

    /// Capture the payload of a caught panic and the current stack
    ///
    /// # Example
    ///
    /// ```
    /// use unified_logger::ExceptionInfo;
    ///
    /// let caught = std::panic::catch_unwind(|| {
    ///     let items: Vec<u32> = Vec::new();
    ///     items[3]
    /// });
    /// if let Err(payload) = caught {
    ///     let info = ExceptionInfo::from_panic(payload.as_ref());
    ///     assert_eq!(info.type_name, "panic");
    /// }
    /// ```
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        Self {
            type_name: "panic".to_string(),
            message: sanitize_message(&panic_message(payload)),
            causes: Vec::new(),
            frames: stack::capture_external(),
        }
    }

    #[must_use]
    pub fn with_frames(mut self, frames: Vec<StackFrame>) -> Self {
        self.frames = frames;
        self
    }
}

/// Extract the message of a panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// `app::error::ConfigError` -> `ConfigError`, `dyn core::error::Error` -> `Error`
fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full).trim();
    let base = base.strip_prefix("dyn ").unwrap_or(base);
    base.rsplit("::").next().unwrap_or(base)
}

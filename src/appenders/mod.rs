//! Log output targets

pub mod console;
pub mod file;

pub use console::ConsoleAppender;
pub use file::FileAppender;

pub use crate::core::Appender;

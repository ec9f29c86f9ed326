//! Logger metrics for observability
//!
//! Counters describing what happened to dispatched records. Write failures
//! are never surfaced to callers, so these counters are the way to notice
//! a sink that has gone bad.

use std::sync::atomic::{AtomicU64, Ordering};

/// # Example
///
/// ```
/// use unified_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_logged();
/// metrics.record_file_failure();
///
/// assert_eq!(metrics.total_logged(), 1);
/// assert_eq!(metrics.file_failures(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records dispatched
    total_logged: AtomicU64,

    /// Records written to the console
    console_written: AtomicU64,

    /// Records below the console threshold
    console_filtered: AtomicU64,

    /// Failed or panicking file writes
    file_failures: AtomicU64,

    /// Failed or panicking console writes
    console_failures: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            total_logged: AtomicU64::new(0),
            console_written: AtomicU64::new(0),
            console_filtered: AtomicU64::new(0),
            file_failures: AtomicU64::new(0),
            console_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_logged(&self) -> u64 {
        self.total_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn console_written(&self) -> u64 {
        self.console_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn console_filtered(&self) -> u64 {
        self.console_filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn file_failures(&self) -> u64 {
        self.file_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn console_failures(&self) -> u64 {
        self.console_failures.load(Ordering::Relaxed)
    }

    /// Record a dispatched entry, returning the previous count
    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.total_logged.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_console_written(&self) -> u64 {
        self.console_written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_console_filtered(&self) -> u64 {
        self.console_filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_file_failure(&self) -> u64 {
        self.file_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_console_failure(&self) -> u64 {
        self.console_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.total_logged.store(0, Ordering::Relaxed);
        self.console_written.store(0, Ordering::Relaxed);
        self.console_filtered.store(0, Ordering::Relaxed);
        self.file_failures.store(0, Ordering::Relaxed);
        self.console_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            total_logged: AtomicU64::new(self.total_logged()),
            console_written: AtomicU64::new(self.console_written()),
            console_filtered: AtomicU64::new(self.console_filtered()),
            file_failures: AtomicU64::new(self.file_failures()),
            console_failures: AtomicU64::new(self.console_failures()),
        }
    }
}

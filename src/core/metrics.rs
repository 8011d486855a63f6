//! Logger metrics for observability
//!
//! Counters for monitoring front-end health. The authoritative count of
//! messages dropped by the overrun policy lives in the queue itself; these
//! track what happened on either side of it.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use rust_async_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_submitted();
/// metrics.record_dispatched();
/// assert_eq!(metrics.submitted(), 1);
/// assert_eq!(metrics.dispatched(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Number of entries handed to the worker pool
    submitted: AtomicU64,

    /// Number of entries written out by workers
    dispatched: AtomicU64,

    /// Number of appender failures observed during dispatch or flush
    dispatch_errors: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            submitted: AtomicU64::new(0),
            dispatched: AtomicU64::new(0),
            dispatch_errors: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn submitted(&self) -> u64 {
        self.submitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dispatch_errors(&self) -> u64 {
        self.dispatch_errors.load(Ordering::Relaxed)
    }

    /// Record an entry submitted to the pool
    #[inline]
    pub fn record_submitted(&self) -> u64 {
        self.submitted.fetch_add(1, Ordering::Relaxed)
    }

    /// Record an entry successfully written by a worker
    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::Relaxed)
    }

    /// Record an appender failure
    #[inline]
    pub fn record_dispatch_error(&self) -> u64 {
        self.dispatch_errors.fetch_add(1, Ordering::Relaxed)
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.submitted.store(0, Ordering::Relaxed);
        self.dispatched.store(0, Ordering::Relaxed);
        self.dispatch_errors.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

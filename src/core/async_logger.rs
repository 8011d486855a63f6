//! Asynchronous logger front-end
//!
//! An `AsyncLogger` is the producer-facing object: it filters by level,
//! snapshots each log call into an owned entry, and hands the entry to a
//! shared worker pool. Workers call back into the logger through the
//! [`DispatchTarget`] boundary to write entries out through its appenders.
//! The appender set is guarded by the logger's own mutex, so two workers
//! handling envelopes for the same logger never interleave writes.
//!
//! The logger holds only a weak handle to the pool. Envelopes hold the
//! logger strongly and sit inside the pool's queue, so a strong handle
//! here would form a cycle and could hand the pool's final release to one
//! of its own workers. Pool ownership stays with the application.

use super::appender::Appender;
use super::error::{LoggerError, Result};
use super::log_context::LogContext;
use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use super::metrics::LoggerMetrics;
use super::overflow_policy::OverflowPolicy;
use crate::pool::{DispatchTarget, ThreadPool};
use parking_lot::{Mutex, RwLock};
use std::sync::{Arc, Weak};

pub struct AsyncLogger {
    name: String,
    min_level: RwLock<LogLevel>,
    /// Serialization lock for this front-end's destinations. Workers for
    /// different loggers run concurrently; workers writing to this logger
    /// queue up here.
    appenders: Mutex<Vec<Box<dyn Appender>>>,
    pool: Weak<ThreadPool>,
    overflow_policy: OverflowPolicy,
    metrics: LoggerMetrics,
}

impl std::fmt::Debug for AsyncLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncLogger")
            .field("name", &self.name)
            .field("min_level", &*self.min_level.read())
            .field("overflow_policy", &self.overflow_policy)
            .finish_non_exhaustive()
    }
}

impl AsyncLogger {
    /// Create a builder for `AsyncLogger`
    ///
    /// # Example
    /// ```
    /// use rust_async_logger::prelude::*;
    /// use std::sync::Arc;
    ///
    /// let pool = Arc::new(ThreadPool::new(1024, 1).unwrap());
    /// let logger = AsyncLogger::builder("app")
    ///     .min_level(LogLevel::Debug)
    ///     .pool(&pool)
    ///     .build()
    ///     .unwrap();
    /// logger.info("started");
    /// ```
    #[must_use]
    pub fn builder(name: impl Into<String>) -> AsyncLoggerBuilder {
        AsyncLoggerBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    pub fn add_appender(&self, appender: Box<dyn Appender>) {
        self.appenders.lock().push(appender);
    }

    /// The worker pool this logger submits to, if it is still alive
    pub fn pool(&self) -> Option<Arc<ThreadPool>> {
        self.pool.upgrade()
    }

    /// Front-end counters (entries submitted, dispatched, appender errors)
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Entries dropped by the pool under the overrun policy.
    ///
    /// Returns 0 once the pool has been dropped.
    pub fn overrun_counter(&self) -> u64 {
        self.pool
            .upgrade()
            .map(|pool| pool.overrun_counter())
            .unwrap_or(0)
    }

    pub fn log(self: &Arc<Self>, level: LogLevel, message: impl Into<String>) {
        if level < *self.min_level.read() {
            return;
        }
        self.submit(LogEntry::new(level, message.into()));
    }

    /// Log with structured context fields
    pub fn log_with_context(
        self: &Arc<Self>,
        level: LogLevel,
        message: impl Into<String>,
        context: LogContext,
    ) {
        if level < *self.min_level.read() {
            return;
        }
        self.submit(LogEntry::new(level, message.into()).with_context(context));
    }

    fn submit(self: &Arc<Self>, entry: LogEntry) {
        // Pool gone or stopping: there is nothing left to write to
        let Some(pool) = self.pool.upgrade() else {
            return;
        };
        let target = Arc::clone(self) as Arc<dyn DispatchTarget>;
        if pool.post_log(target, entry, self.overflow_policy).is_ok() {
            self.metrics.record_submitted();
        }
    }

    /// Request a flush of every appender, processed in queue order after
    /// the entries already submitted.
    pub fn flush(self: &Arc<Self>) {
        let Some(pool) = self.pool.upgrade() else {
            return;
        };
        let target = Arc::clone(self) as Arc<dyn DispatchTarget>;
        let _ = pool.post_flush(target, self.overflow_policy);
    }

    #[inline]
    pub fn trace(self: &Arc<Self>, message: impl Into<String>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(self: &Arc<Self>, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(self: &Arc<Self>, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(self: &Arc<Self>, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(self: &Arc<Self>, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn fatal(self: &Arc<Self>, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }
}

impl DispatchTarget for AsyncLogger {
    fn dispatch(&self, entry: &LogEntry) {
        let mut appenders = self.appenders.lock();
        let mut has_error = false;
        for (idx, appender) in appenders.iter_mut().enumerate() {
            if let Err(e) = appender.append(entry) {
                eprintln!(
                    "[LOGGER ERROR] Appender #{} ({}) failed: {}",
                    idx,
                    appender.name(),
                    e
                );
                has_error = true;
            }
        }
        if has_error {
            self.metrics.record_dispatch_error();
        }
        self.metrics.record_dispatched();
    }

    fn flush_all(&self) {
        let mut appenders = self.appenders.lock();
        for (idx, appender) in appenders.iter_mut().enumerate() {
            if let Err(e) = appender.flush() {
                eprintln!(
                    "[LOGGER ERROR] Appender #{} ({}) flush failed: {}",
                    idx,
                    appender.name(),
                    e
                );
                self.metrics.record_dispatch_error();
            }
        }
    }
}

/// Builder for constructing an `AsyncLogger` with a fluent API
///
/// # Example
/// ```
/// use rust_async_logger::prelude::*;
/// use std::sync::Arc;
///
/// let pool = Arc::new(ThreadPool::new(1024, 2).unwrap());
/// let logger = AsyncLogger::builder("api")
///     .min_level(LogLevel::Debug)
///     .pool(&pool)
///     .overflow_policy(OverflowPolicy::Overrun)
///     .build()
///     .unwrap();
/// ```
pub struct AsyncLoggerBuilder {
    name: String,
    min_level: LogLevel,
    appenders: Vec<Box<dyn Appender>>,
    pool: Option<Weak<ThreadPool>>,
    overflow_policy: OverflowPolicy,
}

impl AsyncLoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_level: LogLevel::Info,
            appenders: Vec::new(),
            pool: None,
            overflow_policy: OverflowPolicy::Block,
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Add an appender
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    /// The worker pool this logger submits to.
    ///
    /// The logger keeps only a weak handle; ownership of the pool stays
    /// with the caller, and one pool is typically shared by many loggers.
    #[must_use = "builder methods return a new value"]
    pub fn pool(mut self, pool: &Arc<ThreadPool>) -> Self {
        self.pool = Some(Arc::downgrade(pool));
        self
    }

    /// Set the overflow policy used for this logger's submissions
    #[must_use = "builder methods return a new value"]
    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow_policy = policy;
        self
    }

    /// Build the logger
    ///
    /// # Errors
    ///
    /// Fails if no worker pool was configured.
    pub fn build(self) -> Result<Arc<AsyncLogger>> {
        let pool = self
            .pool
            .ok_or_else(|| LoggerError::config("AsyncLogger", "a worker pool is required"))?;

        Ok(Arc::new(AsyncLogger {
            name: self.name,
            min_level: RwLock::new(self.min_level),
            appenders: Mutex::new(self.appenders),
            pool,
            overflow_policy: self.overflow_policy,
            metrics: LoggerMetrics::new(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKER_THREADS};

    fn test_pool() -> Arc<ThreadPool> {
        Arc::new(ThreadPool::new(DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKER_THREADS).unwrap())
    }

    #[test]
    fn test_builder_basic() {
        let pool = test_pool();
        let logger = AsyncLogger::builder("test")
            .min_level(LogLevel::Debug)
            .pool(&pool)
            .build()
            .unwrap();

        assert_eq!(logger.name(), "test");
        assert_eq!(logger.min_level(), LogLevel::Debug);
    }

    #[test]
    fn test_builder_requires_pool() {
        let err = AsyncLogger::builder("orphan").build().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_level_filter_skips_submission() {
        let pool = test_pool();
        let logger = AsyncLogger::builder("filter")
            .min_level(LogLevel::Warn)
            .pool(&pool)
            .build()
            .unwrap();

        logger.debug("below threshold");
        logger.info("still below");
        assert_eq!(logger.metrics().submitted(), 0);

        logger.error("above threshold");
        assert_eq!(logger.metrics().submitted(), 1);
    }

    #[test]
    fn test_shared_pool() {
        let pool = Arc::new(ThreadPool::new(64, 2).unwrap());
        let a = AsyncLogger::builder("a").pool(&pool).build().unwrap();
        let b = AsyncLogger::builder("b").pool(&pool).build().unwrap();

        a.info("from a");
        b.info("from b");

        assert!(Arc::ptr_eq(&a.pool().unwrap(), &b.pool().unwrap()));
    }

    #[test]
    fn test_submission_after_pool_dropped_is_ignored() {
        let pool = test_pool();
        let logger = AsyncLogger::builder("late").pool(&pool).build().unwrap();

        drop(pool);

        logger.info("into the void");
        logger.flush();
        assert_eq!(logger.metrics().submitted(), 0);
        assert!(logger.pool().is_none());
    }
}

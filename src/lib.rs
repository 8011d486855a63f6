//! # Rust Async Logger
//!
//! The asynchronous core of a structured logging system: a bounded
//! multi-producer/multi-consumer queue and a fixed worker thread pool that
//! decouple log-producing application threads from slow destination I/O.
//!
//! ## Features
//!
//! - **Bounded memory**: fixed-capacity queue, producer-chosen overflow
//!   policy (block or discard-and-count)
//! - **Clean shutdown**: one terminate message per worker, delivered on the
//!   blocking path, queued entries drained before threads exit
//! - **Lifetime safety**: every in-flight message holds a strong handle to
//!   its logger, so destinations stay alive until the write completes
//! - **Thread safe**: designed for arbitrary concurrent producers
//!
//! ## Example
//!
//! ```
//! use rust_async_logger::prelude::*;
//! use std::sync::Arc;
//!
//! let pool = Arc::new(ThreadPool::new(1024, 2).unwrap());
//! let logger = AsyncLogger::builder("app")
//!     .pool(&pool)
//!     .build()
//!     .unwrap();
//!
//! logger.info("application started");
//! logger.flush();
//! ```

pub mod appenders;
pub mod core;
pub mod macros;
pub mod pool;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::appenders::ConsoleAppender;
    #[cfg(feature = "file")]
    pub use crate::appenders::FileAppender;
    pub use crate::appenders::JsonAppender;
    pub use crate::core::{
        Appender, AsyncLogger, AsyncLoggerBuilder, FieldValue, LogContext, LogEntry, LogLevel,
        LoggerError, LoggerMetrics, OverflowPolicy, Result,
    };
    pub use crate::pool::{
        DispatchTarget, ThreadPool, ThreadStartHook, DEFAULT_QUEUE_CAPACITY,
        DEFAULT_WORKER_THREADS,
    };
}

#[cfg(feature = "console")]
pub use appenders::ConsoleAppender;
#[cfg(feature = "file")]
pub use appenders::FileAppender;
pub use appenders::JsonAppender;
pub use core::{
    Appender, AsyncLogger, AsyncLoggerBuilder, FieldValue, LogContext, LogEntry, LogLevel,
    LoggerError, LoggerMetrics, OverflowPolicy, Result,
};
pub use pool::{
    BoundedQueue, DispatchTarget, Envelope, ThreadPool, ThreadStartHook, DEFAULT_QUEUE_CAPACITY,
    DEFAULT_WORKER_THREADS, DEQUEUE_TIMEOUT, MAX_WORKER_THREADS,
};

//! Core logger types and traits

pub mod appender;
pub mod async_logger;
pub mod error;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod metrics;
pub mod overflow_policy;

pub use appender::Appender;
pub use async_logger::{AsyncLogger, AsyncLoggerBuilder};
pub use error::{LoggerError, Result};
pub use log_context::{FieldValue, LogContext};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use metrics::LoggerMetrics;
pub use overflow_policy::OverflowPolicy;

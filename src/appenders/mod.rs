//! Log output destinations
//!
//! Appenders perform the actual persistence of formatted entries. Workers
//! reach them only through a front-end's [`dispatch`] boundary, which
//! serializes access, so appenders themselves never see concurrent calls.
//!
//! [`dispatch`]: crate::pool::DispatchTarget::dispatch

#[cfg(feature = "console")]
pub mod console;
#[cfg(feature = "file")]
pub mod file;
pub mod json;

#[cfg(feature = "console")]
pub use console::ConsoleAppender;
#[cfg(feature = "file")]
pub use file::FileAppender;
pub use json::JsonAppender;

pub use crate::core::Appender;

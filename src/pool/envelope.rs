//! Message envelope moved through the async queue
//!
//! Each envelope is one unit of work for a worker thread. Log and flush
//! envelopes carry a strong handle to the front-end they belong to, so the
//! front-end outlives every in-flight message even if the application drops
//! its own handle right after submitting.

use crate::core::log_entry::LogEntry;
use std::sync::Arc;

/// The destination side of the core's boundary.
///
/// A front-end implements this to receive the entries it submitted once a
/// worker picks them up. Both methods may be called concurrently from
/// different workers; implementations serialize access to their own
/// destinations internally. The pool never constructs or destroys a
/// front-end, it only extends its lifetime through the `Arc` held by each
/// envelope.
pub trait DispatchTarget: Send + Sync {
    /// Write one entry to every destination of this front-end
    fn dispatch(&self, entry: &LogEntry);

    /// Force buffered destination output to be persisted
    fn flush_all(&self);
}

/// One unit of work for a worker thread.
///
/// Deliberately not `Clone`: an envelope is consumed by exactly one worker,
/// and duplicating it would duplicate the ownership transfer of the target
/// handle.
pub enum Envelope {
    /// Write `entry` through `target`. The entry is an owned snapshot with
    /// no borrows from the producer's stack.
    Log {
        target: Arc<dyn DispatchTarget>,
        entry: LogEntry,
    },
    /// Flush all of `target`'s destinations
    Flush { target: Arc<dyn DispatchTarget> },
    /// Tell the receiving worker to exit its drain loop
    Terminate,
}

impl Envelope {
    /// Short tag for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Envelope::Log { .. } => "log",
            Envelope::Flush { .. } => "flush",
            Envelope::Terminate => "terminate",
        }
    }
}

impl std::fmt::Debug for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Envelope::Log { entry, .. } => f
                .debug_struct("Envelope::Log")
                .field("level", &entry.level)
                .field("message", &entry.message)
                .finish_non_exhaustive(),
            Envelope::Flush { .. } => f.debug_struct("Envelope::Flush").finish_non_exhaustive(),
            Envelope::Terminate => f.write_str("Envelope::Terminate"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_level::LogLevel;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NullTarget;

    impl DispatchTarget for NullTarget {
        fn dispatch(&self, _entry: &LogEntry) {}
        fn flush_all(&self) {}
    }

    #[test]
    fn test_kind_tags() {
        let target: Arc<dyn DispatchTarget> = Arc::new(NullTarget);
        let log = Envelope::Log {
            target: Arc::clone(&target),
            entry: LogEntry::new(LogLevel::Info, "x".to_string()),
        };
        let flush = Envelope::Flush { target };
        assert_eq!(log.kind(), "log");
        assert_eq!(flush.kind(), "flush");
        assert_eq!(Envelope::Terminate.kind(), "terminate");
    }

    #[test]
    fn test_envelope_holds_strong_reference() {
        struct Counted(Arc<AtomicUsize>);
        impl DispatchTarget for Counted {
            fn dispatch(&self, _entry: &LogEntry) {}
            fn flush_all(&self) {}
        }
        impl Drop for Counted {
            fn drop(&mut self) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let drops = Arc::new(AtomicUsize::new(0));
        let target = Arc::new(Counted(Arc::clone(&drops)));
        let envelope = Envelope::Flush { target };

        // Only the envelope holds the target now; it must stay alive
        assert_eq!(drops.load(Ordering::SeqCst), 0);
        drop(envelope);
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }
}

//! Worker thread pool draining the async queue
//!
//! The pool owns the queue and a fixed set of worker threads. Producers
//! hand in envelopes through `post_log`/`post_flush`; each worker runs a
//! drain loop that pops one envelope at a time and executes it. Teardown
//! injects one terminate envelope per worker on the blocking path, then
//! joins them all, so every message queued before shutdown is still
//! written out.

use super::bounded_queue::BoundedQueue;
use super::envelope::{DispatchTarget, Envelope};
use crate::core::error::{LoggerError, Result};
use crate::core::log_entry::LogEntry;
use crate::core::overflow_policy::OverflowPolicy;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Upper bound on the worker count accepted at construction
pub const MAX_WORKER_THREADS: usize = 1000;

/// Queue capacity suggested for general use
pub const DEFAULT_QUEUE_CAPACITY: usize = 8192;

/// Worker count suggested for general use; a single worker preserves
/// global FIFO processing order
pub const DEFAULT_WORKER_THREADS: usize = 1;

/// How long a worker parks on an empty queue before waking to re-check.
///
/// The wakeup consumes no envelope; it only bounds the latency with which
/// a worker notices conditions that do not arrive through the queue.
pub const DEQUEUE_TIMEOUT: Duration = Duration::from_secs(10);

/// Hook run once by each worker thread before it enters its drain loop
pub type ThreadStartHook = Arc<dyn Fn() + Send + Sync>;

pub struct ThreadPool {
    queue: Arc<BoundedQueue<Envelope>>,
    workers: Vec<thread::JoinHandle<()>>,
    stopped: Arc<AtomicBool>,
}

impl std::fmt::Debug for ThreadPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadPool")
            .field("workers", &self.workers.len())
            .field("stopped", &self.stopped)
            .finish_non_exhaustive()
    }
}

impl ThreadPool {
    /// Create a pool with `workers_n` threads draining a queue of
    /// `queue_capacity` envelopes.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidConfiguration`] if `queue_capacity`
    /// is zero or `workers_n` is zero or above [`MAX_WORKER_THREADS`].
    pub fn new(queue_capacity: usize, workers_n: usize) -> Result<Self> {
        Self::build(queue_capacity, workers_n, None)
    }

    /// Like [`new`](Self::new), with a hook each worker runs once at
    /// startup (thread-local setup, scheduling priority, and the like).
    pub fn with_thread_start(
        queue_capacity: usize,
        workers_n: usize,
        on_thread_start: ThreadStartHook,
    ) -> Result<Self> {
        Self::build(queue_capacity, workers_n, Some(on_thread_start))
    }

    fn build(
        queue_capacity: usize,
        workers_n: usize,
        on_thread_start: Option<ThreadStartHook>,
    ) -> Result<Self> {
        if queue_capacity == 0 {
            return Err(LoggerError::config(
                "ThreadPool",
                "queue capacity must be greater than zero",
            ));
        }
        if workers_n == 0 || workers_n > MAX_WORKER_THREADS {
            return Err(LoggerError::config(
                "ThreadPool",
                format!(
                    "invalid worker count {} (valid range is 1-{})",
                    workers_n, MAX_WORKER_THREADS
                ),
            ));
        }

        let queue = Arc::new(BoundedQueue::new(queue_capacity));
        let mut workers = Vec::with_capacity(workers_n);

        for i in 0..workers_n {
            let queue = Arc::clone(&queue);
            let hook = on_thread_start.clone();
            let handle = thread::Builder::new()
                .name(format!("log-worker-{}", i))
                .spawn(move || {
                    if let Some(hook) = hook {
                        hook();
                    }
                    Self::worker_loop(&queue);
                })?;
            workers.push(handle);
        }

        Ok(Self {
            queue,
            workers,
            stopped: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Submit a log entry to be written through `target` by some worker.
    ///
    /// The entry is an owned snapshot and `target` is moved into the
    /// envelope, keeping the front-end alive until the worker is done with
    /// it. With `OverflowPolicy::Block` this call waits for queue space;
    /// with `OverflowPolicy::Overrun` it returns immediately and a full
    /// queue costs the entry.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::PoolStopped`] once shutdown has begun.
    pub fn post_log(
        &self,
        target: Arc<dyn DispatchTarget>,
        entry: LogEntry,
        policy: OverflowPolicy,
    ) -> Result<()> {
        self.post(Envelope::Log { target, entry }, policy)
    }

    /// Submit a flush request for all of `target`'s destinations.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::PoolStopped`] once shutdown has begun.
    pub fn post_flush(&self, target: Arc<dyn DispatchTarget>, policy: OverflowPolicy) -> Result<()> {
        self.post(Envelope::Flush { target }, policy)
    }

    fn post(&self, envelope: Envelope, policy: OverflowPolicy) -> Result<()> {
        if self.stopped.load(Ordering::Acquire) {
            return Err(LoggerError::PoolStopped);
        }
        match policy {
            OverflowPolicy::Block => self.queue.enqueue(envelope),
            OverflowPolicy::Overrun => self.queue.enqueue_nowait(envelope),
        }
        Ok(())
    }

    /// Current queue occupancy (diagnostic snapshot)
    pub fn queue_size(&self) -> usize {
        self.queue.len()
    }

    /// Total envelopes dropped under the overrun policy (monotonic)
    pub fn overrun_counter(&self) -> u64 {
        self.queue.overrun_counter()
    }

    /// Number of worker threads, fixed at construction
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Stop accepting submissions, drain, and join every worker.
    ///
    /// One terminate envelope per worker is enqueued on the blocking path;
    /// an overrun drop here would park a worker forever. FIFO order means
    /// each worker still processes whatever was queued ahead of its
    /// terminate envelope. Idempotent: a second call finds no workers left
    /// and returns immediately.
    pub fn shutdown(&mut self) {
        self.stopped.store(true, Ordering::Release);

        for _ in 0..self.workers.len() {
            self.queue.enqueue(Envelope::Terminate);
        }

        for handle in self.workers.drain(..) {
            if let Err(panic) = handle.join() {
                eprintln!(
                    "[LOGGER ERROR] worker thread panicked: {}",
                    panic_message(&panic)
                );
            }
        }
    }

    fn worker_loop(queue: &BoundedQueue<Envelope>) {
        while Self::process_next(queue) {}
    }

    /// Process the next envelope; returns false once this worker has
    /// consumed its terminate signal.
    fn process_next(queue: &BoundedQueue<Envelope>) -> bool {
        let Some(envelope) = queue.dequeue_for(DEQUEUE_TIMEOUT) else {
            // Timed out with nothing to do; stay alive
            return true;
        };

        let kind = envelope.kind();
        match envelope {
            Envelope::Log { target, entry } => {
                // A panicking destination must not take the worker down
                let result =
                    panic::catch_unwind(AssertUnwindSafe(|| target.dispatch(&entry)));
                if let Err(panic) = result {
                    eprintln!(
                        "[LOGGER CRITICAL] {} envelope panicked: {}. Worker continues.",
                        kind,
                        panic_message(&panic)
                    );
                }
                true
            }
            Envelope::Flush { target } => {
                let result = panic::catch_unwind(AssertUnwindSafe(|| target.flush_all()));
                if let Err(panic) = result {
                    eprintln!(
                        "[LOGGER CRITICAL] {} envelope panicked: {}. Worker continues.",
                        kind,
                        panic_message(&panic)
                    );
                }
                true
            }
            Envelope::Terminate => false,
        }
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

//! Asynchronous core: bounded queue, message envelope, worker pool

pub mod bounded_queue;
pub mod envelope;
pub mod thread_pool;

pub use bounded_queue::BoundedQueue;
pub use envelope::{DispatchTarget, Envelope};
pub use thread_pool::{
    ThreadPool, ThreadStartHook, DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKER_THREADS, DEQUEUE_TIMEOUT,
    MAX_WORKER_THREADS,
};

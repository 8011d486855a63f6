//! Bounded multi-producer/multi-consumer blocking queue
//!
//! A fixed-capacity FIFO guarded by a single mutex and two condition
//! variables: one signalled when a slot frees up, one when an item arrives.
//! Producers choose between waiting for space and dropping on the floor;
//! drops are tallied in the overrun counter. Consumers wait with a timeout
//! so they can periodically come up for air even when no traffic arrives.

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

struct Inner<T> {
    items: VecDeque<T>,
    overrun: u64,
}

pub struct BoundedQueue<T> {
    capacity: usize,
    inner: Mutex<Inner<T>>,
    /// Signalled when a pop frees a slot
    space_available: Condvar,
    /// Signalled when a push makes an item available
    item_available: Condvar,
}

impl<T> BoundedQueue<T> {
    /// Create a queue holding at most `capacity` items.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; a zero-capacity queue could never
    /// accept an item and every blocking push would park forever.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "queue capacity must be greater than zero");
        Self {
            capacity,
            inner: Mutex::new(Inner {
                items: VecDeque::with_capacity(capacity),
                overrun: 0,
            }),
            space_available: Condvar::new(),
            item_available: Condvar::new(),
        }
    }

    /// Insert at the tail, waiting for space if the queue is full.
    ///
    /// Never drops data. This is the path every terminate signal takes:
    /// losing one would park a worker forever.
    pub fn enqueue(&self, item: T) {
        let mut inner = self.inner.lock();
        while inner.items.len() >= self.capacity {
            self.space_available.wait(&mut inner);
        }
        inner.items.push_back(item);
        self.item_available.notify_one();
    }

    /// Insert at the tail, or drop `item` immediately if the queue is full.
    ///
    /// Returns without suspending. A dropped item increments the overrun
    /// counter and is destroyed here, never reaching any consumer.
    pub fn enqueue_nowait(&self, item: T) {
        let mut inner = self.inner.lock();
        if inner.items.len() >= self.capacity {
            inner.overrun += 1;
            return;
        }
        inner.items.push_back(item);
        self.item_available.notify_one();
    }

    /// Remove and return the head item, waiting up to `timeout` for one.
    ///
    /// Returns `None` on timeout. The timeout keeps consumer threads
    /// responsive: even with no traffic a worker wakes periodically instead
    /// of parking indefinitely on a wakeup that might be missed in a race.
    pub fn dequeue_for(&self, timeout: Duration) -> Option<T> {
        let deadline = Instant::now() + timeout;
        let mut inner = self.inner.lock();
        while inner.items.is_empty() {
            let now = Instant::now();
            if now >= deadline {
                return None;
            }
            // Timeout or spurious wakeup both fall through to the re-check
            let _ = self.item_available.wait_for(&mut inner, deadline - now);
        }
        let item = inner.items.pop_front();
        self.space_available.notify_one();
        item
    }

    /// Current number of queued items (snapshot)
    pub fn len(&self) -> usize {
        self.inner.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().items.is_empty()
    }

    /// Total items dropped by [`enqueue_nowait`](Self::enqueue_nowait)
    /// because the queue was full (snapshot, monotonic)
    pub fn overrun_counter(&self) -> u64 {
        self.inner.lock().overrun
    }

    /// Maximum number of items the queue can hold
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

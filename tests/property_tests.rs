//! Property-based tests for rust_async_logger using proptest

use proptest::prelude::*;
use rust_async_logger::pool::BoundedQueue;
use rust_async_logger::{LogEntry, LogLevel};
use std::collections::VecDeque;
use std::time::Duration;

// ============================================================================
// Bounded queue model checking
// ============================================================================

#[derive(Debug, Clone)]
enum QueueOp {
    Push(u32),
    Pop,
}

fn queue_ops() -> impl Strategy<Value = Vec<QueueOp>> {
    prop::collection::vec(
        prop_oneof![any::<u32>().prop_map(QueueOp::Push), Just(QueueOp::Pop)],
        0..200,
    )
}

proptest! {
    /// For any sequence of non-blocking pushes and pops, occupancy never
    /// exceeds capacity, pops come out in FIFO order, and the overrun
    /// counter equals exactly the number of rejected pushes.
    #[test]
    fn test_queue_matches_fifo_model(capacity in 1usize..16, ops in queue_ops()) {
        let queue = BoundedQueue::new(capacity);
        let mut model: VecDeque<u32> = VecDeque::new();
        let mut expected_overrun = 0u64;

        for op in ops {
            match op {
                QueueOp::Push(v) => {
                    if model.len() >= capacity {
                        expected_overrun += 1;
                    } else {
                        model.push_back(v);
                    }
                    queue.enqueue_nowait(v);
                }
                QueueOp::Pop => {
                    let expected = model.pop_front();
                    let actual = queue.dequeue_for(Duration::ZERO);
                    prop_assert_eq!(actual, expected);
                }
            }
            prop_assert!(queue.len() <= capacity);
            prop_assert_eq!(queue.len(), model.len());
            prop_assert_eq!(queue.overrun_counter(), expected_overrun);
        }

        // Drain and compare the tail
        while let Some(expected) = model.pop_front() {
            prop_assert_eq!(queue.dequeue_for(Duration::ZERO), Some(expected));
        }
        prop_assert_eq!(queue.dequeue_for(Duration::ZERO), None);
    }

    /// Blocking pushes below capacity never drop and never count overruns
    #[test]
    fn test_blocking_pushes_below_capacity_lossless(
        capacity in 1usize..32,
        count in 0usize..32,
    ) {
        let count = count.min(capacity);
        let queue = BoundedQueue::new(capacity);
        for i in 0..count {
            queue.enqueue(i);
        }
        prop_assert_eq!(queue.len(), count);
        prop_assert_eq!(queue.overrun_counter(), 0);
        for i in 0..count {
            prop_assert_eq!(queue.dequeue_for(Duration::ZERO), Some(i));
        }
    }
}

// ============================================================================
// LogLevel tests
// ============================================================================

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Trace),
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Fatal),
    ]
}

proptest! {
    /// LogLevel string conversions roundtrip correctly
    #[test]
    fn test_log_level_str_roundtrip(level in any_level()) {
        let as_str = level.to_str();
        let parsed: LogLevel = as_str.parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// LogLevel ordering is consistent with its numeric encoding
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        let val1 = level1 as u8;
        let val2 = level2 as u8;
        prop_assert_eq!(level1 <= level2, val1 <= val2);
        prop_assert_eq!(level1 < level2, val1 < val2);
    }
}

// ============================================================================
// LogEntry message sanitization (prevents log injection)
// ============================================================================

proptest! {
    /// Entries never contain raw newlines, carriage returns, or tabs
    #[test]
    fn test_message_sanitization(message in ".*") {
        let entry = LogEntry::new(LogLevel::Info, message);
        prop_assert!(!entry.message.contains('\n'));
        prop_assert!(!entry.message.contains('\r'));
        prop_assert!(!entry.message.contains('\t'));
    }
}

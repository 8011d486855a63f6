//! Overflow policies for the async logging queue
//!
//! When the queue is full, the policy chosen by the producer for that call
//! decides whether the producer waits for space or sheds the message.

use std::fmt;

/// Policy applied by a producer when the async queue is full
///
/// The choice is per submission, not per queue: the same pool can serve
/// callers that must never lose a message alongside callers that must
/// never stall.
///
/// # Example
///
/// ```
/// use rust_async_logger::OverflowPolicy;
///
/// // Default behavior: wait for space, never lose a message
/// let policy = OverflowPolicy::default();
/// assert_eq!(policy, OverflowPolicy::Block);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(Default)]
pub enum OverflowPolicy {
    /// Block until space is available
    ///
    /// Memory stays bounded and nothing is dropped, at the cost of
    /// backpressure on the calling thread.
    #[default]
    Block,

    /// Discard the new message and count it
    ///
    /// The producer never suspends. Dropped messages are tallied in the
    /// queue's overrun counter. Use this for latency-sensitive callers
    /// that prefer losing log volume over stalling.
    Overrun,
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::Block => write!(f, "Block"),
            OverflowPolicy::Overrun => write!(f, "Overrun"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_policy_default() {
        assert_eq!(OverflowPolicy::default(), OverflowPolicy::Block);
    }

    #[test]
    fn test_overflow_policy_display() {
        assert_eq!(OverflowPolicy::Block.to_string(), "Block");
        assert_eq!(OverflowPolicy::Overrun.to_string(), "Overrun");
    }
}

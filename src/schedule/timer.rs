//! Virtual-clock timer queue.

use std::time::Duration;

use super::{Continuation, Scheduler};

#[derive(Clone, Debug)]
struct Timer {
    due: Duration,
    /// Insertion order, breaks ties between equal deadlines.
    seq: u64,
    continuation: Continuation,
}

/// Deterministic scheduler on a virtual clock.
///
/// Time only moves when the owner calls [`pop_due`](Self::pop_due) or
/// [`advance_to`](Self::advance_to). Continuations with equal deadlines
/// fire in scheduling order. A continuation scheduled while another is
/// being fired is timed from that one's deadline, not from the end of the
/// advance.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_seq: u64,
    /// Sorted by `(due, seq)`.
    timers: Vec<Timer>,
}

impl TimerQueue {
    /// Create an empty queue at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Deadline of the earliest pending continuation.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.first().map(|t| t.due)
    }

    /// Number of pending continuations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Remove and return the earliest continuation due at or before `until`.
    ///
    /// The clock moves to that continuation's deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<Continuation> {
        if self.timers.first()?.due > until {
            return None;
        }
        let timer = self.timers.remove(0);
        self.now = self.now.max(timer.due);
        Some(timer.continuation)
    }

    /// Move the clock forward to `until` without firing anything.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, delay: Duration, continuation: Continuation) {
        let timer = Timer {
            due: self.now + delay,
            seq: self.next_seq,
            continuation,
        };
        self.next_seq += 1;

        let position = self
            .timers
            .partition_point(|t| (t.due, t.seq) <= (timer.due, timer.seq));
        log::trace!("timer {:?} due at {:?}", continuation, timer.due);
        self.timers.insert(position, timer);
    }

    fn cancel_all(&mut self) {
        if !self.timers.is_empty() {
            log::trace!("cancelling {} timer(s)", self.timers.len());
        }
        self.timers.clear();
    }
}

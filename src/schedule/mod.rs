//! Deferred continuations.
//!
//! The game has two suspension points: the settle pause after the second
//! flip of a turn, and the revert pause after a mismatch. Each is handed to
//! a [`Scheduler`] as a [`Continuation`] and comes back through
//! [`MatchGame::fire`](crate::game::MatchGame::fire) when due.
//!
//! ## Staleness
//!
//! Every continuation is stamped with the session generation and the turn
//! it belongs to. Starting or resetting a game cancels queued
//! continuations, and any that escape cancellation (for example one held
//! by a host-side timer) no longer match the session and are discarded
//! when fired.
//!
//! ## Example Usage
//!
//! ```
//! use std::time::Duration;
//! use paw_match::schedule::{Continuation, ContinuationKind, Scheduler, TimerQueue};
//!
//! let mut timers = TimerQueue::new();
//! let settle = Continuation::new(1, 1, ContinuationKind::Settle);
//! timers.schedule(Duration::from_millis(1000), settle);
//!
//! assert_eq!(timers.pop_due(Duration::from_millis(999)), None);
//! assert_eq!(timers.pop_due(Duration::from_millis(1000)), Some(settle));
//! ```

mod timer;

pub use timer::TimerQueue;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What a continuation does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContinuationKind {
    /// Evaluate the two pending cards.
    Settle,
    /// Turn a mismatched pair back face-down.
    Revert,
}

/// A deferred step of the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Continuation {
    /// Session that scheduled this continuation.
    pub generation: u64,
    /// Move count at scheduling time; identifies the turn.
    pub turn: u32,
    pub kind: ContinuationKind,
}

impl Continuation {
    #[must_use]
    pub const fn new(generation: u64, turn: u32, kind: ContinuationKind) -> Self {
        Self { generation, turn, kind }
    }
}

/// One-shot timer service the game schedules its continuations on.
///
/// Implementations hand due continuations back to
/// [`MatchGame::fire`](crate::game::MatchGame::fire). The built-in
/// [`TimerQueue`] runs on a virtual clock driven by
/// [`MatchGame::advance`](crate::game::MatchGame::advance).
pub trait Scheduler {
    /// Arrange for `continuation` to be fired after `delay`.
    fn schedule(&mut self, delay: Duration, continuation: Continuation);

    /// Drop every continuation not yet fired.
    fn cancel_all(&mut self);
}

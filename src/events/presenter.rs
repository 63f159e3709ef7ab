//! Presenter interface.
//!
//! The game never draws, plays sounds, or opens dialogs. It calls a
//! `Presenter`, and the presenter decides what a match or a win looks like.

use crate::cards::CardView;
use crate::core::CardId;

use super::event::GameEvent;

/// Observer of game events.
///
/// Every callback defaults to a no-op so presenters only implement what
/// they react to.
///
/// ## Timing
///
/// Callbacks run synchronously inside the game call that caused them.
/// `on_won` fires right after the final `on_matched`; any celebration
/// delay is the presenter's business.
pub trait Presenter {
    /// A fresh board was dealt (start or reset).
    fn on_board_ready(&mut self, _cards: &[CardView]) {}

    /// The second card of a turn was flipped; `move_count` is the new total.
    fn on_turn_taken(&mut self, _move_count: u32) {}

    /// The pending pair matched.
    fn on_matched(&mut self, _first: CardId, _second: CardId, _matched_count: u32) {}

    /// The pending pair did not match.
    fn on_mismatched(&mut self, _first: CardId, _second: CardId) {}

    /// A mismatched pair was turned back face-down.
    fn on_pair_reset(&mut self, _first: CardId, _second: CardId) {}

    /// All pairs found.
    fn on_won(&mut self, _move_count: u32) {}
}

/// Null presenter.
impl Presenter for () {}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn on_board_ready(&mut self, cards: &[CardView]) {
        (**self).on_board_ready(cards);
    }

    fn on_turn_taken(&mut self, move_count: u32) {
        (**self).on_turn_taken(move_count);
    }

    fn on_matched(&mut self, first: CardId, second: CardId, matched_count: u32) {
        (**self).on_matched(first, second, matched_count);
    }

    fn on_mismatched(&mut self, first: CardId, second: CardId) {
        (**self).on_mismatched(first, second);
    }

    fn on_pair_reset(&mut self, first: CardId, second: CardId) {
        (**self).on_pair_reset(first, second);
    }

    fn on_won(&mut self, move_count: u32) {
        (**self).on_won(move_count);
    }
}

/// Presenter that records every event in order.
///
/// Handy for hosts that poll instead of reacting, and for tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events received so far.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Most recent event.
    #[must_use]
    pub fn last(&self) -> Option<&GameEvent> {
        self.events.last()
    }

    /// Take the recorded events, leaving the log empty.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Event names in order, for compact assertions.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.events.iter().map(GameEvent::name).collect()
    }
}

impl Presenter for EventLog {
    fn on_board_ready(&mut self, cards: &[CardView]) {
        self.events.push(GameEvent::BoardReady { cards: cards.to_vec() });
    }

    fn on_turn_taken(&mut self, move_count: u32) {
        self.events.push(GameEvent::TurnTaken { move_count });
    }

    fn on_matched(&mut self, first: CardId, second: CardId, matched_count: u32) {
        self.events.push(GameEvent::Matched {
            first,
            second,
            matched_count,
        });
    }

    fn on_mismatched(&mut self, first: CardId, second: CardId) {
        self.events.push(GameEvent::Mismatched { first, second });
    }

    fn on_pair_reset(&mut self, first: CardId, second: CardId) {
        self.events.push(GameEvent::PairReset { first, second });
    }

    fn on_won(&mut self, move_count: u32) {
        self.events.push(GameEvent::Won { move_count });
    }
}

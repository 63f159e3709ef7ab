//! Game event types.
//!
//! Events are what the state machine tells the outside world. Each variant
//! corresponds to one [`Presenter`] callback.

use serde::{Deserialize, Serialize};

use super::presenter::Presenter;
use crate::cards::CardView;
use crate::core::CardId;

/// Something observable that happened in a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh deck was dealt. Cards are in board order.
    BoardReady { cards: Vec<CardView> },

    /// The second card of a turn was flipped.
    TurnTaken { move_count: u32 },

    /// The pending pair matched.
    Matched {
        first: CardId,
        second: CardId,
        matched_count: u32,
    },

    /// The pending pair did not match; it will be turned back shortly.
    Mismatched { first: CardId, second: CardId },

    /// A mismatched pair is face-down again and the board is unlocked.
    PairReset { first: CardId, second: CardId },

    /// Every pair has been found.
    Won { move_count: u32 },
}

impl GameEvent {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::BoardReady { .. } => "board-ready",
            GameEvent::TurnTaken { .. } => "turn-taken",
            GameEvent::Matched { .. } => "matched",
            GameEvent::Mismatched { .. } => "mismatched",
            GameEvent::PairReset { .. } => "pair-reset",
            GameEvent::Won { .. } => "won",
        }
    }

    /// Route this event to the matching presenter callback.
    pub fn dispatch<P: Presenter + ?Sized>(&self, presenter: &mut P) {
        match self {
            GameEvent::BoardReady { cards } => presenter.on_board_ready(cards),
            GameEvent::TurnTaken { move_count } => presenter.on_turn_taken(*move_count),
            GameEvent::Matched {
                first,
                second,
                matched_count,
            } => presenter.on_matched(*first, *second, *matched_count),
            GameEvent::Mismatched { first, second } => presenter.on_mismatched(*first, *second),
            GameEvent::PairReset { first, second } => presenter.on_pair_reset(*first, *second),
            GameEvent::Won { move_count } => presenter.on_won(*move_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventLog;

    #[test]
    fn test_names() {
        assert_eq!(GameEvent::TurnTaken { move_count: 1 }.name(), "turn-taken");
        assert_eq!(GameEvent::Won { move_count: 9 }.name(), "won");
        assert_eq!(
            GameEvent::PairReset { first: CardId(0), second: CardId(1) }.name(),
            "pair-reset"
        );
    }

    #[test]
    fn test_dispatch_round_trips_through_log() {
        let events = vec![
            GameEvent::TurnTaken { move_count: 3 },
            GameEvent::Matched { first: CardId(1), second: CardId(4), matched_count: 2 },
            GameEvent::Mismatched { first: CardId(0), second: CardId(2) },
            GameEvent::PairReset { first: CardId(0), second: CardId(2) },
            GameEvent::Won { move_count: 3 },
        ];

        let mut log = EventLog::new();
        for event in &events {
            event.dispatch(&mut log);
        }

        assert_eq!(log.events(), events.as_slice());
    }

    #[test]
    fn test_serialization() {
        let event = GameEvent::Matched { first: CardId(1), second: CardId(2), matched_count: 1 };
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}

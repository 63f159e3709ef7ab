//! The memory-match game.
//!
//! A board of face-down cards, dealt from a [`DeckSpec`](crate::cards::DeckSpec).
//! Each turn the player reveals two cards: equal symbols stay up as a
//! match, different symbols are shown briefly and turned back. The game
//! is won when every pair has been found; the move counter is the score.
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use paw_match::cards::DeckSpec;
//! use paw_match::core::{CardId, Unshuffled};
//! use paw_match::events::EventLog;
//! use paw_match::game::{GameStatus, MatchGameBuilder};
//!
//! let mut game = MatchGameBuilder::new()
//!     .shuffler(Unshuffled)
//!     .build(EventLog::new());
//! game.start(DeckSpec::from_pairs(["A", "B"]).unwrap());
//!
//! // Board is [A, B, A, B]
//! game.flip(CardId(0)).unwrap();
//! game.flip(CardId(2)).unwrap();
//! game.advance(Duration::from_millis(1000));
//! assert_eq!(game.matched_count(), 1);
//!
//! game.flip(CardId(1)).unwrap();
//! game.flip(CardId(3)).unwrap();
//! game.advance(Duration::from_millis(1000));
//! assert_eq!(game.status(), GameStatus::Won);
//! assert_eq!(game.move_count(), 2);
//! ```

mod engine;
mod session;

pub use engine::{FlipOutcome, IgnoreReason, MatchGame, MatchGameBuilder};
pub use session::{GameSession, GameStatus, PairOutcome, PendingFlips, SessionSnapshot, TurnPhase};

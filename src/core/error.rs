//! Error types.
//!
//! Only caller-contract violations are errors. Clicks the game chooses to
//! ignore (locked board, card already up, game over) are reported as
//! [`FlipOutcome::Ignored`](crate::game::FlipOutcome::Ignored) instead.

use thiserror::Error;

use super::entity::CardId;
use crate::cards::Symbol;

/// A deck specification that cannot form a board of pairs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    #[error("deck is empty")]
    Empty,

    #[error("deck has an odd number of cards ({0})")]
    OddSize(usize),

    #[error("symbol {symbol} appears {count} times, expected exactly 2")]
    BadCardinality { symbol: Symbol, count: usize },
}

/// Errors reported by [`MatchGame`](crate::game::MatchGame).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("invalid deck: {0}")]
    InvalidDeck(#[from] DeckError),

    #[error("{card} is not on a board of {deck_len} cards")]
    InvalidCardReference { card: CardId, deck_len: usize },

    #[error("no game has been started")]
    NotStarted,
}

pub type Result<T> = std::result::Result<T, MatchError>;

//! Cards on the board.
//!
//! A `Card` pairs a positional [`CardId`] with the [`Symbol`] it shows when
//! face-up and its current [`CardState`].

use serde::{Deserialize, Serialize};

use crate::core::CardId;

/// Identifier of a pairing group, typically an image path.
///
/// Exactly two cards per deck carry the same symbol.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl Symbol {
    /// Create a symbol from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Visibility of a card.
///
/// Transitions: `FaceDown -> FaceUp -> {FaceDown, Matched}`.
/// `Matched` is terminal until a new session is dealt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardState {
    #[default]
    FaceDown,
    FaceUp,
    Matched,
}

/// A card in the current deck.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub symbol: Symbol,
    pub state: CardState,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub fn new(id: CardId, symbol: Symbol) -> Self {
        Self {
            id,
            symbol,
            state: CardState::FaceDown,
        }
    }

    #[must_use]
    pub fn is_face_down(&self) -> bool {
        self.state == CardState::FaceDown
    }

    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.state == CardState::FaceUp
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.state == CardState::Matched
    }

    /// Whether this card forms a pair with `other`.
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.id != other.id && self.symbol == other.symbol
    }

    /// The id/symbol mapping a presenter needs to draw this card.
    #[must_use]
    pub fn view(&self) -> CardView {
        CardView {
            id: self.id,
            symbol: self.symbol.clone(),
        }
    }
}

/// Render-time description of a card, sent with `BoardReady`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardView {
    pub id: CardId,
    pub symbol: Symbol,
}

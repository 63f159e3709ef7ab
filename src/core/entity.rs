//! Card identification.
//!
//! Every card on the board has a `CardId` equal to its position in the
//! dealt deck. IDs are stable for the lifetime of a session and are
//! reassigned on every start/reset.
//!
//! ## Usage
//!
//! ```
//! use paw_match::core::CardId;
//!
//! let deck_len = 8;
//!
//! let first = CardId(0);
//! let last = CardId::new(7);
//!
//! assert!(first.is_within(deck_len));
//! assert!(last.is_within(deck_len));
//! assert!(!CardId(8).is_within(deck_len));
//! ```

use serde::{Deserialize, Serialize};

/// Positional identifier of a card within the current deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a card ID from a raw position.
    #[must_use]
    pub const fn new(position: u32) -> Self {
        Self(position)
    }

    /// Check if this ID refers to a card in a deck of `deck_len` cards.
    #[must_use]
    pub const fn is_within(self, deck_len: usize) -> bool {
        (self.0 as usize) < deck_len
    }

    /// Position of the card in the dealt deck.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CardId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

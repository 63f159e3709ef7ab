//! Cards and decks.
//!
//! - [`Symbol`]: pairing group shown on a card's face
//! - [`Card`]: a positioned card with its [`CardState`]
//! - [`DeckSpec`]: a validated multiset of symbols, dealt into cards

mod card;
mod deck;

pub use card::{Card, CardState, CardView, Symbol};
pub use deck::DeckSpec;

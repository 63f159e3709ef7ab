//! Core types: card IDs, randomness, configuration, errors.
//!
//! These are the building blocks the deck and the state machine share.

pub mod entity;
pub mod rng;
pub mod config;
pub mod error;

pub use entity::CardId;
pub use rng::{GameRng, Shuffler, Unshuffled};
pub use config::{MatchConfig, DEFAULT_REVERT_DELAY, DEFAULT_SETTLE_DELAY};
pub use error::{DeckError, MatchError, Result};

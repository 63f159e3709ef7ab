//! # paw-match
//!
//! Core of a memory-matching card game: a shuffled board of face-down
//! cards, every symbol exactly twice, two reveals per turn, matches
//! accumulate until all pairs are found.
//!
//! ## Design Principles
//!
//! 1. **Logic Only**: Rendering, sound and win celebrations belong to a
//!    [`Presenter`]. The game emits typed events and never draws.
//!
//! 2. **Explicit Time**: The settle and revert pauses are continuations
//!    handed to a [`Scheduler`], stamped with a session generation so a
//!    reset can never be undone by a late timer.
//!
//! 3. **Configuration Over Convention**: Deck contents, pacing and the
//!    layout source are configured, not hardcoded. The 4-pair and 8-pair
//!    boards are presets of one [`DeckSpec`].
//!
//! ## Modules
//!
//! - `core`: Card IDs, randomness, configuration, errors
//! - `cards`: Symbols, cards and deck specifications
//! - `events`: Game events and the presenter interface
//! - `schedule`: Continuations and the virtual-clock timer queue
//! - `game`: Session state and the `MatchGame` state machine

pub mod core;
pub mod cards;
pub mod events;
pub mod schedule;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    CardId, GameRng, Shuffler, Unshuffled,
    MatchConfig, DeckError, MatchError, Result,
};

pub use crate::cards::{Card, CardState, CardView, DeckSpec, Symbol};

pub use crate::events::{EventLog, GameEvent, Presenter};

pub use crate::schedule::{Continuation, ContinuationKind, Scheduler, TimerQueue};

pub use crate::game::{
    FlipOutcome, IgnoreReason, MatchGame, MatchGameBuilder,
    GameSession, GameStatus, PairOutcome, SessionSnapshot, TurnPhase,
};

//! Per-game state.
//!
//! ## GameSession
//!
//! Everything one dealt board needs:
//! - The deck (persistent vector, O(1) clone for snapshots)
//! - The 0–2 pending face-up cards, in flip order
//! - Move and match counters
//! - The turn phase, which doubles as the lock
//! - The generation token stamped on scheduled continuations
//!
//! A session is created fresh on every start/reset; nothing carries over.
//! It only mutates through [`MatchGame`](super::MatchGame).

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, CardState, CardView};
use crate::core::CardId;

/// Cards face-up and awaiting resolution, in flip order.
pub type PendingFlips = SmallVec<[CardId; 2]>;

/// Where the current turn stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Accepting flips (0 or 1 card pending).
    #[default]
    Open,
    /// Two cards up, waiting for the settle continuation.
    Settling,
    /// Mismatch shown, waiting for the revert continuation.
    Reverting,
}

/// Session-level lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// No board dealt yet.
    Idle,
    Playing,
    /// All pairs found; flips are ignored until reset.
    Won,
}

/// Result of evaluating a pending pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairOutcome {
    Matched { first: CardId, second: CardId },
    Mismatched { first: CardId, second: CardId },
}

/// State of one dealt board.
#[derive(Clone, Debug)]
pub struct GameSession {
    generation: u64,
    deck: Vector<Card>,
    pending: PendingFlips,
    move_count: u32,
    matched_count: u32,
    total_pairs: u32,
    phase: TurnPhase,
    won: bool,
}

impl GameSession {
    /// Start a session over freshly dealt cards.
    #[must_use]
    pub fn new(generation: u64, cards: Vec<Card>) -> Self {
        let total_pairs = (cards.len() / 2) as u32;
        Self {
            generation,
            deck: cards.into_iter().collect(),
            pending: PendingFlips::new(),
            move_count: 0,
            matched_count: 0,
            total_pairs,
            phase: TurnPhase::Open,
            won: false,
        }
    }

    // === Queries ===

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of cards on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deck.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.deck.get(id.index())
    }

    /// Cards in board order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.deck.iter()
    }

    /// Id/symbol mapping of the whole board.
    #[must_use]
    pub fn card_views(&self) -> Vec<CardView> {
        self.deck.iter().map(Card::view).collect()
    }

    #[must_use]
    pub fn pending(&self) -> &[CardId] {
        &self.pending
    }

    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    #[must_use]
    pub fn matched_count(&self) -> u32 {
        self.matched_count
    }

    #[must_use]
    pub fn total_pairs(&self) -> u32 {
        self.total_pairs
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// True while a pending pair is being resolved.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.phase != TurnPhase::Open
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.won
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        if self.won {
            GameStatus::Won
        } else {
            GameStatus::Playing
        }
    }

    /// Capture an immutable view of the session.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            generation: self.generation,
            cards: self.deck.clone(),
            pending: self.pending.clone(),
            move_count: self.move_count,
            matched_count: self.matched_count,
            total_pairs: self.total_pairs,
            status: self.status(),
            locked: self.is_locked(),
        }
    }

    // === Transitions ===
    //
    // Callers check preconditions; these only keep the counters and the
    // card states consistent with each other.

    /// Turn a face-down card up and queue it for resolution.
    ///
    /// Returns the number of pending cards afterwards.
    pub(crate) fn reveal(&mut self, id: CardId) -> usize {
        debug_assert!(self.pending.len() < 2);
        if let Some(card) = self.deck.get_mut(id.index()) {
            debug_assert_eq!(card.state, CardState::FaceDown);
            card.state = CardState::FaceUp;
            self.pending.push(id);
        }
        self.pending.len()
    }

    /// Count the move and lock the board until the pair resolves.
    ///
    /// Returns the new move count.
    pub(crate) fn begin_settle(&mut self) -> u32 {
        self.move_count += 1;
        self.phase = TurnPhase::Settling;
        self.move_count
    }

    /// Evaluate the pending pair. `None` unless the session is settling.
    ///
    /// A match is final immediately; a mismatch leaves the pair face-up
    /// and the board locked until [`revert`](Self::revert).
    pub(crate) fn settle(&mut self) -> Option<PairOutcome> {
        if self.phase != TurnPhase::Settling {
            return None;
        }
        let (first, second) = self.pending_pair()?;

        let same_symbol = match (self.card(first), self.card(second)) {
            (Some(a), Some(b)) => a.pairs_with(b),
            _ => false,
        };

        if same_symbol {
            self.set_state(first, CardState::Matched);
            self.set_state(second, CardState::Matched);
            self.matched_count += 1;
            self.pending.clear();
            self.phase = TurnPhase::Open;
            if self.matched_count == self.total_pairs {
                self.won = true;
            }
            Some(PairOutcome::Matched { first, second })
        } else {
            self.phase = TurnPhase::Reverting;
            Some(PairOutcome::Mismatched { first, second })
        }
    }

    /// Turn a mismatched pair back down and unlock. `None` unless reverting.
    pub(crate) fn revert(&mut self) -> Option<(CardId, CardId)> {
        if self.phase != TurnPhase::Reverting {
            return None;
        }
        let (first, second) = self.pending_pair()?;

        self.set_state(first, CardState::FaceDown);
        self.set_state(second, CardState::FaceDown);
        self.pending.clear();
        self.phase = TurnPhase::Open;
        Some((first, second))
    }

    fn pending_pair(&self) -> Option<(CardId, CardId)> {
        match self.pending.as_slice() {
            [first, second] => Some((*first, *second)),
            _ => None,
        }
    }

    fn set_state(&mut self, id: CardId, state: CardState) {
        if let Some(card) = self.deck.get_mut(id.index()) {
            card.state = state;
        }
    }
}

/// Read-only view of a session for presenters that redraw from state.
///
/// Not a save format: restoring sessions is out of scope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub generation: u64,
    pub cards: Vector<Card>,
    pub pending: PendingFlips,
    pub move_count: u32,
    pub matched_count: u32,
    pub total_pairs: u32,
    pub status: GameStatus,
    pub locked: bool,
}

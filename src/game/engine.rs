//! The match game state machine.
//!
//! ## Card lifecycle
//!
//! ```text
//! FaceDown --flip--> FaceUp --settle(match)----> Matched   (terminal)
//!                           --settle(mismatch)-> FaceDown  (after revert delay)
//! ```
//!
//! ## Session lifecycle
//!
//! ```text
//! Idle --start--> Playing --(all pairs matched)--> Won --reset--> Playing
//! ```
//!
//! The second flip of a turn locks the board and schedules a settle
//! continuation. A mismatch schedules a revert continuation. Nothing else
//! is deferred.

use std::time::Duration;

use crate::cards::{Card, CardState, DeckSpec, Symbol};
use crate::core::{CardId, GameRng, MatchConfig, MatchError, Result, Shuffler};
use crate::events::{GameEvent, Presenter};
use crate::schedule::{Continuation, ContinuationKind, Scheduler, TimerQueue};

use super::session::{GameSession, GameStatus, PairOutcome, SessionSnapshot};

/// Why a flip was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    /// The game is over.
    Won,
    /// A pair is being resolved.
    Locked,
    /// The card is already face-up.
    AlreadyFaceUp,
    /// The card has already been matched.
    AlreadyMatched,
}

/// Result of a [`MatchGame::flip`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlipOutcome {
    /// First card of a turn turned face-up.
    Revealed,
    /// Second card turned face-up; the pair is settling.
    TurnTaken { move_count: u32 },
    /// Nothing changed.
    Ignored(IgnoreReason),
}

impl FlipOutcome {
    /// Whether the flip changed any state.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        !matches!(self, FlipOutcome::Ignored(_))
    }
}

/// Memory-match game: deck, flip/match state machine, move counter.
///
/// Owns one [`GameSession`] at a time and reports every transition to its
/// [`Presenter`]. Deferred steps go through the [`Scheduler`] `S`.
pub struct MatchGame<P: Presenter, S: Scheduler = TimerQueue> {
    config: MatchConfig,
    presenter: P,
    scheduler: S,
    shuffler: Box<dyn Shuffler>,
    session: Option<GameSession>,
    last_spec: Option<DeckSpec>,
    generations: u64,
}

/// Builder for creating a MatchGame.
pub struct MatchGameBuilder {
    config: MatchConfig,
    shuffler: Option<Box<dyn Shuffler>>,
}

impl Default for MatchGameBuilder {
    fn default() -> Self {
        Self {
            config: MatchConfig::default(),
            shuffler: None,
        }
    }
}

impl MatchGameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.config.settle_delay = delay;
        self
    }

    pub fn revert_delay(mut self, delay: Duration) -> Self {
        self.config.revert_delay = delay;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Replace the seeded RNG with another layout source.
    pub fn shuffler(mut self, shuffler: impl Shuffler + 'static) -> Self {
        self.shuffler = Some(Box::new(shuffler));
        self
    }

    /// Build a game on the built-in virtual-clock scheduler.
    pub fn build<P: Presenter>(self, presenter: P) -> MatchGame<P, TimerQueue> {
        self.build_with_scheduler(presenter, TimerQueue::new())
    }

    /// Build a game on a host-provided scheduler.
    pub fn build_with_scheduler<P: Presenter, S: Scheduler>(
        self,
        presenter: P,
        scheduler: S,
    ) -> MatchGame<P, S> {
        let shuffler: Box<dyn Shuffler> = match self.shuffler {
            Some(shuffler) => shuffler,
            None => Box::new(GameRng::from_seed_or_entropy(self.config.seed)),
        };

        MatchGame {
            config: self.config,
            presenter,
            scheduler,
            shuffler,
            session: None,
            last_spec: None,
            generations: 0,
        }
    }
}

impl<P: Presenter> MatchGame<P, TimerQueue> {
    /// Create an idle game with the given configuration.
    pub fn new(config: MatchConfig, presenter: P) -> Self {
        MatchGameBuilder::new().config(config).build(presenter)
    }

    /// Move the virtual clock forward, firing every continuation that
    /// falls due. Returns how many continuations took effect.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let until = self.scheduler.now() + elapsed;
        let mut applied = 0;

        while let Some(continuation) = self.scheduler.pop_due(until) {
            if self.fire(continuation) {
                applied += 1;
            }
        }
        self.scheduler.advance_to(until);
        applied
    }

    /// Fire continuations until none are queued.
    pub fn run_until_idle(&mut self) -> usize {
        let mut applied = 0;
        while let Some(deadline) = self.scheduler.next_deadline() {
            let elapsed = deadline.saturating_sub(self.scheduler.now());
            applied += self.advance(elapsed);
        }
        applied
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }
}

impl<P: Presenter, S: Scheduler> MatchGame<P, S> {
    // === Lifecycle ===

    /// Deal a fresh board from `spec`, discarding any current session.
    ///
    /// Continuations still queued for the old session are cancelled; any
    /// that escape cancellation are ignored when fired.
    pub fn start(&mut self, spec: DeckSpec) {
        self.scheduler.cancel_all();
        self.generations += 1;

        let cards = spec.deal(self.shuffler.as_mut());
        let session = GameSession::new(self.generations, cards);
        let views = session.card_views();

        log::debug!(
            "session {} started: {} cards, {} pairs",
            session.generation(),
            session.len(),
            session.total_pairs()
        );

        self.session = Some(session);
        self.last_spec = Some(spec);
        self.emit(GameEvent::BoardReady { cards: views });
    }

    /// Validate `symbols` as a deck and start it.
    ///
    /// Fails with [`MatchError::InvalidDeck`] when the deck is empty, odd,
    /// or any symbol does not appear exactly twice. The current session is
    /// left untouched on failure.
    pub fn start_with_symbols<I, T>(&mut self, symbols: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<Symbol>,
    {
        let spec = DeckSpec::new(symbols)?;
        self.start(spec);
        Ok(())
    }

    /// Start again with the last deck specification.
    pub fn reset(&mut self) -> Result<()> {
        let spec = self.last_spec.clone().ok_or(MatchError::NotStarted)?;
        log::debug!("resetting session");
        self.start(spec);
        Ok(())
    }

    // === Play ===

    /// Flip a card face-up.
    ///
    /// Ignored (not an error) when the game is won, the board is locked,
    /// or the card is already face-up or matched. The second accepted flip
    /// of a turn counts a move, locks the board and schedules the settle.
    pub fn flip(&mut self, id: CardId) -> Result<FlipOutcome> {
        let session = self.session.as_mut().ok_or(MatchError::NotStarted)?;
        let card = session.card(id).ok_or(MatchError::InvalidCardReference {
            card: id,
            deck_len: session.len(),
        })?;

        let blocked = if session.is_won() {
            Some(IgnoreReason::Won)
        } else if session.is_locked() || session.pending().len() >= 2 {
            Some(IgnoreReason::Locked)
        } else {
            match card.state {
                CardState::FaceDown => None,
                CardState::FaceUp => Some(IgnoreReason::AlreadyFaceUp),
                CardState::Matched => Some(IgnoreReason::AlreadyMatched),
            }
        };
        if let Some(reason) = blocked {
            log::trace!("flip of {} ignored: {:?}", id, reason);
            return Ok(FlipOutcome::Ignored(reason));
        }

        if session.reveal(id) < 2 {
            log::trace!("{} revealed", id);
            return Ok(FlipOutcome::Revealed);
        }

        let move_count = session.begin_settle();
        let settle = Continuation::new(session.generation(), move_count, ContinuationKind::Settle);
        log::trace!("{} revealed, move {} settling", id, move_count);

        self.scheduler.schedule(self.config.settle_delay, settle);
        self.emit(GameEvent::TurnTaken { move_count });
        Ok(FlipOutcome::TurnTaken { move_count })
    }

    /// Resolve the settling pair now.
    ///
    /// Normally driven by the settle continuation. Calling it directly
    /// resolves the pair without waiting out the settle delay; the queued
    /// settle then finds nothing to do. Returns `None` when no pair is
    /// settling, so a pair never resolves twice.
    pub fn resolve_pending(&mut self) -> Option<PairOutcome> {
        let session = self.session.as_mut()?;
        let outcome = session.settle()?;
        let generation = session.generation();
        let move_count = session.move_count();
        let matched_count = session.matched_count();
        let won = session.is_won();

        match outcome {
            PairOutcome::Matched { first, second } => {
                log::debug!("{} and {} matched ({} found)", first, second, matched_count);
                self.emit(GameEvent::Matched {
                    first,
                    second,
                    matched_count,
                });
                if won {
                    log::debug!("session {} won in {} moves", generation, move_count);
                    self.emit(GameEvent::Won { move_count });
                }
            }
            PairOutcome::Mismatched { first, second } => {
                log::debug!("{} and {} mismatched", first, second);
                let revert = Continuation::new(generation, move_count, ContinuationKind::Revert);
                self.emit(GameEvent::Mismatched { first, second });
                self.scheduler.schedule(self.config.revert_delay, revert);
            }
        }

        Some(outcome)
    }

    /// Run a continuation handed back by the scheduler.
    ///
    /// Returns false, changing nothing, when the continuation belongs to an
    /// earlier session or turn, or its step has already happened.
    pub fn fire(&mut self, continuation: Continuation) -> bool {
        let current = self
            .session
            .as_ref()
            .map(|s| (s.generation(), s.move_count()));

        if current != Some((continuation.generation, continuation.turn)) {
            log::debug!("discarding stale continuation {:?}", continuation);
            return false;
        }

        match continuation.kind {
            ContinuationKind::Settle => self.resolve_pending().is_some(),
            ContinuationKind::Revert => self.revert_pending(),
        }
    }

    fn revert_pending(&mut self) -> bool {
        let Some((first, second)) = self.session.as_mut().and_then(GameSession::revert) else {
            return false;
        };
        log::trace!("{} and {} face-down again", first, second);
        self.emit(GameEvent::PairReset { first, second });
        true
    }

    fn emit(&mut self, event: GameEvent) {
        log::trace!("emit {}", event.name());
        event.dispatch(&mut self.presenter);
    }

    // === Queries ===

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.session
            .as_ref()
            .map_or(GameStatus::Idle, GameSession::status)
    }

    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.session.as_ref().map_or(0, GameSession::move_count)
    }

    #[must_use]
    pub fn matched_count(&self) -> u32 {
        self.session.as_ref().map_or(0, GameSession::matched_count)
    }

    #[must_use]
    pub fn total_pairs(&self) -> u32 {
        self.session.as_ref().map_or(0, GameSession::total_pairs)
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.session.as_ref().is_some_and(GameSession::is_locked)
    }

    /// Face-up cards awaiting resolution, in flip order.
    #[must_use]
    pub fn pending(&self) -> &[CardId] {
        match &self.session {
            Some(session) => session.pending(),
            None => &[],
        }
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.session.as_ref()?.card(id)
    }

    /// Cards in board order (empty while idle).
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.session.iter().flat_map(|session| session.cards())
    }

    #[must_use]
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.session.as_ref().map(GameSession::snapshot)
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Unshuffled;
    use crate::events::EventLog;

    const SETTLE: Duration = Duration::from_millis(1000);
    const REVERT: Duration = Duration::from_millis(1000);

    /// Unshuffled `[A, B, A, B]` board.
    fn abab_game() -> MatchGame<EventLog> {
        let mut game = MatchGameBuilder::new().shuffler(Unshuffled).build(EventLog::new());
        game.start_with_symbols(["A", "B", "A", "B"]).unwrap();
        game.presenter_mut().clear();
        game
    }

    #[test]
    fn test_idle_game() {
        let mut game = MatchGame::new(MatchConfig::default(), EventLog::new());
        assert_eq!(game.status(), GameStatus::Idle);
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.cards().count(), 0);
        assert_eq!(game.flip(CardId(0)), Err(MatchError::NotStarted));
        assert_eq!(game.reset(), Err(MatchError::NotStarted));
    }

    #[test]
    fn test_start_emits_board_ready() {
        let mut game = MatchGameBuilder::new().seed(3).build(EventLog::new());
        game.start(DeckSpec::four_pairs());

        assert_eq!(game.status(), GameStatus::Playing);
        assert_eq!(game.total_pairs(), 4);
        match game.presenter().last() {
            Some(GameEvent::BoardReady { cards }) => assert_eq!(cards.len(), 8),
            other => panic!("expected board-ready, got {other:?}"),
        }
    }

    #[test]
    fn test_start_with_invalid_symbols_keeps_session() {
        let mut game = abab_game();
        game.flip(CardId(0)).unwrap();

        let err = game.start_with_symbols(["A", "B", "A"]).unwrap_err();
        assert!(matches!(err, MatchError::InvalidDeck(_)));
        assert_eq!(game.pending(), &[CardId(0)]);
    }

    #[test]
    fn test_first_flip_reveals() {
        let mut game = abab_game();
        assert_eq!(game.flip(CardId(1)), Ok(FlipOutcome::Revealed));
        assert!(game.card(CardId(1)).unwrap().is_face_up());
        assert_eq!(game.pending(), &[CardId(1)]);
        assert!(!game.is_locked());
        assert!(game.presenter().events().is_empty());
    }

    #[test]
    fn test_second_flip_takes_turn() {
        let mut game = abab_game();
        game.flip(CardId(0)).unwrap();
        assert_eq!(game.flip(CardId(1)), Ok(FlipOutcome::TurnTaken { move_count: 1 }));

        assert!(game.is_locked());
        assert_eq!(game.move_count(), 1);
        assert_eq!(game.presenter().names(), vec!["turn-taken"]);
        assert_eq!(game.scheduler().next_deadline(), Some(SETTLE));
    }

    #[test]
    fn test_invalid_card_reference() {
        let mut game = abab_game();
        assert_eq!(
            game.flip(CardId(4)),
            Err(MatchError::InvalidCardReference { card: CardId(4), deck_len: 4 })
        );
    }

    #[test]
    fn test_settle_waits_for_delay() {
        let mut game = abab_game();
        game.flip(CardId(0)).unwrap();
        game.flip(CardId(2)).unwrap();

        assert_eq!(game.advance(SETTLE - Duration::from_millis(1)), 0);
        assert_eq!(game.matched_count(), 0);

        assert_eq!(game.advance(Duration::from_millis(1)), 1);
        assert_eq!(game.matched_count(), 1);
        assert!(!game.is_locked());
    }

    #[test]
    fn test_mismatch_reverts_after_second_delay() {
        let mut game = abab_game();
        game.flip(CardId(0)).unwrap();
        game.flip(CardId(1)).unwrap();

        game.advance(SETTLE);
        assert_eq!(game.presenter().names(), vec!["turn-taken", "mismatched"]);
        assert!(game.is_locked());
        assert!(game.card(CardId(0)).unwrap().is_face_up());

        game.advance(REVERT);
        assert_eq!(game.presenter().names(), vec!["turn-taken", "mismatched", "pair-reset"]);
        assert!(!game.is_locked());
        assert!(game.card(CardId(0)).unwrap().is_face_down());
        assert!(game.card(CardId(1)).unwrap().is_face_down());
    }

    #[test]
    fn test_advance_chains_settle_and_revert() {
        let mut game = abab_game();
        game.flip(CardId(0)).unwrap();
        game.flip(CardId(1)).unwrap();

        assert_eq!(game.advance(SETTLE + REVERT), 2);
        assert!(game.pending().is_empty());
    }

    #[test]
    fn test_resolve_pending_is_idempotent() {
        let mut game = abab_game();
        game.flip(CardId(0)).unwrap();
        game.flip(CardId(2)).unwrap();

        assert!(game.resolve_pending().is_some());
        assert!(game.resolve_pending().is_none());

        // The queued settle finds nothing left to do
        assert_eq!(game.run_until_idle(), 0);
        assert_eq!(game.matched_count(), 1);
        assert_eq!(game.presenter().names(), vec!["turn-taken", "matched"]);
    }

    #[test]
    fn test_resolve_pending_skips_settle_delay() {
        let mut game = abab_game();
        game.flip(CardId(0)).unwrap();
        game.flip(CardId(1)).unwrap();

        assert_eq!(
            game.resolve_pending(),
            Some(PairOutcome::Mismatched { first: CardId(0), second: CardId(1) })
        );
        assert_eq!(game.now(), Duration::ZERO);
        assert_eq!(game.presenter().last(), Some(&GameEvent::Mismatched { first: CardId(0), second: CardId(1) }));

        // Revert still waits for its own delay; the queued settle is a no-op
        assert!(game.is_locked());
        assert_eq!(game.advance(REVERT - Duration::from_millis(1)), 0);
        assert!(game.is_locked());
        assert_eq!(game.run_until_idle(), 1);
        assert!(!game.is_locked());
        assert_eq!(game.presenter().names(), vec!["turn-taken", "mismatched", "pair-reset"]);
    }

    #[test]
    fn test_early_settle_cannot_resolve_next_turn() {
        let mut game = abab_game();
        game.flip(CardId(0)).unwrap();
        game.flip(CardId(2)).unwrap();
        game.resolve_pending();

        // Next turn starts before the first settle timer is due
        game.flip(CardId(1)).unwrap();
        game.flip(CardId(3)).unwrap();

        // Only the second turn's own timer resolves it
        let stale = game.scheduler_mut().pop_due(SETTLE);
        assert!(stale.is_some());
        assert!(!game.fire(stale.unwrap()));
        assert!(game.is_locked());

        assert_eq!(game.run_until_idle(), 1);
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn test_won_emitted_after_final_match() {
        let mut game = abab_game();
        for (a, b) in [(0, 2), (1, 3)] {
            game.flip(CardId(a)).unwrap();
            game.flip(CardId(b)).unwrap();
            game.run_until_idle();
        }

        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(
            game.presenter().names(),
            vec!["turn-taken", "matched", "turn-taken", "matched", "won"]
        );
        assert_eq!(game.presenter().last(), Some(&GameEvent::Won { move_count: 2 }));
    }

    #[test]
    fn test_reset_reuses_deck() {
        let mut game = abab_game();
        game.flip(CardId(0)).unwrap();
        game.flip(CardId(2)).unwrap();
        game.run_until_idle();

        game.reset().unwrap();

        assert_eq!(game.move_count(), 0);
        assert_eq!(game.matched_count(), 0);
        assert_eq!(game.total_pairs(), 2);
        assert!(game.cards().all(Card::is_face_down));
        assert_eq!(game.presenter().last().map(GameEvent::name), Some("board-ready"));
    }

    #[test]
    fn test_reset_cancels_queued_timers() {
        let mut game = abab_game();
        game.flip(CardId(0)).unwrap();
        game.flip(CardId(1)).unwrap();

        game.reset().unwrap();

        assert!(game.scheduler().is_empty());
        assert_eq!(game.run_until_idle(), 0);
        assert!(!game.is_locked());
    }

    #[test]
    fn test_generation_increases() {
        let mut game = abab_game();
        let first = game.session().unwrap().generation();
        game.reset().unwrap();
        assert!(game.session().unwrap().generation() > first);
    }

    #[test]
    fn test_zero_delays() {
        let mut game = MatchGameBuilder::new()
            .shuffler(Unshuffled)
            .settle_delay(Duration::ZERO)
            .revert_delay(Duration::ZERO)
            .build(EventLog::new());
        game.start_with_symbols(["A", "B", "A", "B"]).unwrap();

        game.flip(CardId(0)).unwrap();
        game.flip(CardId(1)).unwrap();
        assert_eq!(game.advance(Duration::ZERO), 2);
        assert!(!game.is_locked());
    }

    #[test]
    fn test_flip_outcome_is_accepted() {
        assert!(FlipOutcome::Revealed.is_accepted());
        assert!(FlipOutcome::TurnTaken { move_count: 1 }.is_accepted());
        assert!(!FlipOutcome::Ignored(IgnoreReason::Locked).is_accepted());
    }
}

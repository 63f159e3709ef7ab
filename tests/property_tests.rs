//! Property tests for dealing and the flip state machine.
//!
//! Random decks and random click sequences must never break the board
//! invariants, whatever order the player clicks in.

use std::time::Duration;

use proptest::prelude::*;
use rustc_hash::FxHashMap;

use paw_match::cards::{CardState, DeckSpec};
use paw_match::core::{CardId, DeckError, GameRng};
use paw_match::events::EventLog;
use paw_match::game::{FlipOutcome, GameStatus, MatchGame, MatchGameBuilder};

/// Player input: a click on a card, or time passing.
#[derive(Clone, Debug)]
enum Input {
    Flip(u32),
    Wait(u64),
}

fn inputs(deck_len: u32) -> impl Strategy<Value = Vec<Input>> {
    let input = prop_oneof![
        3 => (0..deck_len).prop_map(Input::Flip),
        1 => (0u64..2500).prop_map(Input::Wait),
    ];
    prop::collection::vec(input, 0..200)
}

fn new_game(pairs: usize, seed: u64) -> MatchGame<EventLog> {
    let symbols: Vec<String> = (0..pairs).map(|i| format!("s{i}")).collect();
    let mut game = MatchGameBuilder::new().seed(seed).build(EventLog::new());
    game.start(DeckSpec::from_pairs(symbols).unwrap());
    game
}

fn check_invariants(game: &MatchGame<EventLog>) {
    let face_up: Vec<CardId> = game
        .cards()
        .filter(|c| c.state == CardState::FaceUp)
        .map(|c| c.id)
        .collect();
    let matched = game.cards().filter(|c| c.is_matched()).count() as u32;

    assert!(face_up.len() <= 2, "too many face-up cards: {face_up:?}");
    assert_eq!(face_up, {
        let mut pending = game.pending().to_vec();
        pending.sort();
        pending
    });
    assert_eq!(matched, game.matched_count() * 2);
    assert!(game.matched_count() <= game.total_pairs());
    assert_eq!(
        game.status() == GameStatus::Won,
        game.matched_count() == game.total_pairs()
    );
    if game.pending().len() == 2 {
        assert!(game.is_locked());
    }
}

proptest! {
    #[test]
    fn prop_deal_has_every_symbol_twice(pairs in 1usize..20, seed in any::<u64>()) {
        let symbols: Vec<String> = (0..pairs).map(|i| format!("img{i}")).collect();
        let spec = DeckSpec::from_pairs(symbols).unwrap();
        let cards = spec.deal(&mut GameRng::new(seed));

        prop_assert_eq!(cards.len() % 2, 0);
        prop_assert_eq!(cards.len(), pairs * 2);

        let mut counts: FxHashMap<String, usize> = FxHashMap::default();
        for (position, card) in cards.iter().enumerate() {
            prop_assert_eq!(card.id, CardId(position as u32));
            prop_assert_eq!(card.state, CardState::FaceDown);
            *counts.entry(card.symbol.to_string()).or_insert(0) += 1;
        }
        prop_assert_eq!(counts.len(), pairs);
        prop_assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn prop_odd_decks_rejected(
        symbols in (0usize..8).prop_flat_map(|n| prop::collection::vec("[a-d]", 2 * n + 1))
    ) {
        let len = symbols.len();
        prop_assert_eq!(DeckSpec::new(symbols), Err(DeckError::OddSize(len)));
    }

    #[test]
    fn prop_random_play_keeps_invariants(
        seed in any::<u64>(),
        script in inputs(8),
    ) {
        let mut game = new_game(4, seed);

        for input in script {
            match input {
                Input::Flip(id) => {
                    let moves_before = game.move_count();
                    let pending_before = game.pending().len();
                    let outcome = game.flip(CardId(id)).unwrap();

                    match outcome {
                        FlipOutcome::Revealed => {
                            prop_assert_eq!(pending_before, 0);
                            prop_assert_eq!(game.move_count(), moves_before);
                        }
                        FlipOutcome::TurnTaken { move_count } => {
                            prop_assert_eq!(pending_before, 1);
                            prop_assert_eq!(move_count, moves_before + 1);
                            prop_assert!(game.is_locked());
                        }
                        FlipOutcome::Ignored(_) => {
                            prop_assert_eq!(game.move_count(), moves_before);
                            prop_assert_eq!(game.pending().len(), pending_before);
                        }
                    }
                }
                Input::Wait(ms) => {
                    game.advance(Duration::from_millis(ms));
                }
            }
            check_invariants(&game);
        }
    }

    #[test]
    fn prop_each_pair_resolves_once(seed in any::<u64>(), script in inputs(8)) {
        let mut game = new_game(4, seed);

        for input in script {
            match input {
                Input::Flip(id) => {
                    game.flip(CardId(id)).unwrap();
                }
                Input::Wait(ms) => {
                    game.advance(Duration::from_millis(ms));
                }
            }
        }
        game.run_until_idle();

        let names = game.presenter().names();
        let turns = names.iter().filter(|n| **n == "turn-taken").count();
        let matched = names.iter().filter(|n| **n == "matched").count();
        let mismatched = names.iter().filter(|n| **n == "mismatched").count();
        let resets = names.iter().filter(|n| **n == "pair-reset").count();

        // Once all timers have run, every turn resolved exactly once
        prop_assert_eq!(turns, matched + mismatched);
        prop_assert_eq!(mismatched, resets);
        prop_assert_eq!(turns as u32, game.move_count());
        prop_assert!(!game.is_locked());
    }
}

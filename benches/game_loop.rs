//! Benchmarks for dealing and for a complete scripted game.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use paw_match::cards::DeckSpec;
use paw_match::core::GameRng;
use paw_match::game::MatchGameBuilder;

fn deal_eight_pairs(c: &mut Criterion) {
    let spec = DeckSpec::eight_pairs();
    let mut rng = GameRng::new(42);

    c.bench_function("deal_eight_pairs", |b| {
        b.iter(|| black_box(spec.deal(&mut rng)))
    });
}

fn perfect_game(c: &mut Criterion) {
    c.bench_function("perfect_game_eight_pairs", |b| {
        b.iter(|| {
            let mut game = MatchGameBuilder::new()
                .seed(7)
                .settle_delay(Duration::ZERO)
                .revert_delay(Duration::ZERO)
                .build(());
            game.start(DeckSpec::eight_pairs());

            let cards: Vec<_> = game.cards().cloned().collect();
            for card in &cards {
                if !game.card(card.id).is_some_and(|c| c.is_face_down()) {
                    continue;
                }
                if let Some(partner) = cards.iter().find(|other| card.pairs_with(other)) {
                    game.flip(card.id).unwrap();
                    game.flip(partner.id).unwrap();
                    game.advance(Duration::ZERO);
                }
            }
            black_box(game.move_count())
        })
    });
}

criterion_group!(benches, deal_eight_pairs, perfect_game);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use dominion_engine::{AutoInteraction, DominionSet, Game, GameBuilder, GameConfig};

fn new_game(seed: u64, players: usize, simultaneous: bool) -> Game {
    let config = GameConfig::new(seed)
        .with_simultaneous_reactions(simultaneous)
        .with_max_turns(200)
        .with_log_retention(200);
    let mut builder = GameBuilder::new(config);
    for seat in 0..players {
        builder = builder.player(format!("Bot {seat}"), AutoInteraction::new());
    }
    builder.expansion(DominionSet).build().unwrap()
}

fn bench_setup(c: &mut Criterion) {
    c.bench_function("build_game_4p", |b| b.iter(|| new_game(black_box(7), 4, false)));
}

fn bench_full_game(c: &mut Criterion) {
    let mut group = c.benchmark_group("auto_game");
    for players in [2, 4] {
        group.bench_function(format!("{players}p_sequential"), |b| {
            b.iter_batched(
                || new_game(11, players, false),
                |mut game| black_box(game.run().unwrap()),
                BatchSize::SmallInput,
            )
        });
    }
    group.bench_function("4p_simultaneous", |b| {
        b.iter_batched(
            || new_game(11, 4, true),
            |mut game| black_box(game.run().unwrap()),
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_setup, bench_full_game);
criterion_main!(benches);

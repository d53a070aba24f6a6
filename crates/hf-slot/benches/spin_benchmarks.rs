//! Spin Benchmarks
//!
//! Payline evaluation, full base spins and complete respin rounds.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hf_slot::{Bet, Grid, RespinFeature, SlotEngine, Symbol};
use rand::SeedableRng;
use rand::rngs::StdRng;

const BATCH_SIZES: &[usize] = &[1, 100, 1_000];

fn bench_evaluate(c: &mut Criterion) {
    let engine = SlotEngine::three_pigs();
    let mut rng = StdRng::seed_from_u64(42);
    let grids: Vec<Grid> = (0..1_000)
        .map(|_| engine.grid_from_stops(&engine.config().reels.draw_stops(&mut rng)))
        .collect();

    let mut group = c.benchmark_group("evaluate_paylines");
    group.throughput(Throughput::Elements(grids.len() as u64));
    group.bench_function("random_grids", |b| {
        b.iter(|| {
            let total: u64 = grids
                .iter()
                .map(|grid| engine.evaluate(black_box(grid)).total_multiplier)
                .sum();
            black_box(total)
        })
    });

    let wild_grid = Grid::filled(Symbol::Wild).with(2, 1, Symbol::P3);
    group.bench_function("wild_heavy_grid", |b| {
        b.iter(|| black_box(engine.evaluate(black_box(&wild_grid))))
    });
    group.finish();
}

fn bench_spin(c: &mut Criterion) {
    let engine = SlotEngine::three_pigs();
    let bet = Bet::new(1).unwrap();
    let mut group = c.benchmark_group("base_spin");

    for &size in BATCH_SIZES {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| {
                let mut won = 0u64;
                for _ in 0..size {
                    won += engine.spin(bet, &mut rng).total_win;
                }
                black_box(won)
            })
        });
    }

    group.finish();
}

fn bench_respin_round(c: &mut Criterion) {
    let engine = SlotEngine::three_pigs();
    let bet = Bet::new(1).unwrap();
    let mut cells = [Symbol::Ace; 15];
    for cell in [0, 4, 7, 8, 11, 13] {
        cells[cell] = Symbol::Hold;
    }
    let grid = Grid::from_cells(cells);

    c.bench_function("respin_round", |b| {
        let mut rng = StdRng::seed_from_u64(99);
        b.iter(|| {
            let mut feature =
                RespinFeature::start(&grid, bet, engine.config().respin.initial_respins);
            while !feature.is_resolved() {
                engine
                    .advance(&mut feature, &mut rng)
                    .expect("round not resolved");
            }
            black_box(feature.total_win())
        })
    });
}

criterion_group!(benches, bench_evaluate, bench_spin, bench_respin_round);

criterion_main!(benches);

//! Benchmarks for the layout engine.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use flagstack::board::{build_board, build_piles, BoardConfig};
use flagstack::countries::all_codes;
use flagstack::layouts::Preset;
use flagstack::mask::flatten_masks;
use flagstack::settle::{resolve_in_layer_overlaps, snap_down};
use flagstack::transform::{self, TransformConfig};
use flagstack::{assign, TileMetrics};

/// Benchmark a full mahjong board build from seed to assigned slots.
fn bench_build_board(c: &mut Criterion) {
    let config = BoardConfig {
        preset: Some(Preset::Turtle),
        ..BoardConfig::default()
    };
    c.bench_function("build_board", |b| b.iter(|| build_board(black_box(&config))));
}

/// Benchmark the procedural turtle, which synthesizes its masks per seed.
fn bench_build_procedural(c: &mut Criterion) {
    let config = BoardConfig {
        preset: Some(Preset::Procedural),
        ..BoardConfig::default()
    };
    c.bench_function("build_procedural", |b| {
        b.iter(|| build_board(black_box(&config)))
    });
}

/// Benchmark the transform pipeline alone.
fn bench_transform(c: &mut Criterion) {
    let metrics = TileMetrics::default();
    let positions = flatten_masks(&Preset::Turtle.masks(98597), &metrics);
    let config = TransformConfig::default();
    c.bench_function("transform_pipeline", |b| {
        b.iter(|| transform::apply(black_box(positions.clone()), &config, 98597, &metrics))
    });
}

/// Benchmark settling and overlap resolution on a legalized board.
fn bench_settle(c: &mut Criterion) {
    let metrics = TileMetrics::default();
    let positions = transform::apply(
        flatten_masks(&Preset::Turtle.masks(98597), &metrics),
        &TransformConfig::default(),
        98597,
        &metrics,
    );
    c.bench_function("snap_down", |b| {
        b.iter(|| snap_down(black_box(&positions), &metrics))
    });
    c.bench_function("resolve_overlaps", |b| {
        b.iter(|| {
            let mut p = positions.clone();
            resolve_in_layer_overlaps(black_box(&mut p), &metrics);
        })
    });
}

/// Benchmark the solvable pair assignment on the canonical turtle.
fn bench_assignment(c: &mut Criterion) {
    let metrics = TileMetrics::default();
    let positions = transform::apply(
        flatten_masks(&Preset::Turtle.masks(98597), &metrics),
        &TransformConfig::default(),
        98597,
        &metrics,
    );
    let alphabet = all_codes();
    c.bench_function("solvable_assignment", |b| {
        b.iter(|| {
            let mut diagnostics = Vec::new();
            assign::build_solvable_assignment(
                black_box(&positions),
                &alphabet,
                98597,
                &metrics,
                &mut diagnostics,
            )
        })
    });
}

/// Benchmark the piles build, pool shuffle included.
fn bench_build_piles(c: &mut Criterion) {
    let config = BoardConfig::default();
    c.bench_function("build_piles", |b| b.iter(|| build_piles(black_box(&config))));
}

criterion_group!(
    benches,
    bench_build_board,
    bench_build_procedural,
    bench_transform,
    bench_settle,
    bench_assignment,
    bench_build_piles
);
criterion_main!(benches);

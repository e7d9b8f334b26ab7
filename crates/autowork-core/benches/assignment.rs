//! Criterion benchmarks for the priority pass.
//!
//! Colonies are generated from a fixed seed. `priority_pass` measures a
//! warm pass with rules and snapshots already cached; `cold_update` adds
//! generation, rule resolution and the schedule pass.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use autowork_core::generation::{generate_colony, ColonyConfig};
use autowork_core::prelude::*;
use autowork_core::systems::run_priority_pass;

fn config(colonists: u32) -> ColonyConfig {
    ColonyConfig {
        seed: 42,
        colonists,
        partner_pairs: colonists / 4,
        ..ColonyConfig::default()
    }
}

fn bench_priority_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("priority_pass");
    group.sample_size(20);

    for colonists in [10u32, 30, 60] {
        let mut colony = generate_colony(&config(colonists));
        let mut ctx = EngineContext::new(Settings::default());
        group.bench_with_input(BenchmarkId::from_parameter(colonists), &colonists, |b, _| {
            b.iter(|| {
                let report = run_priority_pass(black_box(&mut ctx), &mut colony);
                black_box(report)
            })
        });
    }
    group.finish();
}

fn bench_cold_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("cold_update");
    group.sample_size(10);

    for colonists in [10u32, 30, 60] {
        group.bench_with_input(BenchmarkId::from_parameter(colonists), &colonists, |b, &n| {
            b.iter(|| {
                let mut colony = generate_colony(&config(n));
                let mut engine = WorkEngine::new(Settings::default());
                black_box(engine.force_update(&mut colony))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_priority_pass, bench_cold_update);
criterion_main!(benches);

//! Criterion benchmarks for revrank-wilson.
//!
//! Covers: single Wilson bound evaluation, z resolution, and full table ranking.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use revrank_core::traits::HelpfulnessRanker;
use revrank_core::types::{Confidence, Review, ReviewTable};
use revrank_wilson::{wilson_lower_bound_with_z, z_score, RankingEngine};

fn sample_table(n: usize) -> ReviewTable {
    let mut rng = StdRng::seed_from_u64(11);
    (0..n)
        .map(|_| {
            let total: i64 = rng.gen_range(0..=2_000);
            let yes = rng.gen_range(0..=total);
            Review::new(rng.gen_range(1..=5) as f64, rng.gen_range(0..=1100), yes, total)
        })
        .collect()
}

fn bench_wilson(c: &mut Criterion) {
    c.bench_function("wilson_lower_bound", |b| {
        b.iter(|| wilson_lower_bound_with_z(black_box(95), black_box(5), black_box(1.96)))
    });
}

fn bench_z_score(c: &mut Criterion) {
    c.bench_function("z_score", |b| {
        b.iter(|| z_score(black_box(Confidence::default())))
    });
}

fn bench_rank(c: &mut Criterion) {
    let table = sample_table(5_000);
    let engine = RankingEngine::new(Confidence::default()).unwrap();

    c.bench_function("rank_and_select_top20", |b| {
        b.iter(|| engine.rank_and_select(black_box(&table), 20))
    });
}

criterion_group!(benches, bench_wilson, bench_z_score, bench_rank);
criterion_main!(benches);

//! Criterion benchmarks for revrank-decay.
//!
//! Covers: bucket breakdown and the weighted average over a product-sized table.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use revrank_core::traits::RatingAggregator;
use revrank_core::types::{BucketWeights, EmptyBucketPolicy, Review, ReviewTable};
use revrank_decay::{bucket_breakdown, TimeDecayAggregator};

/// Deterministic table roughly the size of a single product's review set.
fn sample_table(n: usize) -> ReviewTable {
    let mut rng = StdRng::seed_from_u64(7);
    (0..n)
        .map(|_| Review::new(rng.gen_range(1..=5) as f64, rng.gen_range(0..=1100), 0, 0))
        .collect()
}

fn bench_breakdown(c: &mut Criterion) {
    let table = sample_table(5_000);
    let weights = BucketWeights::default();

    c.bench_function("bucket_breakdown", |b| {
        b.iter(|| bucket_breakdown(black_box(&table), &weights, EmptyBucketPolicy::Zero))
    });
}

fn bench_weighted_average(c: &mut Criterion) {
    let table = sample_table(5_000);
    let agg = TimeDecayAggregator::default();

    c.bench_function("weighted_average", |b| {
        b.iter(|| agg.weighted_average(black_box(&table)))
    });
}

criterion_group!(benches, bench_breakdown, bench_weighted_average);
criterion_main!(benches);

//! Criterion benchmarks for covenant-index.
//!
//! Targets:
//! - search over 1K chunks (256 dims) < 1ms
//! - search over 10K chunks (256 dims) < 10ms

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use covenant_core::models::Metadata;
use covenant_index::VectorIndex;

const DIMS: usize = 256;

fn pseudo_vector(seed: usize) -> Vec<f32> {
    (0..DIMS)
        .map(|i| (((seed * 31 + i * 17) % 97) as f32 / 97.0) - 0.5)
        .collect()
}

fn build_index(n: usize) -> VectorIndex {
    let index = VectorIndex::new();
    index
        .add(
            (0..n).map(|i| format!("chunk {i}")).collect(),
            (0..n).map(pseudo_vector).collect(),
            vec![Metadata::new(); n],
        )
        .unwrap();
    index
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("vector_index_search");
    for n in [1_000, 10_000] {
        let index = build_index(n);
        let query = pseudo_vector(7);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| index.search(black_box(&query), 3).unwrap())
        });
    }
    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let index = build_index(1_000);
    c.bench_function("vector_index_snapshot_1k", |b| {
        b.iter(|| index.snapshot().unwrap())
    });
}

criterion_group!(benches, bench_search, bench_snapshot);
criterion_main!(benches);

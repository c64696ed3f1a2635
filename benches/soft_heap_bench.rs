//! Soft heap throughput benchmarks
//!
//! Measures insert-then-drain, melding and selection across error
//! parameters. Inputs come from a seeded PRNG so runs are reproducible.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_soft_heap::selection::{approximate_sort, select};
use rust_soft_heap::soft_heap::SoftHeap;

const EPSILONS: [f64; 4] = [1e-3, 0.01, 0.1, 0.5];

fn random_keys(n: usize, seed: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen()).collect()
}

/// Insert n keys, then extract all of them
fn benchmark_insert_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_drain");
    let keys = random_keys(100_000, 1);

    for &eps in &EPSILONS {
        group.bench_with_input(BenchmarkId::new("epsilon", eps), &keys, |b, keys| {
            b.iter(|| {
                let mut heap = SoftHeap::with_error_parameter(eps).unwrap();
                for &key in keys {
                    heap.insert(key, ());
                }
                let mut checksum = 0u64;
                while let Some((key, ())) = heap.extract_min() {
                    checksum = checksum.wrapping_add(key);
                }
                black_box(checksum)
            })
        });
    }

    group.finish();
}

/// Inserts alone, which should stay O(1) amortized
fn benchmark_insert_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_only");

    for &n in &[1_000usize, 10_000, 100_000] {
        let keys = random_keys(n, 2);
        group.bench_with_input(BenchmarkId::new("n", n), &keys, |b, keys| {
            b.iter(|| {
                let mut heap = SoftHeap::with_error_parameter(0.1).unwrap();
                for &key in keys {
                    heap.insert(key, ());
                }
                black_box(heap.len())
            })
        });
    }

    group.finish();
}

/// Repeatedly meld small heaps into a growing one
fn benchmark_meld(c: &mut Criterion) {
    let mut group = c.benchmark_group("meld");
    let keys = random_keys(64_000, 3);

    for &eps in &EPSILONS {
        group.bench_with_input(BenchmarkId::new("epsilon", eps), &keys, |b, keys| {
            b.iter(|| {
                let mut heap = SoftHeap::with_error_parameter(eps).unwrap();
                for chunk in keys.chunks(64) {
                    let mut part = SoftHeap::with_error_parameter(eps).unwrap();
                    for &key in chunk {
                        part.insert(key, ());
                    }
                    heap.meld(part);
                }
                black_box(heap.rank())
            })
        });
    }

    group.finish();
}

/// Approximate sorting against the standard library sort
fn benchmark_sorting(c: &mut Criterion) {
    let mut group = c.benchmark_group("sorting");
    group.sample_size(20);
    let keys = random_keys(50_000, 4);

    group.bench_function("std_sort_unstable", |b| {
        b.iter(|| {
            let mut sorted = keys.clone();
            sorted.sort_unstable();
            black_box(sorted)
        })
    });
    for &eps in &[0.01, 0.1, 0.3] {
        group.bench_with_input(BenchmarkId::new("soft_heap", eps), &keys, |b, keys| {
            b.iter(|| black_box(approximate_sort(keys.iter().copied(), eps).unwrap()))
        });
    }

    group.finish();
}

/// Median selection
fn benchmark_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_median");
    group.sample_size(20);

    for &n in &[1_000usize, 10_000, 100_000] {
        let keys = random_keys(n, 5);
        group.bench_with_input(BenchmarkId::new("n", n), &keys, |b, keys| {
            b.iter(|| black_box(select(keys, keys.len() / 2).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_insert_drain,
    benchmark_insert_only,
    benchmark_meld,
    benchmark_sorting,
    benchmark_select,
);

criterion_main!(benches);

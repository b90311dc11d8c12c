//! Benchmark for RandomBst vs standard BTreeMap.
//!
//! Compares put, get, remove and extreme lookups of the randomized tree
//! against Rust's standard BTreeMap, for both ascending and shuffled keys.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use randbst::RandomBst;
use std::collections::BTreeMap;
use std::hint::black_box;

const SIZES: [i64; 3] = [100, 1000, 10000];

fn shuffled(size: i64) -> Vec<i64> {
    let mut keys: Vec<i64> = (0..size).collect();
    keys.shuffle(&mut StdRng::seed_from_u64(size.unsigned_abs()));
    keys
}

fn build(keys: &[i64]) -> RandomBst<i64, i64> {
    let mut tree = RandomBst::with_seed(1);
    for &key in keys {
        tree.put(key, key * 2);
    }
    tree
}

// =============================================================================
// put Benchmark
// =============================================================================

fn benchmark_put(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("put");

    for size in SIZES {
        let keys = shuffled(size);

        // Ascending keys are the worst case for an unbalanced BST
        group.bench_with_input(
            BenchmarkId::new("RandomBst/ascending", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut tree = RandomBst::with_seed(1);
                    for key in 0..size {
                        tree.put(black_box(key), black_box(key * 2));
                    }
                    black_box(tree)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("RandomBst/shuffled", size),
            &keys,
            |bencher, keys| {
                bencher.iter(|| black_box(build(black_box(keys))));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("BTreeMap/shuffled", size),
            &keys,
            |bencher, keys| {
                bencher.iter(|| {
                    let mut map = BTreeMap::new();
                    for &key in keys {
                        map.insert(black_box(key), black_box(key * 2));
                    }
                    black_box(map)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// get Benchmark
// =============================================================================

fn benchmark_get(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("get");

    for size in SIZES {
        let keys = shuffled(size);
        let tree = build(&keys);
        let standard_map: BTreeMap<i64, i64> = keys.iter().map(|&key| (key, key * 2)).collect();

        group.bench_with_input(BenchmarkId::new("RandomBst", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut sum = 0;
                for key in 0..size {
                    if let Some(&value) = tree.get(&black_box(key)) {
                        sum += value;
                    }
                }
                black_box(sum)
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut sum = 0;
                for key in 0..size {
                    if let Some(&value) = standard_map.get(&black_box(key)) {
                        sum += value;
                    }
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

// =============================================================================
// remove Benchmark
// =============================================================================

fn benchmark_remove(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("remove");

    for size in SIZES {
        let keys = shuffled(size);
        let tree = build(&keys);
        let standard_map: BTreeMap<i64, i64> = keys.iter().map(|&key| (key, key * 2)).collect();

        group.bench_with_input(BenchmarkId::new("RandomBst", size), &keys, |bencher, keys| {
            bencher.iter_batched(
                || tree.clone(),
                |mut tree| {
                    for key in keys {
                        black_box(tree.remove(black_box(key)));
                    }
                    tree
                },
                criterion::BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |bencher, keys| {
            bencher.iter_batched(
                || standard_map.clone(),
                |mut map| {
                    for key in keys {
                        black_box(map.remove(black_box(key)));
                    }
                    map
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// =============================================================================
// min/max Benchmark
// =============================================================================

fn benchmark_min_max(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("min_max");

    for size in SIZES {
        let tree = build(&shuffled(size));

        group.bench_with_input(BenchmarkId::new("RandomBst", size), &size, |bencher, _| {
            bencher.iter(|| black_box((tree.min_key(), tree.max_key())));
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Group and Main
// =============================================================================

criterion_group!(
    benches,
    benchmark_put,
    benchmark_get,
    benchmark_remove,
    benchmark_min_max
);

criterion_main!(benches);

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;
use std::hint::black_box;
use avl_sequence::AvlSequence;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

// ─── Insert ─────────────────────────────────────────────────────────────────

fn bench_insert(c: &mut Criterion) {
    for (name, keys) in [("ordered", ordered_keys(N)), ("random", random_keys(N))] {
        let mut group = c.benchmark_group(format!("insert_{name}"));

        group.bench_function(BenchmarkId::new("AvlSequence", N), |b| {
            b.iter(|| {
                let mut seq = AvlSequence::new();
                for &k in &keys {
                    seq.insert(k, k);
                }
                seq
            });
        });

        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for &k in &keys {
                    map.insert(k, k);
                }
                map
            });
        });

        group.finish();
    }
}

// ─── Lookup ─────────────────────────────────────────────────────────────────

fn bench_get_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let seq: AvlSequence<i64> = keys.iter().map(|&k| (k, k)).collect();
    let map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("get_random");

    group.bench_function(BenchmarkId::new("AvlSequence", N), |b| {
        b.iter(|| {
            for &k in &keys {
                black_box(seq.get(k));
            }
        });
    });

    group.bench_function(BenchmarkId::new("AvlSequence::element_at_key", N), |b| {
        b.iter(|| {
            for &k in &keys {
                black_box(seq.element_at_key(k).value().ok());
            }
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            for &k in &keys {
                black_box(map.get(&k));
            }
        });
    });

    group.finish();
}

// ─── Remove ─────────────────────────────────────────────────────────────────

fn bench_remove_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let seq: AvlSequence<i64> = keys.iter().map(|&k| (k, k)).collect();
    let map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("remove_random");

    group.bench_function(BenchmarkId::new("AvlSequence", N), |b| {
        b.iter_batched(
            || seq.clone(),
            |mut seq| {
                for &k in &keys {
                    black_box(seq.remove(k));
                }
            },
            BatchSize::LargeInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || map.clone(),
            |mut map| {
                for &k in &keys {
                    black_box(map.remove(&k));
                }
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

// ─── Traversal ──────────────────────────────────────────────────────────────

fn bench_traverse(c: &mut Criterion) {
    let keys = random_keys(N);
    let seq: AvlSequence<i64> = keys.iter().map(|&k| (k, k)).collect();
    let map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("traverse");

    group.bench_function(BenchmarkId::new("AvlSequence::cursor", N), |b| {
        b.iter(|| {
            let mut cursor = seq.front();
            let mut sum = 0i64;
            while let Ok(v) = cursor.value() {
                sum = sum.wrapping_add(*v);
                cursor.advance();
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("AvlSequence::iter", N), |b| {
        b.iter(|| seq.values().fold(0i64, |acc, v| acc.wrapping_add(*v)));
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| map.values().fold(0i64, |acc, v| acc.wrapping_add(*v)));
    });

    group.finish();
}

criterion_group!(crud_benches, bench_insert, bench_get_random, bench_remove_random,);

criterion_group!(traverse_benches, bench_traverse,);

criterion_main!(crud_benches, traverse_benches,);

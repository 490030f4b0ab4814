// Insertion cost across load-factor thresholds: sequential keys (pure
// growth cost) and random keys (growth plus collisions), per strategy.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use probe_set::experiment::{random_keys, sequential_keys, DEFAULT_THRESHOLDS};
use probe_set::{HashKind, OpenAddressingHashSet};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

const N: usize = 200_000;

fn insert_all(threshold: f64, kind: HashKind, keys: &[i64]) -> OpenAddressingHashSet {
    let mut t = OpenAddressingHashSet::new(threshold, kind).unwrap();
    for &k in keys {
        t.insert(k).unwrap();
    }
    t
}

fn bench_sequential(c: &mut Criterion) {
    let keys = sequential_keys(N);
    let mut group = c.benchmark_group("sequential_200k");
    for &lf in &DEFAULT_THRESHOLDS {
        group.bench_with_input(BenchmarkId::from_parameter(lf), &lf, |b, &lf| {
            b.iter(|| black_box(insert_all(lf, HashKind::Default, &keys)))
        });
    }
    group.finish();
}

fn bench_random_per_strategy(c: &mut Criterion) {
    let keys = random_keys(N, -10_000_000, 10_000_000, &mut StdRng::seed_from_u64(1));
    for kind in HashKind::ALL {
        let mut group = c.benchmark_group(format!("random_200k/{kind}"));
        for &lf in &DEFAULT_THRESHOLDS {
            group.bench_with_input(BenchmarkId::from_parameter(lf), &lf, |b, &lf| {
                b.iter(|| black_box(insert_all(lf, kind, &keys)))
            });
        }
        group.finish();
    }
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(3))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_sequential, bench_random_per_strategy
}
criterion_main!(benches);

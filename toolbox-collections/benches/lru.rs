//! Benchmarks for LRU cache operations.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use toolbox_collections::LruCache;

const CAPACITIES: [usize; 3] = [64, 4_096, 65_536];

fn random_keys(capacity: usize, spread: u64) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(7);
    (0..100_000)
        .map(|_| rng.random_range(0..capacity as u64 * spread))
        .collect()
}

// ============================================================================
// Hits
// ============================================================================

fn bench_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_hit");

    for capacity in CAPACITIES {
        let mut cache = LruCache::new(capacity).unwrap();
        cache.extend((0..capacity as u64).map(|k| (k, k)));
        let keys = random_keys(capacity, 1);

        group.bench_function(BenchmarkId::from_parameter(capacity), |b| {
            let mut i = 0;
            b.iter(|| {
                i = (i + 1) % keys.len();
                black_box(cache.get(&keys[i]).copied())
            });
        });
    }

    group.finish();
}

// ============================================================================
// Mixed workload with eviction
// ============================================================================

fn bench_set_evicting(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_evicting");

    for capacity in CAPACITIES {
        let keys = random_keys(capacity, 4);

        group.bench_function(BenchmarkId::from_parameter(capacity), |b| {
            let mut cache = LruCache::new(capacity).unwrap();
            let mut i = 0;
            b.iter(|| {
                i = (i + 1) % keys.len();
                let k = keys[i];
                if cache.get(&k).is_none() {
                    cache.set(black_box(k), k);
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_get_hit, bench_set_evicting);
criterion_main!(benches);

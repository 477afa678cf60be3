//! # Governance Cache Benchmark
//!
//! Measures lookup and store cost of the authorization cache at several
//! sizes, including the eviction path once the cache is full.
//!
//! Run with:
//! ```bash
//! cargo bench --bench governance_cache
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use atom_governance::{AuthorizationKey, GovernanceAuthorizationCache};

fn keys(count: usize) -> Vec<AuthorizationKey> {
    (0..count)
        .map(|i| AuthorizationKey::new(format!("agent-{i}"), "stream_chat").unwrap())
        .collect()
}

fn filled_cache(size: usize) -> (GovernanceAuthorizationCache, Vec<AuthorizationKey>) {
    let cache = GovernanceAuthorizationCache::new(size, 3600).unwrap();
    let keys = keys(size);
    for key in &keys {
        cache.store(key.clone(), true);
    }
    (cache, keys)
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("governance_cache_lookup");

    for size in [100usize, 1_000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::new("hit", size), size, |b, &size| {
            let (cache, keys) = filled_cache(size);
            let mut i = 0;
            b.iter(|| {
                i = (i + 1) % keys.len();
                black_box(cache.lookup(&keys[i]))
            });
        });

        group.bench_with_input(BenchmarkId::new("miss", size), size, |b, &size| {
            let (cache, _keys) = filled_cache(size);
            let absent = AuthorizationKey::new("unknown-agent", "stream_chat").unwrap();
            b.iter(|| black_box(cache.lookup(&absent)));
        });
    }

    group.finish();
}

fn bench_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("governance_cache_store");

    for size in [100usize, 1_000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::new("overwrite", size), size, |b, &size| {
            let (cache, keys) = filled_cache(size);
            let mut i = 0;
            b.iter(|| {
                i = (i + 1) % keys.len();
                cache.store(black_box(keys[i].clone()), false);
            });
        });

        group.bench_with_input(BenchmarkId::new("evicting", size), size, |b, &size| {
            let (cache, _keys) = filled_cache(size);
            let fresh = keys(size * 2);
            let mut i = 0;
            b.iter(|| {
                i = (i + 1) % fresh.len();
                cache.store(black_box(fresh[i].clone()), true);
            });
        });
    }

    group.finish();
}

fn bench_maintenance(c: &mut Criterion) {
    let mut group = c.benchmark_group("governance_cache_maintenance");

    group.bench_function("invalidate_agent_10000", |b| {
        let (cache, keys) = filled_cache(10_000);
        b.iter(|| {
            let removed = cache.invalidate("agent-42", None);
            cache.store(keys[42].clone(), true);
            black_box(removed)
        });
    });

    group.bench_function("expire_stale_nothing_stale_10000", |b| {
        let (cache, _keys) = filled_cache(10_000);
        b.iter(|| black_box(cache.expire_stale()));
    });

    group.finish();
}

criterion_group!(
    governance_cache_benches,
    bench_lookup,
    bench_store,
    bench_maintenance
);
criterion_main!(governance_cache_benches);

//! Benchmarks for store dispatch fan-out.
//!
//! Run with: cargo bench -p frond-core --bench dispatch_bench

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use frond_core::{Action, Store, WILDCARD};
use std::hint::black_box;

#[derive(Clone)]
struct Add(u64);

impl Action for Add {
    fn kind(&self) -> &str {
        "add"
    }
}

fn store_with_subscribers(wildcard: usize, scoped: usize) -> Store<u64, Add> {
    let store = Store::new(|Add(n): &Add, total: &u64| Some(total + n), 0u64);
    for _ in 0..wildcard {
        store.on(WILDCARD, |_, new, _| {
            black_box(*new);
        });
    }
    for _ in 0..scoped {
        store.on("add", |_, new, _| {
            black_box(*new);
        });
    }
    store
}

fn bench_dispatch_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch/fanout");

    for subscribers in [0usize, 1, 8, 64] {
        group.throughput(Throughput::Elements(1));
        let store = store_with_subscribers(subscribers, subscribers);
        group.bench_with_input(
            BenchmarkId::new("wildcard_plus_scoped", subscribers),
            &(),
            |b, _| b.iter(|| store.dispatch(Add(black_box(1)))),
        );
    }

    group.finish();
}

fn bench_dispatch_unmatched_kind(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch/unmatched");

    // Scoped subscribers on a kind that never fires: measures map lookup
    // plus wildcard-only fan-out.
    let store = Store::new(|Add(n): &Add, total: &u64| Some(total + n), 0u64);
    for _ in 0..64 {
        store.on("other", |_, _, _| {});
    }
    group.bench_function("scoped_miss_64", |b| {
        b.iter(|| store.dispatch(Add(black_box(1))));
    });

    group.finish();
}

criterion_group!(benches, bench_dispatch_fanout, bench_dispatch_unmatched_kind);
criterion_main!(benches);

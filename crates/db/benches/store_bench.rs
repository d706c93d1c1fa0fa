//! Benchmarks for facet-db using criterion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use facet_db::{IndexKind, KeyRange, Record, Store, Value};

fn populated(size: i64) -> Store {
    (0..size)
        .map(|i| {
            (
                Value::from(i),
                Record::from_pairs([
                    ("group", Value::from(i % 100)),
                    ("serial", Value::from(i)),
                    ("score", Value::from(i * 7 % 1000)),
                ]),
            )
        })
        .collect()
}

fn cold_eq_lookup_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("cold_eq_lookup");

    for size in [100, 1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                // A fresh store pays the full index build on first use
                let store = populated(size);
                black_box(store.eq("group", &Value::from(42)))
            });
        });
    }

    group.finish();
}

fn warm_eq_lookup_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("warm_eq_lookup");

    for size in [100, 1000, 10000].iter() {
        let store = populated(*size);
        store.force("group", IndexKind::Equality);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                for g in 0..100 {
                    black_box(store.eq("group", &Value::from(g)));
                }
            });
        });
    }

    group.finish();
}

fn range_scan_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_scan");

    let store = populated(100_000);
    store.force("score", IndexKind::Sorted);

    for width in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(width), width, |b, &width| {
            let range = KeyRange::bound(Value::from(0), Value::from(width), false, true);
            b.iter(|| black_box(store.ascending("score", &range)));
        });
    }

    group.finish();
}

fn add_with_live_indexes_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_with_live_indexes");

    for size in [1000, 10000].iter() {
        let store = populated(*size);
        store.force_all([
            ("group", IndexKind::Equality),
            ("serial", IndexKind::Unique),
            ("score", IndexKind::Sorted),
        ]);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let next = store.add(
                    Value::from(size + 1),
                    Record::from_pairs([
                        ("group", Value::from(7)),
                        ("serial", Value::from(size + 1)),
                        ("score", Value::from(500)),
                    ]),
                );
                black_box(next)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    cold_eq_lookup_benchmark,
    warm_eq_lookup_benchmark,
    range_scan_benchmark,
    add_with_live_indexes_benchmark
);
criterion_main!(benches);

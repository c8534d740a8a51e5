//! Benchmarks for child traversal and lazy reclaim

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use tombgraph_core::Registry;
use tombgraph_test_utils::{build_star, remove_all};

/// Benchmark `show` over a fully live star
fn bench_show_live(c: &mut Criterion) {
    let mut group = c.benchmark_group("show_live");

    for size in [10usize, 100, 1_000] {
        let registry = Registry::new();
        build_star(&registry, "A", size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bencher, _| {
            bencher.iter(|| black_box(registry.show("A")));
        });
    }

    group.finish();
}

/// Benchmark the first `show` after every child was removed, which clears
/// each cell and compacts
fn bench_show_reclaim(c: &mut Criterion) {
    let mut group = c.benchmark_group("show_reclaim");

    for size in [100usize, 1_000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bencher, &size| {
            bencher.iter_batched(
                || {
                    let registry = Registry::new();
                    let children = build_star(&registry, "A", size);
                    remove_all(&registry, &children);
                    registry
                },
                |registry| black_box(registry.show("A")),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

/// Benchmark removal, which must not depend on parent count
fn bench_remove(c: &mut Criterion) {
    c.bench_function("remove_with_1000_parents", |bencher| {
        bencher.iter_batched(
            || {
                let registry = Registry::new();
                registry.create("child", "").unwrap();
                for i in 0..1_000 {
                    let parent = format!("P{i}");
                    registry.create(&parent, "").unwrap();
                    registry.connect(&parent, "child").unwrap();
                }
                registry
            },
            |registry| black_box(registry.remove("child")),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_show_live, bench_show_reclaim, bench_remove);
criterion_main!(benches);

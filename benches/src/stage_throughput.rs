mod common;

use common::drain_count;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use futures::stream;
use patterns::prelude::*;
use tokio::runtime::Runtime;

/// Benchmark single-stage throughput as channel capacity grows
///
/// Capacity 1 hands off every element individually; larger capacities let the
/// worker run ahead of the consumer.
fn bench_transform_capacity(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_capacity");
    let runtime = Runtime::new().unwrap();
    let total = 10_000u64;
    group.throughput(Throughput::Elements(total));

    for capacity in [1usize, 8, 64, 512] {
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            &capacity,
            |b, &capacity| {
                b.to_async(&runtime).iter(|| async move {
                    let combinators = Combinators::new().with_capacity(capacity);
                    let mapped = combinators.transform(stream::iter(0..total), |x| x + 1);
                    black_box(drain_count(vec![mapped]).await);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark filter selectivity: keep one element in `n`
fn bench_filter_selectivity(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_selectivity");
    let runtime = Runtime::new().unwrap();
    let total = 10_000u64;
    group.throughput(Throughput::Elements(total));

    for keep_one_in in [1u64, 2, 10, 100] {
        group.bench_with_input(
            BenchmarkId::from_parameter(keep_one_in),
            &keep_one_in,
            |b, &keep_one_in| {
                b.to_async(&runtime).iter(|| async move {
                    let kept = filter(stream::iter(0..total), move |x| x % keep_one_in == 0);
                    black_box(drain_count(vec![kept]).await);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark a deep linear chain of transform stages
fn bench_chain_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_chain_depth");
    let runtime = Runtime::new().unwrap();

    for depth in [1usize, 4, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.to_async(&runtime).iter(|| async move {
                let mut outlet = from_iter(0..5_000u64);
                for _ in 0..depth {
                    outlet = transform(outlet, |x| x + 1);
                }
                black_box(drain_count(vec![outlet]).await);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_transform_capacity,
    bench_filter_selectivity,
    bench_chain_depth
);
criterion_main!(benches);

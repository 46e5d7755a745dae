mod common;

use common::{drain_count, generate_sources};
use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use futures::stream;
use patterns::prelude::*;
use tokio::runtime::Runtime;

/// Benchmark comparing Merge vs Concat for combining independent sources
///
/// Same workload in both cases:
/// - Merge: one worker per source, interleaved
/// - Concat: one worker draining sources in order
fn bench_merge_vs_concat(c: &mut Criterion) {
    let mut group = c.benchmark_group("fan_in_merge_vs_concat");
    let runtime = Runtime::new().unwrap();

    let num_sources = 8;
    let per_source = 1_250; // 10K total elements

    for (name, merged) in [("merge_concurrent", true), ("concat_sequential", false)] {
        let setup = || generate_sources(num_sources, per_source);

        let bench = |datasets: Vec<Vec<u64>>| async move {
            let sources: Vec<_> = datasets.into_iter().map(stream::iter).collect();
            let combinators = Combinators::new().with_capacity(64);

            let outlet = if merged {
                combinators.merge(sources)
            } else {
                combinators.concat(sources)
            };

            black_box(drain_count(vec![outlet]).await);
        };

        group.bench_with_input(BenchmarkId::from_parameter(name), &name, |b, _| {
            b.to_async(&runtime).iter_batched(setup, bench, BatchSize::SmallInput);
        });
    }

    group.finish();
}

/// Benchmark Split vs Tee fan-out width
///
/// Tee copies every element to every destination, Split hands each element to
/// exactly one, so Tee moves `width` times as many elements.
fn bench_fan_out_width(c: &mut Criterion) {
    let mut group = c.benchmark_group("fan_out_width");
    let runtime = Runtime::new().unwrap();

    let total = 10_000u64;

    for width in [1usize, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::new("split", width), &width, |b, &width| {
            b.to_async(&runtime).iter(|| async move {
                let combinators = Combinators::new().with_capacity(64);
                let lanes = combinators.split(stream::iter(0..total), width).unwrap();
                black_box(drain_count(lanes).await);
            });
        });

        group.bench_with_input(BenchmarkId::new("tee", width), &width, |b, &width| {
            b.to_async(&runtime).iter(|| async move {
                let combinators = Combinators::new().with_capacity(64);
                let copies = combinators.tee(stream::iter(0..total), width);
                black_box(drain_count(copies).await);
            });
        });
    }

    group.finish();
}

/// Benchmark the classic fan-out / work / fan-in topology
///
/// split(n) -> transform per lane -> merge, at varying lane counts
fn bench_fan_out_fan_in(c: &mut Criterion) {
    let mut group = c.benchmark_group("fan_out_fan_in");
    let runtime = Runtime::new().unwrap();

    for lanes in [1usize, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(lanes), &lanes, |b, &lanes| {
            b.to_async(&runtime).iter(|| async move {
                let combinators = Combinators::new().with_capacity(32);
                let split = combinators
                    .split(stream::iter(0..10_000u64), lanes)
                    .unwrap();
                let worked: Vec<_> = split
                    .into_iter()
                    .map(|lane| combinators.transform(lane, |x| x.wrapping_mul(31) ^ 7))
                    .collect();
                black_box(drain_count(vec![combinators.merge(worked)]).await);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_merge_vs_concat,
    bench_fan_out_width,
    bench_fan_out_fan_in
);
criterion_main!(benches);

/// Performance benchmarks for array comparison and collection reconciliation
///
/// Arrays of tally size are compared directly and by interval overlap, and
/// whole collections go through the full reconcile-then-compare pipeline.
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use tallycmp::comparison::direct::max_relative_difference;
use tallycmp::comparison::overlap::overlaps;
use tallycmp::{
    compare_collections, Entry, Labels, NamedCollection, NdArray, NullNotifier, Tolerances,
    Uncertain, Value,
};

fn ramp(len: usize, scale: f64) -> NdArray {
    NdArray::from_vec((0..len).map(|i| (i as f64 + 1.0) * scale).collect())
}

fn bench_array_metric(c: &mut Criterion) {
    let mut group = c.benchmark_group("max_relative_difference");

    for size in [1_000usize, 10_000, 100_000].iter() {
        let first = ramp(*size, 1.0);
        let second = ramp(*size, 1.001);
        group.bench_with_input(BenchmarkId::new("elements", size), size, |b, _| {
            b.iter(|| max_relative_difference(black_box(&first), black_box(&second)))
        });
    }

    group.finish();
}

fn bench_overlap(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlaps");

    for size in [1_000usize, 10_000].iter() {
        let first = Uncertain {
            value: Value::Array(ramp(*size, 1.0)),
            uncertainty: Value::Array(NdArray::from_vec(vec![0.01; *size])),
        };
        let second = Uncertain {
            value: Value::Array(ramp(*size, 1.005)),
            uncertainty: Value::Array(NdArray::from_vec(vec![0.01; *size])),
        };
        group.bench_with_input(BenchmarkId::new("elements", size), size, |b, _| {
            b.iter(|| overlaps(black_box(&first), black_box(&second), 2, true))
        });
    }

    group.finish();
}

fn bench_collection_pipeline(c: &mut Criterion) {
    let collection = |scale: f64| -> NamedCollection {
        (0..200)
            .map(|i| {
                let entry = match i % 3 {
                    0 => Entry::from(i as f64 * scale),
                    1 => Entry::uncertain(i as f64 * scale, 0.01),
                    _ => Entry::from(ramp(64, scale)),
                };
                (format!("key{i:03}"), entry)
            })
            .collect()
    };
    let first = collection(1.0);
    let second = collection(1.02);
    let tolerances = Tolerances::default();
    let labels = Labels::default();

    c.bench_function("compare_collections_200_keys", |b| {
        b.iter(|| {
            compare_collections(
                black_box(&first),
                black_box(&second),
                &tolerances,
                &labels,
                &NullNotifier,
            )
        })
    });
}

criterion_group!(
    benches,
    bench_array_metric,
    bench_overlap,
    bench_collection_pipeline
);
criterion_main!(benches);

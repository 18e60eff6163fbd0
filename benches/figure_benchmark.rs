#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for EDA figure construction and rasterisation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trueno_eda::prelude::*;

/// Four numeric features, one categorical feature and a numeric target.
fn dataset(rows: usize) -> Dataset {
    let mut data = Dataset::new();
    for f in 0..4 {
        let values: Vec<f32> = (0..rows)
            .map(|i| {
                let x = i as f32 / rows as f32;
                // Bell-curve-like spread with a per-feature offset
                (x * std::f32::consts::TAU).sin() * 50.0 + 50.0 + ((i + f) % 17) as f32
            })
            .collect();
        data.add_numeric(&format!("feature_{f}"), &values).unwrap();
    }

    let groups = ["a", "b", "c", "d"];
    let labels: Vec<&str> = (0..rows).map(|i| groups[i % groups.len()]).collect();
    data.add_categorical("group", &labels).unwrap();

    let target: Vec<f32> = (0..rows).map(|i| (i % 97) as f32 * 1.5).collect();
    data.add_numeric("Target", &target).unwrap();
    data
}

fn figure_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("figure");
    let quiet = PlotOptions {
        show: false,
        ..PlotOptions::default()
    };
    let relation = RelationOptions {
        show: false,
        ..RelationOptions::default()
    };

    for rows in [100, 1_000, 10_000] {
        let data = dataset(rows);

        group.bench_with_input(BenchmarkId::new("distributions", rows), &rows, |b, _| {
            b.iter(|| plot_distributions(black_box(&data), &quiet).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("vs_target", rows), &rows, |b, _| {
            b.iter(|| plot_vs_target(black_box(&data), &relation).unwrap());
        });

        let figure = plot_vs_target(&data, &relation).unwrap().with_dpi(50.0);
        group.bench_with_input(BenchmarkId::new("rasterise", rows), &rows, |b, _| {
            b.iter(|| black_box(&figure).to_framebuffer().unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, figure_benchmark);
criterion_main!(benches);

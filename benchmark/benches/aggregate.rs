// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Aggregation microbenchmarks.
//!
//! Measures the cost of reducing series of typical run sizes to their stats,
//! so reporting never shows up next to the network latencies it summarizes.

use cmsperf_benchmark::{LatencyStats, RunSeries, Sample, MANAGEMENT_METRICS};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Iteration counts to test.
const SERIES_LENGTHS: &[usize] = &[10, 100, 10_000];

fn samples(len: usize) -> Vec<Sample> {
    (0..len)
        .map(|i| Sample::from_millis(50.0 + (i % 97) as f64 * 1.7))
        .collect()
}

fn bench_latency_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("latency_stats");

    for &len in SERIES_LENGTHS {
        let data = samples(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &data, |b, data| {
            b.iter(|| LatencyStats::from_samples(black_box(data)))
        });
    }

    group.finish();
}

fn bench_run_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_aggregate");

    for &len in SERIES_LENGTHS {
        let mut series = RunSeries::new(&MANAGEMENT_METRICS).expect("valid metrics");
        for iteration in 0..len {
            let row = MANAGEMENT_METRICS
                .iter()
                .map(|name| (name.to_string(), Sample::from_millis(iteration as f64)))
                .collect();
            series
                .append_iteration(iteration as u32 + 1, row)
                .expect("complete iteration");
        }

        group.bench_with_input(BenchmarkId::from_parameter(len), &series, |b, series| {
            b.iter(|| series.aggregate())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_latency_stats, bench_run_aggregate);
criterion_main!(benches);

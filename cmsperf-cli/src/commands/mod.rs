// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! CLI command modules.

pub mod run;
pub mod show;
pub mod validate;

use cmsperf_benchmark::{LatencyStats, PerfReport};

/// Print the per-metric summary table of a report.
pub fn print_summary(report: &PerfReport) {
    println!(
        "Upload file: {} ({} bytes)",
        report.upload_file.name, report.upload_file.size_in_bytes
    );
    println!();
    println!("{:<24} {:>12} {:>12} {:>12}", "Metric", "Min", "Max", "Avg");
    println!("{}", "-".repeat(63));
    for (name, stats) in &report.metrics {
        println!(
            "{:<24} {:>12} {:>12} {:>12}",
            name,
            LatencyStats::format_latency(stats.min),
            LatencyStats::format_latency(stats.max),
            LatencyStats::format_latency(stats.avg),
        );
    }
}

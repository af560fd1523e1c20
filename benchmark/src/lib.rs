// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! cmsperf Benchmarking Framework
//!
//! Times management API calls, aggregates the samples and writes the result
//! as a JSON report.
//!
//! # Pipeline
//!
//! - **Collector**: [`harness::collect_sample`] times one call, tolerating an
//!   expected "not found".
//! - **Driver**: [`IterationDriver`] repeats a [`Scenario`] N times.
//! - **Aggregator**: [`LatencyStats`] reduces each series to min/max/avg.
//! - **Report**: [`PerfReport`] is persisted by [`JsonReporter`].

pub mod error;
pub mod harness;
pub mod metrics;
pub mod report;
pub mod reporter;
pub mod scenario;

pub use error::{HarnessError, RunError};
pub use harness::{collect_sample, IterationDriver, IterationRecorder, Measured, Timer};
pub use metrics::{LatencyStats, MetricSeries, RunSeries, Sample};
pub use report::{PerfReport, UploadFile, REPORT_INFO};
pub use reporter::{JsonReporter, ReporterError};
pub use scenario::{ManagementScenario, Scenario, SourceFile, MANAGEMENT_METRICS};

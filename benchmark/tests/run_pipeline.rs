// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! End-to-end runs of the driver, aggregator and reporter with simulated steps.
//!
//! The tokio clock is paused, so simulated delays are measured exactly.

use std::time::Duration;

use async_trait::async_trait;
use cmsperf_benchmark::{
    IterationDriver, IterationRecorder, JsonReporter, LatencyStats, PerfReport, RunError, Scenario,
    UploadFile,
};
use tempfile::TempDir;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
enum StepError {
    #[error("not found")]
    NotFound,
    #[error("validation failed")]
    Validation,
}

fn is_not_found(err: &StepError) -> bool {
    *err == StepError::NotFound
}

/// "A" takes 10ms then 20ms; "B" always probes a missing resource.
struct TwoSteps {
    delays_ms: Vec<u64>,
}

#[async_trait]
impl Scenario for TwoSteps {
    type Error = StepError;

    fn metrics(&self) -> &[&'static str] {
        &["A", "B"]
    }

    async fn run_iteration(
        &mut self,
        iteration: u32,
        recorder: &mut IterationRecorder,
    ) -> Result<(), StepError> {
        let delay = Duration::from_millis(self.delays_ms[iteration as usize - 1]);
        recorder
            .time("A", async move {
                tokio::time::sleep(delay).await;
                Ok::<_, StepError>(())
            })
            .await?;
        recorder
            .probe("B", async { Err::<(), _>(StepError::NotFound) }, is_not_found)
            .await?;
        Ok(())
    }
}

/// Fails with a non-absence error on the given iteration.
struct FailsAt {
    iteration: u32,
}

#[async_trait]
impl Scenario for FailsAt {
    type Error = StepError;

    fn metrics(&self) -> &[&'static str] {
        &["A"]
    }

    async fn run_iteration(
        &mut self,
        iteration: u32,
        recorder: &mut IterationRecorder,
    ) -> Result<(), StepError> {
        let fail = iteration == self.iteration;
        recorder
            .probe(
                "A",
                async move {
                    if fail {
                        Err(StepError::Validation)
                    } else {
                        Ok(())
                    }
                },
                is_not_found,
            )
            .await?;
        Ok(())
    }
}

/// Declares a metric it never samples.
struct ForgetsMetric;

#[async_trait]
impl Scenario for ForgetsMetric {
    type Error = StepError;

    fn metrics(&self) -> &[&'static str] {
        &["A", "B"]
    }

    async fn run_iteration(
        &mut self,
        _iteration: u32,
        recorder: &mut IterationRecorder,
    ) -> Result<(), StepError> {
        recorder.time("A", async { Ok::<_, StepError>(()) }).await
    }
}

fn upload_file() -> UploadFile {
    UploadFile {
        name: "source-image.jpg".to_string(),
        size_in_bytes: 1024,
    }
}

#[tokio::test(start_paused = true)]
async fn test_two_iteration_report() {
    let mut scenario = TwoSteps {
        delays_ms: vec![10, 20],
    };
    let series = IterationDriver::new(2)
        .unwrap()
        .run(&mut scenario)
        .await
        .unwrap();

    assert_eq!(series.len(), 2);
    assert_eq!(series.get("A").unwrap().len(), 2);
    assert_eq!(series.get("B").unwrap().len(), 2);

    let report = PerfReport::from_series(upload_file(), &series).unwrap();

    assert_eq!(
        report.metric("A"),
        Some(&LatencyStats {
            min: 10.0,
            max: 20.0,
            avg: 15.0
        })
    );
    // The absent resource answers without any clock advance
    assert_eq!(
        report.metric("B"),
        Some(&LatencyStats {
            min: 0.0,
            max: 0.0,
            avg: 0.0
        })
    );
}

#[tokio::test(start_paused = true)]
async fn test_series_shape_for_many_iterations() {
    let iterations = 7;
    let mut scenario = TwoSteps {
        delays_ms: vec![1; iterations],
    };
    let series = IterationDriver::new(iterations as u32)
        .unwrap()
        .run(&mut scenario)
        .await
        .unwrap();

    assert_eq!(series.len(), 2);
    assert!(series.iter().all(|s| s.len() == iterations));
}

#[tokio::test]
async fn test_fatal_error_aborts_run_without_report() {
    let temp_dir = TempDir::new().unwrap();
    let reporter = JsonReporter::new(temp_dir.path()).unwrap();
    let mut scenario = FailsAt { iteration: 3 };

    let result = IterationDriver::new(5).unwrap().run(&mut scenario).await;

    match result {
        Err(RunError::Step { iteration, source }) => {
            assert_eq!(iteration, 3);
            assert_eq!(source, StepError::Validation);
        }
        other => panic!("expected step failure, got {:?}", other.map(|s| s.len())),
    }
    // Nothing to report, nothing written
    assert!(reporter.list_reports().unwrap().is_empty());
}

#[tokio::test]
async fn test_unsampled_metric_is_a_harness_error() {
    let result = IterationDriver::new(1).unwrap().run(&mut ForgetsMetric).await;
    assert!(matches!(result, Err(RunError::Harness(_))));
}

#[tokio::test(start_paused = true)]
async fn test_report_written_and_reloaded() {
    let temp_dir = TempDir::new().unwrap();
    let reporter = JsonReporter::new(temp_dir.path()).unwrap();

    let mut scenario = TwoSteps {
        delays_ms: vec![10, 20],
    };
    let series = IterationDriver::new(2)
        .unwrap()
        .run(&mut scenario)
        .await
        .unwrap();
    let report = PerfReport::from_series(upload_file(), &series).unwrap();

    let path = reporter.save(&report, "perf-result").unwrap();
    let loaded = JsonReporter::load(&path).unwrap();
    assert_eq!(loaded, report);

    let content = std::fs::read_to_string(&path).unwrap();
    let raw: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(raw["info"], "Results are in ms");
    assert_eq!(raw["uploadFile"]["sizeInBytes"], 1024);
    assert!(raw["A"]["avg"].is_number());
    assert!(raw["B"]["max"].is_number());
}

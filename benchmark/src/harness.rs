// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Benchmark harness for timing remote calls.
//!
//! [`collect_sample`] times a single future. [`IterationDriver`] repeats a
//! [`Scenario`] a fixed number of times, strictly sequentially, and gathers
//! one sample per metric per iteration.
//!
//! Time is read from `tokio::time::Instant`, which is the monotonic clock at
//! runtime and the paused test clock under `#[tokio::test(start_paused = true)]`.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::{HarnessError, RunError};
use crate::metrics::{RunSeries, Sample};
use crate::scenario::Scenario;

/// Timer for measuring individual operations.
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed duration so far.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return the elapsed time as a sample.
    pub fn stop(self) -> Sample {
        Sample::from_duration(self.start.elapsed())
    }
}

/// Measure how long a future takes to resolve.
pub async fn measure_async<F>(future: F) -> (F::Output, Duration)
where
    F: Future,
{
    let timer = Timer::start();
    let output = future.await;
    (output, timer.elapsed())
}

/// Result of a timed operation whose failure may be an expected absence.
#[derive(Debug, Clone, PartialEq)]
pub struct Measured<T> {
    /// `None` when the operation failed with an expected absence.
    pub value: Option<T>,
    pub sample: Sample,
}

/// Time one operation.
///
/// The clock starts right before the future is first polled and stops as soon
/// as it resolves. Errors for which `is_expected_absence` returns `true` are
/// swallowed and still produce a sample; any other error is returned
/// unchanged and no sample is produced.
pub async fn collect_sample<T, E, F, P>(
    operation: F,
    is_expected_absence: P,
) -> Result<Measured<T>, E>
where
    F: Future<Output = Result<T, E>>,
    P: FnOnce(&E) -> bool,
{
    let (result, elapsed) = measure_async(operation).await;
    let sample = Sample::from_duration(elapsed);

    match result {
        Ok(value) => Ok(Measured {
            value: Some(value),
            sample,
        }),
        Err(err) if is_expected_absence(&err) => Ok(Measured {
            value: None,
            sample,
        }),
        Err(err) => Err(err),
    }
}

/// Per-iteration sample sink handed to a [`Scenario`].
///
/// Only the future passed to [`time`](Self::time) or [`probe`](Self::probe)
/// is measured; any setup the scenario does around it is not.
#[derive(Debug, Default)]
pub struct IterationRecorder {
    samples: Vec<(String, Sample)>,
}

impl IterationRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time an operation that must succeed.
    pub async fn time<T, E, F>(&mut self, metric: &str, operation: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
    {
        let (result, elapsed) = measure_async(operation).await;
        let value = result?;
        self.record(metric, Sample::from_duration(elapsed));
        Ok(value)
    }

    /// Time an existence probe. An expected absence yields `Ok(None)`.
    pub async fn probe<T, E, F, P>(
        &mut self,
        metric: &str,
        operation: F,
        is_expected_absence: P,
    ) -> Result<Option<T>, E>
    where
        F: Future<Output = Result<T, E>>,
        P: FnOnce(&E) -> bool,
    {
        let measured = collect_sample(operation, is_expected_absence).await?;
        self.record(metric, measured.sample);
        if measured.value.is_none() {
            tracing::debug!(metric, "Resource absent, as expected");
        }
        Ok(measured.value)
    }

    /// Record an externally measured sample.
    pub fn record(&mut self, metric: &str, sample: Sample) {
        tracing::debug!(metric, ms = sample.millis(), "Sample recorded");
        self.samples.push((metric.to_string(), sample));
    }

    /// Samples recorded so far, in recording order.
    pub fn samples(&self) -> &[(String, Sample)] {
        &self.samples
    }

    fn into_samples(self) -> Vec<(String, Sample)> {
        self.samples
    }
}

/// Runs a scenario a fixed number of times and collects its series.
#[derive(Debug, Clone)]
pub struct IterationDriver {
    /// Number of unmeasured iterations before measurement
    warmup_iterations: u32,
    /// Number of measured iterations
    measurement_iterations: u32,
}

impl IterationDriver {
    /// Create a driver for `iterations` measured iterations.
    pub fn new(iterations: u32) -> Result<Self, HarnessError> {
        if iterations == 0 {
            return Err(HarnessError::ZeroIterations);
        }
        Ok(Self {
            warmup_iterations: 0,
            measurement_iterations: iterations,
        })
    }

    /// Set the number of warmup iterations whose samples are discarded.
    pub fn warmup(mut self, iterations: u32) -> Self {
        self.warmup_iterations = iterations;
        self
    }

    /// Number of measured iterations.
    pub fn iterations(&self) -> u32 {
        self.measurement_iterations
    }

    /// Run the scenario and return one series per declared metric.
    ///
    /// Iterations and the steps within them never overlap. The first error
    /// aborts the run and the partial series are dropped.
    pub async fn run<S>(&self, scenario: &mut S) -> Result<RunSeries, RunError<S::Error>>
    where
        S: Scenario,
    {
        let mut series = RunSeries::new(scenario.metrics())?;

        // Warmup phase
        for iteration in 1..=self.warmup_iterations {
            tracing::info!(
                iteration,
                total = self.warmup_iterations,
                "Warmup iteration"
            );
            let mut recorder = IterationRecorder::new();
            scenario
                .run_iteration(iteration, &mut recorder)
                .await
                .map_err(|source| RunError::Step { iteration, source })?;
        }

        // Measurement phase
        for iteration in 1..=self.measurement_iterations {
            tracing::info!(
                iteration,
                total = self.measurement_iterations,
                "Measured iteration"
            );
            let mut recorder = IterationRecorder::new();
            scenario
                .run_iteration(iteration, &mut recorder)
                .await
                .map_err(|source| RunError::Step { iteration, source })?;
            series.append_iteration(iteration, recorder.into_samples())?;
        }

        Ok(series)
    }
}

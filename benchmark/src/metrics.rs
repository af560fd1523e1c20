// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Samples, metric series and their statistical summary.
//!
//! A run produces one [`MetricSeries`] per named step. Once the run is over
//! every series is reduced to a [`LatencyStats`] (`min`, `max`, `avg`).

use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// Top-level keys of the report that metric names must not shadow.
pub const RESERVED_KEYS: [&str; 2] = ["info", "uploadFile"];

/// One measured duration, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sample(f64);

impl Sample {
    /// Convert an elapsed duration to a sample.
    pub fn from_duration(elapsed: Duration) -> Self {
        Self(elapsed.as_nanos() as f64 / 1_000_000.0)
    }

    /// Create a sample from milliseconds. Negative and NaN inputs become 0.
    pub fn from_millis(ms: f64) -> Self {
        if ms.is_nan() || ms < 0.0 {
            Self(0.0)
        } else {
            Self(ms)
        }
    }

    /// Elapsed time in milliseconds.
    pub fn millis(&self) -> f64 {
        self.0
    }
}

/// Ordered samples of a single metric.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSeries {
    name: String,
    samples: Vec<Sample>,
}

impl MetricSeries {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            samples: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Reduce the series to its summary.
    pub fn stats(&self) -> Result<LatencyStats, HarnessError> {
        LatencyStats::from_samples(&self.samples).map_err(|_| HarnessError::EmptySeries {
            metric: self.name.clone(),
        })
    }
}

/// All series of one run, in the order the scenario declared them.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSeries {
    series: Vec<MetricSeries>,
}

impl RunSeries {
    /// Create empty series for the declared metric names.
    pub fn new<S: AsRef<str>>(metrics: &[S]) -> Result<Self, HarnessError> {
        if metrics.is_empty() {
            return Err(HarnessError::NoMetrics);
        }

        let mut series: Vec<MetricSeries> = Vec::with_capacity(metrics.len());
        for name in metrics {
            let name = name.as_ref();
            if RESERVED_KEYS.contains(&name) {
                return Err(HarnessError::ReservedMetric {
                    name: name.to_string(),
                });
            }
            if series.iter().any(|s| s.name == name) {
                return Err(HarnessError::DuplicateMetric {
                    name: name.to_string(),
                });
            }
            series.push(MetricSeries::new(name));
        }

        Ok(Self { series })
    }

    /// Append the samples of one iteration.
    ///
    /// Every declared metric must be sampled exactly once; otherwise nothing
    /// is appended.
    pub fn append_iteration(
        &mut self,
        iteration: u32,
        samples: Vec<(String, Sample)>,
    ) -> Result<(), HarnessError> {
        let mut slots: Vec<Option<Sample>> = vec![None; self.series.len()];

        for (metric, sample) in samples {
            let index = self
                .series
                .iter()
                .position(|s| s.name == metric)
                .ok_or_else(|| HarnessError::UnknownMetric {
                    metric: metric.clone(),
                    iteration,
                })?;
            if slots[index].replace(sample).is_some() {
                return Err(HarnessError::DuplicateSample { metric, iteration });
            }
        }

        if let Some(index) = slots.iter().position(Option::is_none) {
            return Err(HarnessError::MissingSample {
                metric: self.series[index].name.clone(),
                iteration,
            });
        }

        for (series, sample) in self.series.iter_mut().zip(slots.into_iter().flatten()) {
            series.push(sample);
        }
        Ok(())
    }

    /// Series for a metric name.
    pub fn get(&self, metric: &str) -> Option<&MetricSeries> {
        self.series.iter().find(|s| s.name == metric)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricSeries> {
        self.series.iter()
    }

    /// Number of tracked metrics.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Summarize every series, keeping declaration order.
    pub fn aggregate(&self) -> Result<IndexMap<String, LatencyStats>, HarnessError> {
        self.series
            .iter()
            .map(|s| Ok((s.name.clone(), s.stats()?)))
            .collect()
    }
}

/// Minimum, maximum and arithmetic mean of a series, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencyStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

impl LatencyStats {
    /// Calculate the summary of a non-empty slice of samples.
    pub fn from_samples(samples: &[Sample]) -> Result<Self, HarnessError> {
        if samples.is_empty() {
            return Err(HarnessError::EmptySeries {
                metric: String::new(),
            });
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for sample in samples {
            let ms = sample.millis();
            min = min.min(ms);
            max = max.max(ms);
            sum += ms;
        }

        // Summation error can push the mean of near-equal samples just past an extreme
        let avg = (sum / samples.len() as f64).clamp(min, max);

        Ok(Self { min, max, avg })
    }

    /// Format a latency in human-readable form (auto-selects µs/ms/s).
    pub fn format_latency(ms: f64) -> String {
        if ms < 1.0 {
            format!("{:.2}µs", ms * 1_000.0)
        } else if ms < 1_000.0 {
            format!("{:.2}ms", ms)
        } else {
            format!("{:.2}s", ms / 1_000.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(values: &[f64]) -> Vec<Sample> {
        values.iter().copied().map(Sample::from_millis).collect()
    }

    #[test]
    fn test_latency_stats_from_samples() {
        let stats = LatencyStats::from_samples(&samples(&[1.0, 2.0, 3.0, 4.0])).unwrap();
        assert_eq!(
            stats,
            LatencyStats {
                min: 1.0,
                max: 4.0,
                avg: 2.5
            }
        );
    }

    #[test]
    fn test_single_sample() {
        let stats = LatencyStats::from_samples(&samples(&[42.125])).unwrap();
        assert_eq!(stats.min, 42.125);
        assert_eq!(stats.max, 42.125);
        assert_eq!(stats.avg, 42.125);
    }

    #[test]
    fn test_empty_series_is_rejected() {
        assert!(LatencyStats::from_samples(&[]).is_err());

        let series = MetricSeries::new("viewAsset");
        assert_eq!(
            series.stats(),
            Err(HarnessError::EmptySeries {
                metric: "viewAsset".to_string()
            })
        );
    }

    #[test]
    fn test_ordering_invariant() {
        let cases: [&[f64]; 5] = [
            &[0.1, 0.1, 0.1],
            &[0.3, 0.1, 0.2],
            &[1e-9, 1e9],
            &[7.0, 7.0, 7.0, 7.0, 7.0, 7.0, 7.0],
            &[123.456, 0.0, 99.999, 5.5],
        ];
        for case in cases {
            let stats = LatencyStats::from_samples(&samples(case)).unwrap();
            assert!(stats.min <= stats.avg, "{:?}", case);
            assert!(stats.avg <= stats.max, "{:?}", case);
        }
    }

    #[test]
    fn test_sample_conversion() {
        assert_eq!(Sample::from_duration(Duration::from_millis(15)).millis(), 15.0);
        assert_eq!(Sample::from_duration(Duration::from_micros(500)).millis(), 0.5);
        assert_eq!(Sample::from_millis(-3.0).millis(), 0.0);
        assert_eq!(Sample::from_millis(f64::NAN).millis(), 0.0);
    }

    #[test]
    fn test_latency_format() {
        assert_eq!(LatencyStats::format_latency(0.5), "500.00µs");
        assert_eq!(LatencyStats::format_latency(1.5), "1.50ms");
        assert_eq!(LatencyStats::format_latency(1_500.0), "1.50s");
    }

    #[test]
    fn test_run_series_rejects_bad_declarations() {
        let empty: [&str; 0] = [];
        assert_eq!(RunSeries::new(&empty), Err(HarnessError::NoMetrics));
        assert!(matches!(
            RunSeries::new(&["a", "a"]),
            Err(HarnessError::DuplicateMetric { .. })
        ));
        assert!(matches!(
            RunSeries::new(&["info"]),
            Err(HarnessError::ReservedMetric { .. })
        ));
    }

    #[test]
    fn test_append_iteration() {
        let mut run = RunSeries::new(&["a", "b"]).unwrap();
        run.append_iteration(
            1,
            vec![
                ("b".to_string(), Sample::from_millis(2.0)),
                ("a".to_string(), Sample::from_millis(1.0)),
            ],
        )
        .unwrap();

        assert_eq!(run.get("a").unwrap().samples(), &[Sample::from_millis(1.0)]);
        assert_eq!(run.get("b").unwrap().samples(), &[Sample::from_millis(2.0)]);

        let missing = run.append_iteration(2, vec![("a".to_string(), Sample::from_millis(1.0))]);
        assert_eq!(
            missing,
            Err(HarnessError::MissingSample {
                metric: "b".to_string(),
                iteration: 2
            })
        );
        // A rejected iteration leaves the series untouched
        assert_eq!(run.get("a").unwrap().len(), 1);

        let unknown = run.append_iteration(2, vec![("c".to_string(), Sample::from_millis(1.0))]);
        assert!(matches!(unknown, Err(HarnessError::UnknownMetric { .. })));

        let duplicate = run.append_iteration(
            2,
            vec![
                ("a".to_string(), Sample::from_millis(1.0)),
                ("a".to_string(), Sample::from_millis(1.0)),
            ],
        );
        assert!(matches!(duplicate, Err(HarnessError::DuplicateSample { .. })));
    }

    #[test]
    fn test_aggregate_keeps_declaration_order() {
        let mut run = RunSeries::new(&["zeta", "alpha"]).unwrap();
        for (i, (z, a)) in [(3.0, 1.0), (5.0, 2.0)].into_iter().enumerate() {
            run.append_iteration(
                i as u32 + 1,
                vec![
                    ("zeta".to_string(), Sample::from_millis(z)),
                    ("alpha".to_string(), Sample::from_millis(a)),
                ],
            )
            .unwrap();
        }

        let stats = run.aggregate().unwrap();
        let names: Vec<&str> = stats.keys().map(String::as_str).collect();
        assert_eq!(names, ["zeta", "alpha"]);
        assert_eq!(stats["zeta"].avg, 4.0);
        assert_eq!(stats["alpha"].max, 2.0);
    }
}

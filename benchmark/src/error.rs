// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Errors raised while collecting and reducing samples.

use thiserror::Error;

/// Bookkeeping failures of the driver and the aggregator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HarnessError {
    #[error("Iteration count must be at least 1")]
    ZeroIterations,

    #[error("Scenario declares no metrics")]
    NoMetrics,

    #[error("Metric '{name}' is declared more than once")]
    DuplicateMetric { name: String },

    #[error("Metric name '{name}' is reserved by the report layout")]
    ReservedMetric { name: String },

    #[error("Cannot aggregate empty series for metric '{metric}'")]
    EmptySeries { metric: String },

    #[error("Sample recorded for undeclared metric '{metric}' in iteration {iteration}")]
    UnknownMetric { metric: String, iteration: u32 },

    #[error("Metric '{metric}' was not sampled in iteration {iteration}")]
    MissingSample { metric: String, iteration: u32 },

    #[error("Metric '{metric}' was sampled more than once in iteration {iteration}")]
    DuplicateSample { metric: String, iteration: u32 },
}

/// Failure of a whole run: either the harness bookkeeping or a scenario step.
///
/// Either way the run is over and its partial series are discarded.
#[derive(Debug, Error)]
pub enum RunError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Harness(#[from] HarnessError),

    #[error("Iteration {iteration} failed: {source}")]
    Step {
        iteration: u32,
        #[source]
        source: E,
    },
}

impl<E> RunError<E>
where
    E: std::error::Error + 'static,
{
    /// The step error, if the run was aborted by the scenario.
    pub fn step_error(&self) -> Option<&E> {
        match self {
            RunError::Step { source, .. } => Some(source),
            RunError::Harness(_) => None,
        }
    }
}

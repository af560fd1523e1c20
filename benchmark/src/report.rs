// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! The persisted result of a run.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::HarnessError;
use crate::metrics::{LatencyStats, RunSeries};
use crate::scenario::SourceFile;

/// Unit note written at the top of every report.
pub const REPORT_INFO: &str = "Results are in ms";

/// The payload that was uploaded in every iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFile {
    pub name: String,
    pub size_in_bytes: u64,
}

impl From<&SourceFile> for UploadFile {
    fn from(source: &SourceFile) -> Self {
        Self {
            name: source.name.clone(),
            size_in_bytes: source.size_in_bytes(),
        }
    }
}

/// Result record of a run.
///
/// Serializes as one flat JSON object: `info`, `uploadFile`, then one
/// `{min, max, avg}` entry per metric in the order the scenario declared them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerfReport {
    pub info: String,
    pub upload_file: UploadFile,
    #[serde(flatten)]
    pub metrics: IndexMap<String, LatencyStats>,
}

impl PerfReport {
    /// Assemble a report from precomputed stats.
    pub fn new(upload_file: UploadFile, metrics: IndexMap<String, LatencyStats>) -> Self {
        Self {
            info: REPORT_INFO.to_string(),
            upload_file,
            metrics,
        }
    }

    /// Aggregate every series of a finished run into a report.
    pub fn from_series(upload_file: UploadFile, series: &RunSeries) -> Result<Self, HarnessError> {
        Ok(Self::new(upload_file, series.aggregate()?))
    }

    /// Stats of one metric.
    pub fn metric(&self, name: &str) -> Option<&LatencyStats> {
        self.metrics.get(name)
    }
}

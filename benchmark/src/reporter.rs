// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! JSON report persistence.
//!
//! A report is written as `<output_dir>/<base_name>.json`, replacing any
//! previous file at that path. Timestamped names keep a history of runs.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;

use crate::report::PerfReport;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReporterError {
    #[error("Report I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// JSON reporter for run results.
pub struct JsonReporter {
    /// Output directory for reports
    output_dir: PathBuf,
}

impl JsonReporter {
    /// Create a new JSON reporter, creating the output directory if needed.
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self, ReporterError> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path a report with this base name is written to.
    pub fn path_for(&self, base_name: &str) -> PathBuf {
        self.output_dir.join(format!("{}.json", base_name))
    }

    /// Save a report, fully replacing any existing file at the same path.
    ///
    /// Returns the path to the written file.
    pub fn save(&self, report: &PerfReport, base_name: &str) -> Result<PathBuf, ReporterError> {
        let filepath = self.path_for(base_name);
        Self::write(&filepath, report)?;
        Ok(filepath)
    }

    /// Save a report under `<base_name>_<UTC timestamp>.json`.
    pub fn save_timestamped(
        &self,
        report: &PerfReport,
        base_name: &str,
    ) -> Result<PathBuf, ReporterError> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%SZ");
        self.save(report, &format!("{}_{}", base_name, timestamp))
    }

    /// List all report files in the output directory, sorted by name.
    pub fn list_reports(&self) -> Result<Vec<PathBuf>, ReporterError> {
        let mut reports = Vec::new();
        for entry in fs::read_dir(&self.output_dir)? {
            let path = entry?.path();
            if path.extension().map(|e| e == "json").unwrap_or(false) {
                reports.push(path);
            }
        }
        reports.sort();
        Ok(reports)
    }

    /// Load an existing report from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<PerfReport, ReporterError> {
        let file = File::open(path)?;
        let report = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(report)
    }

    fn write(path: &Path, report: &PerfReport) -> Result<(), ReporterError> {
        // File::create truncates, so no field of a previous report survives
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, report)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

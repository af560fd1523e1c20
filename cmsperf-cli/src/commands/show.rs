// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `cmsperf show` command - Print a saved report.

use std::path::Path;

use cmsperf_benchmark::JsonReporter;

pub fn execute(path: &Path, json: bool) -> anyhow::Result<()> {
    let report = JsonReporter::load(path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Report: {}", path.display());
    println!("{}", report.info);
    println!();
    super::print_summary(&report);

    Ok(())
}

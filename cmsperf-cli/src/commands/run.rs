// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `cmsperf run` command - Time every management call and write the report.

use std::path::{Path, PathBuf};

use clap::Args;
use cmsperf_benchmark::{
    IterationDriver, JsonReporter, ManagementScenario, PerfReport, SourceFile, UploadFile,
};
use cmsperf_core::{ConfigLoader, HttpManagementClient, ManagementApi, RunOverrides};

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Number of measured iterations
    #[arg(short = 'n', long)]
    pub iterations: Option<u64>,

    /// Unmeasured iterations run before measuring
    #[arg(long)]
    pub warmup: Option<u32>,

    /// Binary file uploaded in every iteration
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Directory the report is written to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Report base name, without the .json extension
    #[arg(long)]
    pub name: Option<String>,

    /// Append a UTC timestamp to the report name
    #[arg(long)]
    pub timestamped: bool,
}

impl RunArgs {
    fn overrides(&self) -> RunOverrides {
        RunOverrides {
            iterations: self.iterations,
            warmup: self.warmup,
            source_file: self.source.clone(),
            export_filename: self.name.clone(),
            output_dir: self.output_dir.clone(),
        }
    }
}

pub async fn execute(config_path: &Path, args: RunArgs) -> anyhow::Result<()> {
    let config = ConfigLoader::load_file(config_path)?.with_overrides(args.overrides())?;

    let client = HttpManagementClient::new(&config.api)?;
    let info = client.environment_information().await?;
    tracing::info!(
        project = %info.name,
        environment = %info.environment,
        base_url = %client.base_url(),
        "Connected to environment"
    );

    let source = SourceFile::load(
        &config.run.source_file,
        config.run.source_content_type.as_str(),
    )
    .await?;
    tracing::info!(
        file = %source.name,
        size_in_bytes = source.size_in_bytes(),
        "Loaded source file"
    );

    let reporter = JsonReporter::new(&config.run.output_dir)?;
    let driver = IterationDriver::new(config.run.iterations.value())?.warmup(config.run.warmup);

    println!("cmsperf");
    println!("=======");
    println!("Project:    {} ({})", info.name, info.environment);
    println!("Iterations: {}", driver.iterations());
    println!();

    let mut scenario = ManagementScenario::new(client, source, config.scenario);
    let series = driver.run(&mut scenario).await?;

    let report = PerfReport::from_series(UploadFile::from(scenario.source()), &series)?;
    let path = if args.timestamped {
        reporter.save_timestamped(&report, &config.run.export_filename)?
    } else {
        reporter.save(&report, &config.run.export_filename)?
    };
    tracing::info!(path = %path.display(), "Report written");

    println!();
    super::print_summary(&report);
    println!();
    println!("Report saved to: {}", path.display());

    Ok(())
}

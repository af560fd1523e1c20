// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! cmsperf CLI
//!
//! Command-line interface for benchmarking the content management API.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

/// cmsperf - Latency benchmark for content management API calls
#[derive(Parser)]
#[command(name = "cmsperf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "cmsperf.yaml")]
    pub config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the benchmark and write a JSON report
    Run(commands::run::RunArgs),

    /// Validate a configuration file
    Validate {
        /// Path to the configuration file (defaults to --config)
        file: Option<PathBuf>,
    },

    /// Print a previously written report
    Show {
        /// Path to the report file
        report: PathBuf,

        /// Print the raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbosity flag
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Run(args) => commands::run::execute(&cli.config, args).await,
        Commands::Validate { file } => {
            commands::validate::execute(file.as_deref().unwrap_or(&cli.config))
        }
        Commands::Show { report, json } => commands::show::execute(&report, json),
    }
}

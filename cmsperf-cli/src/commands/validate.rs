// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `cmsperf validate` command - Validate configuration file.

use std::path::Path;

use cmsperf_core::{ConfigLoader, ElementValue};

pub fn execute(file: &Path) -> anyhow::Result<()> {
    tracing::info!(file = %file.display(), "Validating configuration");

    match ConfigLoader::load_file(file) {
        Ok(config) => {
            println!("✓ Configuration is valid");
            println!();
            println!("API Settings:");
            println!("  Endpoint:        {}", config.api.endpoint);
            println!("  Environment ID:  {}", config.api.environment_id);
            println!("  API Key:         {}", config.api.api_key);
            println!();
            println!("Run Settings:");
            println!("  Iterations:      {}", config.run.iterations);
            println!("  Warmup:          {}", config.run.warmup);
            println!(
                "  Source File:     {} ({})",
                config.run.source_file.display(),
                config.run.source_content_type
            );
            println!(
                "  Report:          {}",
                config
                    .run
                    .output_dir
                    .join(format!("{}.json", config.run.export_filename))
                    .display()
            );
            println!();
            println!(
                "Scenario (type: {}, language: {}):",
                config.scenario.content_type, config.scenario.language
            );
            for element in &config.scenario.elements {
                let value = match &element.value {
                    ElementValue::Number(n) => n.to_string(),
                    ElementValue::Text(t) => format!("{:?}", t),
                };
                println!("  - {} = {}", element.codename, value);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed:");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}

// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! YAML configuration parser with strict validation.
//!
//! The configuration is validated once, before the first request is sent.
//! Any invalid field results in a HardValidationError that prevents the run.
//! Credentials may come from the environment instead of the file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{HardValidationError, PerfError, PerfResult};
use crate::requests::ElementValue;
use crate::types::{ApiKey, Codename, Endpoint, EnvironmentId, IterationCount};

/// Environment variable that overrides `api.environment_id`.
pub const ENV_ENVIRONMENT_ID: &str = "CMSPERF_ENVIRONMENT_ID";
/// Environment variable that overrides `api.api_key`.
pub const ENV_API_KEY: &str = "CMSPERF_API_KEY";

/// Raw API section as parsed from YAML (before validation).
#[derive(Debug, Deserialize)]
struct RawApiConfig {
    #[serde(default)]
    environment_id: Option<String>,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default = "default_endpoint")]
    endpoint: String,
}

fn default_endpoint() -> String {
    "https://manage.kontent.ai/v2".to_string()
}

impl Default for RawApiConfig {
    fn default() -> Self {
        Self {
            environment_id: None,
            api_key: None,
            endpoint: default_endpoint(),
        }
    }
}

/// Raw run section.
#[derive(Debug, Deserialize)]
struct RawRunConfig {
    #[serde(default = "default_iterations")]
    iterations: u64,
    #[serde(default)]
    warmup: u32,
    #[serde(default = "default_source_file")]
    source_file: String,
    #[serde(default = "default_source_content_type")]
    source_content_type: String,
    #[serde(default = "default_export_filename")]
    export_filename: String,
    #[serde(default = "default_output_dir")]
    output_dir: String,
}

fn default_iterations() -> u64 {
    u64::from(IterationCount::DEFAULT)
}

fn default_source_file() -> String {
    "source-image.jpg".to_string()
}

fn default_source_content_type() -> String {
    "image/jpeg".to_string()
}

fn default_export_filename() -> String {
    "perf-result".to_string()
}

fn default_output_dir() -> String {
    ".".to_string()
}

impl Default for RawRunConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            warmup: 0,
            source_file: default_source_file(),
            source_content_type: default_source_content_type(),
            export_filename: default_export_filename(),
            output_dir: default_output_dir(),
        }
    }
}

/// Raw scenario section.
#[derive(Debug, Deserialize)]
struct RawScenarioConfig {
    #[serde(default = "default_content_type")]
    content_type: String,
    #[serde(default = "default_language")]
    language: String,
    #[serde(default = "default_elements")]
    elements: Vec<RawElementConfig>,
}

/// One element written by the language-variant upsert.
#[derive(Debug, Deserialize)]
struct RawElementConfig {
    codename: String,
    value: ElementValue,
}

fn default_content_type() -> String {
    "deal".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_elements() -> Vec<RawElementConfig> {
    vec![
        RawElementConfig {
            codename: "alternate_note".to_string(),
            value: ElementValue::Text("Perf Test Content Item".to_string()),
        },
        RawElementConfig {
            codename: "campaign_tracking_code".to_string(),
            value: ElementValue::Text("Perf Test Content Item".to_string()),
        },
        RawElementConfig {
            codename: "amount".to_string(),
            value: ElementValue::Number(100.0),
        },
    ]
}

impl Default for RawScenarioConfig {
    fn default() -> Self {
        Self {
            content_type: default_content_type(),
            language: default_language(),
            elements: default_elements(),
        }
    }
}

/// Raw root configuration file.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    api: RawApiConfig,
    #[serde(default)]
    run: RawRunConfig,
    #[serde(default)]
    scenario: RawScenarioConfig,
}

/// Validated connection settings for the management API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub environment_id: EnvironmentId,
    pub api_key: ApiKey,
    pub endpoint: Endpoint,
}

/// Validated measurement settings.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub iterations: IterationCount,
    pub warmup: u32,
    pub source_file: PathBuf,
    pub source_content_type: String,
    pub export_filename: String,
    pub output_dir: PathBuf,
}

/// Validated content model used by the content-item steps.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    pub content_type: Codename,
    pub language: Codename,
    pub elements: Vec<ElementConfig>,
}

/// Validated language-variant element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementConfig {
    pub codename: Codename,
    pub value: ElementValue,
}

/// Complete validated configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub run: RunConfig,
    pub scenario: ScenarioConfig,
}

/// Command-line overrides applied on top of a loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub iterations: Option<u64>,
    pub warmup: Option<u32>,
    pub source_file: Option<PathBuf>,
    pub export_filename: Option<String>,
    pub output_dir: Option<PathBuf>,
}

impl Config {
    /// Apply command-line overrides, re-validating every overridden value.
    pub fn with_overrides(mut self, overrides: RunOverrides) -> PerfResult<Self> {
        if let Some(iterations) = overrides.iterations {
            self.run.iterations = IterationCount::new(iterations)?;
        }
        if let Some(warmup) = overrides.warmup {
            self.run.warmup = warmup;
        }
        if let Some(source_file) = overrides.source_file {
            self.run.source_file = source_file;
        }
        if let Some(name) = overrides.export_filename {
            self.run.export_filename = ConfigLoader::validate_export_filename(name)?;
        }
        if let Some(output_dir) = overrides.output_dir {
            self.run.output_dir = output_dir;
        }
        Ok(self)
    }
}

/// Configuration loader with strict validation.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a YAML file.
    /// Credentials in the process environment take precedence over the file.
    pub fn load_file(path: impl AsRef<Path>) -> PerfResult<Config> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(PerfError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| PerfError::Io {
            context: "reading config file",
            source: e,
        })?;

        Self::load_string(&content)
    }

    /// Load and validate configuration from a YAML string, consulting the
    /// process environment for credentials.
    pub fn load_string(content: &str) -> PerfResult<Config> {
        Self::load_string_with_env(content, |key| std::env::var(key).ok())
    }

    /// Load and validate configuration from a YAML string with an explicit
    /// environment lookup.
    pub fn load_string_with_env<F>(content: &str, env: F) -> PerfResult<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw: RawConfig = if content.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| PerfError::ConfigParse {
                message: format!("YAML parse error: {}", e),
            })?
        };

        Self::validate(raw, env)
    }

    /// Validate raw configuration and convert to validated types.
    fn validate<F>(raw: RawConfig, env: F) -> PerfResult<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api = Self::validate_api(raw.api, &env)?;
        let run = Self::validate_run(raw.run)?;
        let scenario = Self::validate_scenario(raw.scenario)?;

        Ok(Config { api, run, scenario })
    }

    fn validate_api<F>(raw: RawApiConfig, env: &F) -> PerfResult<ApiConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment_id = env(ENV_ENVIRONMENT_ID)
            .or(raw.environment_id)
            .unwrap_or_default();
        let api_key = env(ENV_API_KEY).or(raw.api_key).unwrap_or_default();

        Ok(ApiConfig {
            environment_id: EnvironmentId::new(environment_id)?,
            api_key: ApiKey::new(api_key)?,
            endpoint: Endpoint::new(raw.endpoint)?,
        })
    }

    fn validate_run(raw: RawRunConfig) -> PerfResult<RunConfig> {
        let iterations = IterationCount::new(raw.iterations)?;

        if raw.source_file.trim().is_empty() {
            return Err(HardValidationError::MissingRequiredField {
                field: "source_file",
                context: "run section".to_string(),
            }
            .into());
        }

        // type/subtype, e.g. image/jpeg
        let mut parts = raw.source_content_type.splitn(2, '/');
        let valid_mime = matches!(
            (parts.next(), parts.next()),
            (Some(ty), Some(sub)) if !ty.is_empty() && !sub.is_empty()
        );
        if !valid_mime {
            return Err(HardValidationError::InvalidFieldValue {
                field: "source_content_type",
                value: raw.source_content_type,
                reason: "Must be a MIME type such as image/jpeg".to_string(),
            }
            .into());
        }

        Ok(RunConfig {
            iterations,
            warmup: raw.warmup,
            source_file: PathBuf::from(raw.source_file),
            source_content_type: raw.source_content_type,
            export_filename: Self::validate_export_filename(raw.export_filename)?,
            output_dir: PathBuf::from(raw.output_dir),
        })
    }

    fn validate_scenario(raw: RawScenarioConfig) -> PerfResult<ScenarioConfig> {
        let elements = raw
            .elements
            .into_iter()
            .map(|element| {
                Ok(ElementConfig {
                    codename: Codename::new(element.codename)?,
                    value: element.value,
                })
            })
            .collect::<PerfResult<Vec<_>>>()?;

        Ok(ScenarioConfig {
            content_type: Codename::new(raw.content_type)?,
            language: Codename::new(raw.language)?,
            elements,
        })
    }

    /// The export name is a file stem; the reporter adds the directory and extension.
    fn validate_export_filename(name: String) -> Result<String, HardValidationError> {
        if name.trim().is_empty() {
            return Err(HardValidationError::MissingRequiredField {
                field: "export_filename",
                context: "run section".to_string(),
            });
        }
        if name.contains(['/', '\\']) {
            return Err(HardValidationError::InvalidFieldValue {
                field: "export_filename",
                value: name,
                reason: "Export filename must not contain path separators".to_string(),
            });
        }
        Ok(name)
    }
}

// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! cmsperf Core Library
//!
//! Configuration, error types and the management API client used by the
//! cmsperf latency benchmark.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod requests;
pub mod types;

// Re-export commonly used types
pub use api::ManagementApi;
pub use client::HttpManagementClient;
pub use config::{
    ApiConfig, Config, ConfigLoader, ElementConfig, RunConfig, RunOverrides, ScenarioConfig,
};
pub use error::{ApiError, HardValidationError, PerfError, PerfResult};
pub use requests::{
    AssetRequest, BinaryUpload, ContentItemRequest, ElementValue, EnvironmentInfo, FileReference,
    LanguageVariantRequest,
};
pub use types::{ApiKey, Codename, Endpoint, EnvironmentId, IterationCount};

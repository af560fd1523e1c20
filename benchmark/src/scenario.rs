// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Scenarios: the ordered, named steps of one iteration.
//!
//! [`ManagementScenario`] is the measured workload: an asset flow followed by
//! a content-item flow against a [`ManagementApi`].

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use cmsperf_core::{
    ApiError, AssetRequest, BinaryUpload, Codename, ContentItemRequest, LanguageVariantRequest,
    ManagementApi, PerfError, PerfResult, ScenarioConfig,
};
use uuid::Uuid;

use crate::harness::IterationRecorder;

/// A repeatable unit of work with a fixed set of named, timed steps.
#[async_trait]
pub trait Scenario: Send {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Metric names, in report order. Each must be sampled exactly once per iteration.
    fn metrics(&self) -> &[&'static str];

    /// Run one iteration, timing each step through `recorder`.
    async fn run_iteration(
        &mut self,
        iteration: u32,
        recorder: &mut IterationRecorder,
    ) -> Result<(), Self::Error>;
}

pub const VIEW_ASSET: &str = "viewAsset";
pub const UPLOAD_BINARY_DATA: &str = "uploadBinaryData";
pub const CREATE_ASSET: &str = "createAsset";
pub const VIEW_CONTENT_ITEM: &str = "viewContentItem";
pub const CREATE_CONTENT_ITEM: &str = "createContentItem";
pub const UPSERT_LANGUAGE_VARIANT: &str = "upsertLanguageVariant";
pub const PUBLISH_VARIANT: &str = "publishVariant";

/// Metrics of [`ManagementScenario`], in report order.
pub const MANAGEMENT_METRICS: [&str; 7] = [
    VIEW_ASSET,
    UPLOAD_BINARY_DATA,
    CREATE_ASSET,
    VIEW_CONTENT_ITEM,
    CREATE_CONTENT_ITEM,
    UPSERT_LANGUAGE_VARIANT,
    PUBLISH_VARIANT,
];

/// The binary payload uploaded in every iteration.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Name as configured; also used in asset titles and the report.
    pub name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl SourceFile {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Read the payload from disk.
    pub async fn load(path: impl AsRef<Path>, content_type: impl Into<String>) -> PerfResult<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await.map_err(|e| PerfError::Io {
            context: "reading source file",
            source: e,
        })?;
        Ok(Self::new(path.display().to_string(), content_type, data))
    }

    pub fn size_in_bytes(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Random lowercase hex suffix for names, codenames and probe ids.
fn random_suffix() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Asset flow then content-item flow, seven timed calls per iteration.
pub struct ManagementScenario<C> {
    client: C,
    source: SourceFile,
    config: ScenarioConfig,
}

impl<C> ManagementScenario<C>
where
    C: ManagementApi,
{
    pub fn new(client: C, source: SourceFile, config: ScenarioConfig) -> Self {
        Self {
            client,
            source,
            config,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn source(&self) -> &SourceFile {
        &self.source
    }

    async fn run_asset_flow(
        &self,
        iteration: u32,
        recorder: &mut IterationRecorder,
    ) -> PerfResult<()> {
        tracing::info!(iteration, "Handling asset");

        let asset_id = random_suffix();
        recorder
            .probe(
                VIEW_ASSET,
                self.client.view_asset(&asset_id),
                ApiError::is_not_found,
            )
            .await?;

        let upload = BinaryUpload::new(
            random_suffix(),
            self.source.content_type.as_str(),
            self.source.data.clone(),
        );
        let file_reference = recorder
            .time(UPLOAD_BINARY_DATA, self.client.upload_binary(&upload))
            .await?;

        let request = AssetRequest::new(
            file_reference,
            format!("{} - {}", self.source.name, random_suffix()),
        );
        recorder
            .time(CREATE_ASSET, self.client.add_asset(&request))
            .await?;

        Ok(())
    }

    async fn run_content_item_flow(
        &self,
        iteration: u32,
        recorder: &mut IterationRecorder,
    ) -> PerfResult<()> {
        tracing::info!(iteration, "Handling new content item");

        let codename = Codename::new(format!("perf_item_{}", random_suffix()))?;
        tracing::debug!(codename = %codename, "Checking if content item exists");
        recorder
            .probe(
                VIEW_CONTENT_ITEM,
                self.client.view_content_item(&codename),
                ApiError::is_not_found,
            )
            .await?;

        let item = ContentItemRequest::new(
            format!("Perf Test Content Item - {}", random_suffix()),
            codename.clone(),
            self.config.content_type.clone(),
        );
        recorder
            .time(CREATE_CONTENT_ITEM, self.client.add_content_item(&item))
            .await?;

        let variant = self.config.elements.iter().fold(
            LanguageVariantRequest::new(codename.clone(), self.config.language.clone()),
            |request, element| request.element(element.codename.clone(), element.value.clone()),
        );
        recorder
            .time(
                UPSERT_LANGUAGE_VARIANT,
                self.client.upsert_language_variant(&variant),
            )
            .await?;

        recorder
            .time(
                PUBLISH_VARIANT,
                self.client
                    .publish_language_variant(&codename, &self.config.language),
            )
            .await?;

        Ok(())
    }
}

#[async_trait]
impl<C> Scenario for ManagementScenario<C>
where
    C: ManagementApi,
{
    type Error = PerfError;

    fn metrics(&self) -> &[&'static str] {
        &MANAGEMENT_METRICS
    }

    async fn run_iteration(
        &mut self,
        iteration: u32,
        recorder: &mut IterationRecorder,
    ) -> Result<(), PerfError> {
        self.run_asset_flow(iteration, recorder).await?;
        self.run_content_item_flow(iteration, recorder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_suffix_is_codename_safe() {
        let suffix = random_suffix();
        assert_eq!(suffix.len(), 32);
        assert!(Codename::new(format!("perf_item_{}", suffix)).is_ok());
        assert_ne!(suffix, random_suffix());
    }

    #[tokio::test]
    async fn test_source_file_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("image.jpg");
        std::fs::write(&path, [1u8, 2, 3, 4, 5]).unwrap();

        let source = SourceFile::load(&path, "image/jpeg").await.unwrap();
        assert_eq!(source.size_in_bytes(), 5);
        assert_eq!(source.content_type, "image/jpeg");
        assert!(source.name.ends_with("image.jpg"));
    }

    #[tokio::test]
    async fn test_source_file_missing() {
        let result = SourceFile::load("/nonexistent/image.jpg", "image/jpeg").await;
        assert!(matches!(result, Err(PerfError::Io { .. })));
    }
}

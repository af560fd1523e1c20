// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! The management API calls whose latency is measured.
//!
//! The benchmark only ever talks to this trait, so the scenario can be driven
//! by the HTTP client in production and by an in-memory fake in tests.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::requests::{
    AssetRequest, BinaryUpload, ContentItemRequest, EnvironmentInfo, FileReference,
    LanguageVariantRequest,
};
use crate::types::Codename;

/// Remote operations of a content-management environment.
///
/// Every call is a single request/response round trip. Implementations must
/// not retry: a failure is reported exactly as it happened.
#[async_trait]
pub trait ManagementApi: Send + Sync {
    /// Look up the project and environment names.
    async fn environment_information(&self) -> Result<EnvironmentInfo, ApiError>;

    /// Fetch an asset by id. Unknown ids fail with a not-found status.
    async fn view_asset(&self, asset_id: &str) -> Result<(), ApiError>;

    /// Upload a binary payload and return a reference to it.
    async fn upload_binary(&self, upload: &BinaryUpload) -> Result<FileReference, ApiError>;

    /// Create an asset around an uploaded file.
    async fn add_asset(&self, request: &AssetRequest) -> Result<(), ApiError>;

    /// Fetch a content item by codename. Unknown codenames fail with a not-found status.
    async fn view_content_item(&self, codename: &Codename) -> Result<(), ApiError>;

    /// Create a content item.
    async fn add_content_item(&self, request: &ContentItemRequest) -> Result<(), ApiError>;

    /// Create or replace a language variant.
    async fn upsert_language_variant(
        &self,
        request: &LanguageVariantRequest,
    ) -> Result<(), ApiError>;

    /// Publish a language variant.
    async fn publish_language_variant(
        &self,
        item: &Codename,
        language: &Codename,
    ) -> Result<(), ApiError>;
}

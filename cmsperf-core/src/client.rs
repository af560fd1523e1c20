// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! HTTP implementation of [`ManagementApi`] on top of `reqwest`.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use bytes::Bytes;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::api::ManagementApi;
use crate::config::ApiConfig;
use crate::error::{ApiError, PerfError, PerfResult};
use crate::requests::{
    AssetRequest, BinaryUpload, ContentItemRequest, EnvironmentInfo, FileReference,
    LanguageVariantRequest,
};
use crate::types::{ApiKey, Codename};

/// Management API client bound to one environment.
///
/// Holds a single connection pool for the whole run; it is created from an
/// [`ApiConfig`] and handed to the scenario explicitly.
#[derive(Debug, Clone)]
pub struct HttpManagementClient {
    client: Client,
    base_url: String,
    api_key: ApiKey,
}

impl HttpManagementClient {
    /// Build a client for the configured endpoint and environment.
    pub fn new(config: &ApiConfig) -> PerfResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("cmsperf/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                PerfError::Api(ApiError::Transport {
                    operation: "buildClient",
                    message: e.to_string(),
                })
            })?;

        Ok(Self {
            client,
            base_url: format!(
                "{}/projects/{}",
                config.endpoint.as_str(),
                config.environment_id.as_str()
            ),
            api_key: config.api_key.clone(),
        })
    }

    /// Base URL including the environment segment.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and read the whole response body.
    ///
    /// Non-success statuses become [`ApiError::Status`]. The body is drained on
    /// every path, so a call ends when its result is fully received and the
    /// connection goes back to the pool.
    async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<Bytes, ApiError> {
        let response = request
            .bearer_auth(self.api_key.expose())
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                operation,
                message: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            let body = response.bytes().await.map_err(|e| ApiError::Transport {
                operation,
                message: e.to_string(),
            })?;
            tracing::trace!(operation, status = status.as_u16(), "Request succeeded");
            return Ok(body);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            operation,
            status: status.as_u16(),
            body,
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self.send(operation, request).await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode {
            operation,
            message: e.to_string(),
        })
    }

    fn variant_path(item: &Codename, language: &Codename) -> String {
        format!(
            "/items/codename/{}/variants/codename/{}",
            item.as_str(),
            language.as_str()
        )
    }
}

#[async_trait]
impl ManagementApi for HttpManagementClient {
    async fn environment_information(&self) -> Result<EnvironmentInfo, ApiError> {
        let request = self.client.get(&self.base_url);
        self.send_json("environmentInformation", request).await
    }

    async fn view_asset(&self, asset_id: &str) -> Result<(), ApiError> {
        let request = self.client.get(self.url(&format!("/assets/{}", asset_id)));
        self.send("viewAsset", request).await.map(drop)
    }

    async fn upload_binary(&self, upload: &BinaryUpload) -> Result<FileReference, ApiError> {
        let request = self
            .client
            .post(self.url(&format!("/files/{}", upload.file_name)))
            .header(CONTENT_TYPE, upload.content_type.as_str())
            .body(upload.data.clone());
        self.send_json("uploadBinaryData", request).await
    }

    async fn add_asset(&self, request: &AssetRequest) -> Result<(), ApiError> {
        let request = self.client.post(self.url("/assets")).json(request);
        self.send("createAsset", request).await.map(drop)
    }

    async fn view_content_item(&self, codename: &Codename) -> Result<(), ApiError> {
        let request = self
            .client
            .get(self.url(&format!("/items/codename/{}", codename.as_str())));
        self.send("viewContentItem", request).await.map(drop)
    }

    async fn add_content_item(&self, request: &ContentItemRequest) -> Result<(), ApiError> {
        let request = self.client.post(self.url("/items")).json(request);
        self.send("createContentItem", request).await.map(drop)
    }

    async fn upsert_language_variant(
        &self,
        request: &LanguageVariantRequest,
    ) -> Result<(), ApiError> {
        let path = Self::variant_path(&request.item, &request.language);
        let http = self.client.put(self.url(&path)).json(&request.body());
        self.send("upsertLanguageVariant", http).await.map(drop)
    }

    async fn publish_language_variant(
        &self,
        item: &Codename,
        language: &Codename,
    ) -> Result<(), ApiError> {
        let path = format!("{}/publish", Self::variant_path(item, language));
        let request = self.client.put(self.url(&path));
        self.send("publishVariant", request).await.map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Endpoint, EnvironmentId};

    fn config(endpoint: &str) -> ApiConfig {
        ApiConfig {
            environment_id: EnvironmentId::new("env-1").unwrap(),
            api_key: ApiKey::new("key").unwrap(),
            endpoint: Endpoint::new(endpoint).unwrap(),
        }
    }

    #[test]
    fn test_base_url() {
        let client = HttpManagementClient::new(&config("https://manage.kontent.ai/v2/")).unwrap();
        assert_eq!(client.base_url(), "https://manage.kontent.ai/v2/projects/env-1");
        assert_eq!(
            client.url("/assets/abc"),
            "https://manage.kontent.ai/v2/projects/env-1/assets/abc"
        );
    }

    #[test]
    fn test_variant_path() {
        let item = Codename::new("perf_deal_1").unwrap();
        let language = Codename::new("en").unwrap();
        assert_eq!(
            HttpManagementClient::variant_path(&item, &language),
            "/items/codename/perf_deal_1/variants/codename/en"
        );
    }
}

// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Newtype wrappers for validated inputs.
//!
//! Each type checks its invariants at creation time, so a value that exists
//! is always safe to put into a request path or a loop bound.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::HardValidationError;

/// Maximum codename length accepted by the management API.
const MAX_CODENAME_LEN: usize = 60;

/// Number of measured iterations. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationCount(u32);

impl IterationCount {
    /// Default iteration count for a run.
    pub const DEFAULT: u32 = 100;

    /// Create a new IterationCount with validation.
    pub fn new(count: u64) -> Result<Self, HardValidationError> {
        if count == 0 || count > u64::from(u32::MAX) {
            return Err(HardValidationError::InvalidIterationCount { count });
        }
        Ok(Self(count as u32))
    }

    /// Get the inner count.
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl Default for IterationCount {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for IterationCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated codename of an item, type, element or language.
/// Lowercase ASCII letters, digits and underscores, must not start with a digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Codename(String);

impl Codename {
    /// Create a new Codename with validation.
    pub fn new(codename: impl Into<String>) -> Result<Self, HardValidationError> {
        let codename = codename.into();

        if codename.is_empty() {
            return Err(HardValidationError::InvalidFieldValue {
                field: "codename",
                value: codename,
                reason: "Codename cannot be empty".to_string(),
            });
        }

        if codename.len() > MAX_CODENAME_LEN {
            return Err(HardValidationError::InvalidFieldValue {
                field: "codename",
                value: codename.clone(),
                reason: format!(
                    "Codename too long: {} chars (max {})",
                    codename.len(),
                    MAX_CODENAME_LEN
                ),
            });
        }

        if codename.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(HardValidationError::InvalidFieldValue {
                field: "codename",
                value: codename,
                reason: "Codename cannot start with a digit".to_string(),
            });
        }

        if !codename
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(HardValidationError::InvalidFieldValue {
                field: "codename",
                value: codename,
                reason: "Codename must contain only lowercase letters, digits and underscores"
                    .to_string(),
            });
        }

        Ok(Self(codename))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Codename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Codename {
    type Error = HardValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Codename> for String {
    fn from(codename: Codename) -> Self {
        codename.0
    }
}

/// Validated environment (project) identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentId(String);

impl EnvironmentId {
    /// Create a new EnvironmentId with validation.
    pub fn new(id: impl Into<String>) -> Result<Self, HardValidationError> {
        let id = id.into();
        let trimmed = id.trim();

        if trimmed.is_empty() {
            return Err(HardValidationError::MissingRequiredField {
                field: "environment_id",
                context: "api section".to_string(),
            });
        }

        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(HardValidationError::InvalidFieldValue {
                field: "environment_id",
                value: id.clone(),
                reason: "Environment ID must contain only alphanumeric characters and hyphens"
                    .to_string(),
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EnvironmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Management API key. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create a new ApiKey with validation.
    pub fn new(key: impl Into<String>) -> Result<Self, HardValidationError> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return Err(HardValidationError::MissingRequiredField {
                field: "api_key",
                context: "api section".to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Expose the secret for the `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Validated base URL of the management API, stored without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint(String);

impl Endpoint {
    /// Create a new Endpoint with validation.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, HardValidationError> {
        let endpoint = endpoint.into();
        let trimmed = endpoint.trim().trim_end_matches('/');

        let rest = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .ok_or_else(|| HardValidationError::InvalidEndpoint {
                endpoint: endpoint.clone(),
                reason: "Endpoint must start with http:// or https://".to_string(),
            })?;

        if rest.is_empty() || rest.starts_with('/') {
            return Err(HardValidationError::InvalidEndpoint {
                endpoint: endpoint.clone(),
                reason: "Endpoint is missing a host".to_string(),
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Get the base URL.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

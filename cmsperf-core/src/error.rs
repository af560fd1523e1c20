// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Custom error types for cmsperf.
//!
//! Every failure is an explicit enum variant. Library code never returns
//! `Box<dyn Error>` or `anyhow::Result`; only the binary flattens errors.

use std::path::PathBuf;

use thiserror::Error;

/// HTTP status the management API returns for a resource that does not exist.
const NOT_FOUND: u16 = 404;

/// Top-level error type for cmsperf.
#[derive(Debug, Error)]
pub enum PerfError {
    // =========================================================================
    // Configuration Errors - Fail-Fast on Invalid Config
    // =========================================================================
    #[error("Hard validation error: {0}")]
    HardValidation(#[from] HardValidationError),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    // =========================================================================
    // Remote Errors - No Retry
    // =========================================================================
    #[error("Management API error: {0}")]
    Api(#[from] ApiError),

    // =========================================================================
    // System Errors
    // =========================================================================
    #[error("IO error: {context} - {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Hard validation errors abort the run before any request is sent.
#[derive(Debug, Error)]
pub enum HardValidationError {
    #[error("Missing required field: {field} in {context}")]
    MissingRequiredField {
        field: &'static str,
        context: String,
    },

    #[error("Invalid field value: {field} = {value} - {reason}")]
    InvalidFieldValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Iteration count must be at least 1, got {count}")]
    InvalidIterationCount { count: u64 },

    #[error("Invalid endpoint: {endpoint} - {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

/// Errors raised by a management API call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{operation} returned HTTP {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("{operation} transport failure: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },

    #[error("{operation} response could not be decoded: {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },
}

impl ApiError {
    /// True when the remote side reported that the requested resource does not exist.
    ///
    /// This is the expected-absence predicate used when probing for assets and
    /// content items that were never created.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status, .. } if *status == NOT_FOUND)
    }

    /// Name of the operation that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            ApiError::Status { operation, .. }
            | ApiError::Transport { operation, .. }
            | ApiError::Decode { operation, .. } => operation,
        }
    }
}

/// Result type alias using PerfError.
pub type PerfResult<T> = Result<T, PerfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hard_validation_error_display() {
        let err = HardValidationError::MissingRequiredField {
            field: "environment_id",
            context: "api section".to_string(),
        };
        assert!(err.to_string().contains("environment_id"));
        assert!(err.to_string().contains("api section"));
    }

    #[test]
    fn test_error_chain() {
        let validation_err = HardValidationError::InvalidIterationCount { count: 0 };
        let perf_err: PerfError = validation_err.into();
        assert!(matches!(perf_err, PerfError::HardValidation(_)));

        let api_err = ApiError::Transport {
            operation: "viewAsset",
            message: "connection refused".to_string(),
        };
        let perf_err: PerfError = api_err.into();
        assert!(matches!(perf_err, PerfError::Api(_)));
    }

    #[test]
    fn test_not_found_classification() {
        let not_found = ApiError::Status {
            operation: "viewAsset",
            status: 404,
            body: String::new(),
        };
        assert!(not_found.is_not_found());
        assert_eq!(not_found.operation(), "viewAsset");

        let forbidden = ApiError::Status {
            operation: "viewAsset",
            status: 403,
            body: "forbidden".to_string(),
        };
        assert!(!forbidden.is_not_found());

        let transport = ApiError::Transport {
            operation: "viewAsset",
            message: "timeout".to_string(),
        };
        assert!(!transport.is_not_found());
    }
}

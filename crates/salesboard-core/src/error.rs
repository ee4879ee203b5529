//! Error types for salesboard-core
//!
//! `DataFetchError` is the only error the analytics path can produce; it
//! comes from the repository and reaches callers unchanged. `CoreError`
//! covers configuration, periods and file output.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while querying the sales backend
#[derive(Error, Debug)]
pub enum DataFetchError {
    #[error("Request failed while fetching {operation}")]
    Transport {
        operation: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Backend returned HTTP {status} while fetching {operation}: {body}")]
    Status {
        operation: String,
        status: u16,
        body: String,
    },

    #[error("Failed to decode {operation} response: {message}")]
    Decode {
        operation: String,
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl DataFetchError {
    /// True when retrying the same request may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            DataFetchError::Decode { .. } => false,
            DataFetchError::Transport { .. } => true,
            DataFetchError::Status { status, .. } => *status == 429 || *status >= 500,
        }
    }
}

/// Core error type for salesboard operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // IO Errors
    // ===================
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ===================
    // Config Errors
    // ===================
    #[error("Failed to parse config in {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    // ===================
    // Period Errors
    // ===================
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid date: {input}")]
    InvalidDate { input: String },

    #[error("Date range {start} to {end} has no comparison window inside the supported calendar")]
    RangeOutOfBounds {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    // ===================
    // Fetch Errors
    // ===================
    #[error(transparent)]
    Fetch(#[from] DataFetchError),
}

/// Where the data behind a report came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSource {
    /// Fetched from the configured backend
    Live,
    /// Fixed sample dataset (no usable backend)
    Sample { reason: String },
}

impl DataSource {
    pub fn is_live(&self) -> bool {
        matches!(self, DataSource::Live)
    }

    pub fn is_sample(&self) -> bool {
        !self.is_live()
    }

    /// Short label for banners and health output
    pub fn label(&self) -> &'static str {
        match self {
            DataSource::Live => "live",
            DataSource::Sample { .. } => "sample",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_retryability() {
        let server = DataFetchError::Status {
            operation: "sales".to_string(),
            status: 503,
            body: String::new(),
        };
        let client = DataFetchError::Status {
            operation: "sales".to_string(),
            status: 401,
            body: "invalid api key".to_string(),
        };
        assert!(server.is_retryable());
        assert!(!client.is_retryable());
    }

    #[test]
    fn test_fetch_error_converts_into_core_error() {
        let err: CoreError = DataFetchError::Status {
            operation: "products".to_string(),
            status: 401,
            body: "invalid api key".to_string(),
        }
        .into();
        assert!(matches!(
            err,
            CoreError::Fetch(DataFetchError::Status { status: 401, .. })
        ));
        assert_eq!(
            err.to_string(),
            "Backend returned HTTP 401 while fetching products: invalid api key"
        );
    }

    #[test]
    fn test_data_source_serialization() {
        let sample = DataSource::Sample {
            reason: "no backend".to_string(),
        };
        let value = serde_json::to_value(&sample).unwrap();
        assert_eq!(value["kind"], "sample");
        assert_eq!(value["reason"], "no backend");
        assert!(sample.is_sample());
        assert_eq!(DataSource::Live.label(), "live");
    }
}

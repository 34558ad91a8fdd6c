//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`DexNavigatorError`] which covers every failure mode of the
//! catalog client, the result cache and the command layer. It uses `thiserror` for
//! ergonomic error definitions and includes constructors for the common cases.
//!
//! # Public API
//! - [`DexNavigatorError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, DexNavigatorError>`
//!
//! # Error Categories
//! - **Remote source**: network/status failures and malformed response bodies
//! - **Key validation**: non-numeric or out-of-range catalog keys
//! - **Configuration**: config directory, read, parse and write failures
//!
//! The enum is `Clone` because a single in-flight fetch delivers its outcome to
//! every caller waiting on it. Wrapped std/serde errors are therefore held in `Arc`.

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Domain-specific error types for dex-navigator
#[derive(Error, Debug, Clone)]
pub enum DexNavigatorError {
    // Remote source errors
    #[error("{}: {reason}", describe_fetch(.key))]
    FetchFailed { key: Option<u32>, reason: String },

    #[error("Malformed response for {}: {reason}", describe_target(.key))]
    DecodeFailed { key: Option<u32>, reason: String },

    #[error("Failed to build HTTP client: {reason}")]
    HttpClientBuild { reason: String },

    #[error("The catalog index is empty")]
    EmptyCatalog,

    // Key validation errors
    #[error("Invalid key: '{input}'. Use a positive number like 25")]
    InvalidKey { input: String },

    #[error("Not a valid entry: #{key} is outside the catalog (1-{max})")]
    KeyOutOfRange { key: u32, max: u32 },

    // Configuration errors
    #[error("Could not find config directory")]
    ConfigDirectoryNotFound,

    #[error("Failed to read config file '{path}': {source}")]
    ConfigReadFailed {
        path: PathBuf,
        source: Arc<std::io::Error>,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: Arc<serde_json::Error>,
    },

    #[error("Failed to write config file '{path}': {source}")]
    ConfigWriteFailed {
        path: PathBuf,
        source: Arc<std::io::Error>,
    },

    #[error("IO error: {0}")]
    Io(Arc<std::io::Error>),

    #[error("JSON serialization error: {0}")]
    Json(Arc<serde_json::Error>),
}

/// Convenience type alias for Results using DexNavigatorError
pub type Result<T> = std::result::Result<T, DexNavigatorError>;

fn describe_fetch(key: &Option<u32>) -> String {
    match key {
        Some(key) => format!("Failed to fetch Pokémon #{key}"),
        None => "Failed to fetch Pokémon list".to_string(),
    }
}

fn describe_target(key: &Option<u32>) -> String {
    match key {
        Some(key) => format!("Pokémon #{key}"),
        None => "Pokémon list".to_string(),
    }
}

impl From<std::io::Error> for DexNavigatorError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

impl From<serde_json::Error> for DexNavigatorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(Arc::new(err))
    }
}

impl DexNavigatorError {
    /// Create a fetch failure for the index (`None`) or a detail record
    pub fn fetch_failed(key: Option<u32>, reason: impl Into<String>) -> Self {
        Self::FetchFailed {
            key,
            reason: reason.into(),
        }
    }

    /// Create a decode failure for the index (`None`) or a detail record
    pub fn decode_failed(key: Option<u32>, reason: impl Into<String>) -> Self {
        Self::DecodeFailed {
            key,
            reason: reason.into(),
        }
    }

    /// Create an invalid key error
    pub fn invalid_key(input: impl Into<String>) -> Self {
        Self::InvalidKey {
            input: input.into(),
        }
    }

    /// Create a key out of range error
    pub fn key_out_of_range(key: u32, max: u32) -> Self {
        Self::KeyOutOfRange { key, max }
    }

    /// Create an HTTP client build error
    pub fn http_client_build(reason: impl Into<String>) -> Self {
        Self::HttpClientBuild {
            reason: reason.into(),
        }
    }

    /// Create a config read failed error
    pub fn config_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigReadFailed {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    /// Create a config parse failed error
    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    /// Create a config write failed error
    pub fn config_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigWriteFailed {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    /// True for failures the user should see as "could not load"
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Self::FetchFailed { .. } | Self::DecodeFailed { .. } | Self::EmptyCatalog
        )
    }

    /// True for caller-side key validation failures
    pub fn is_invalid_key(&self) -> bool {
        matches!(self, Self::InvalidKey { .. } | Self::KeyOutOfRange { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failed_display_for_detail() {
        let err = DexNavigatorError::fetch_failed(Some(25), "status 404 Not Found");
        assert_eq!(
            err.to_string(),
            "Failed to fetch Pokémon #25: status 404 Not Found"
        );
    }

    #[test]
    fn test_fetch_failed_display_for_index() {
        let err = DexNavigatorError::fetch_failed(None, "connection refused");
        assert_eq!(
            err.to_string(),
            "Failed to fetch Pokémon list: connection refused"
        );
    }

    #[test]
    fn test_decode_failed_display() {
        let err = DexNavigatorError::decode_failed(Some(4), "missing field `types`");
        assert!(err.to_string().contains("Pokémon #4"));
        assert!(err.to_string().contains("missing field `types`"));
    }

    #[test]
    fn test_invalid_key_display() {
        let err = DexNavigatorError::invalid_key("abc");
        assert_eq!(
            err.to_string(),
            "Invalid key: 'abc'. Use a positive number like 25"
        );
    }

    #[test]
    fn test_key_out_of_range_display() {
        let err = DexNavigatorError::key_out_of_range(2000, 1025);
        assert_eq!(
            err.to_string(),
            "Not a valid entry: #2000 is outside the catalog (1-1025)"
        );
    }

    #[test]
    fn test_error_is_clone() {
        let err = DexNavigatorError::from(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            "timed out",
        ));
        let copy = err.clone();
        assert_eq!(err.to_string(), copy.to_string());
    }

    #[test]
    fn test_classification() {
        assert!(DexNavigatorError::fetch_failed(None, "x").is_load_failure());
        assert!(DexNavigatorError::decode_failed(Some(1), "x").is_load_failure());
        assert!(!DexNavigatorError::invalid_key("x").is_load_failure());
        assert!(DexNavigatorError::invalid_key("x").is_invalid_key());
        assert!(DexNavigatorError::key_out_of_range(0, 10).is_invalid_key());
    }

    #[test]
    fn test_config_parse_failed() {
        let path = PathBuf::from("/test/config.json");
        let json_err = serde_json::from_str::<serde_json::Value>("{ invalid json").unwrap_err();
        let err = DexNavigatorError::config_parse_failed(&path, json_err);
        assert!(err.to_string().contains("/test/config.json"));
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_config_write_failed() {
        let path = PathBuf::from("/test/config.json");
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = DexNavigatorError::config_write_failed(&path, io_err);
        assert!(err.to_string().contains("/test/config.json"));
        assert!(err.to_string().contains("access denied"));
    }
}

//! # Error Handling Module
//!
//! ## Purpose
//! Centralized error handling for the drug-discovery workflow service, providing
//! structured error types and conversion utilities for all system components.
//!
//! ## Input/Output Specification
//! - **Input**: Error conditions from configuration, networking, parsing, storage
//! - **Output**: Structured error types with context and error chains
//! - **Error Categories**: Configuration, Targets (network/parsing), Cache, API
//!
//! ## Key Features
//! - Hierarchical error types with detailed context
//! - Automatic error conversion from common library errors
//! - User-friendly error messages for API responses
//! - Structured logging integration

use thiserror::Error;

/// Result type used throughout the application
pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// Error types for the drug-discovery workflow service
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Network-related errors (connection failure, timeout, non-2xx status)
    #[error("Network error: {details}")]
    NetworkError { details: String },

    /// Data parsing errors
    #[error("Failed to parse data from {origin}: {details}")]
    DataParsing { origin: String, details: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Validation errors
    #[error("Validation failed for field '{field}': {reason}")]
    ValidationFailed { field: String, reason: String },

    /// Durable cache write failures
    #[error("Failed to write cache file {path}: {details}")]
    CacheWrite { path: String, details: String },

    /// Serialization/deserialization errors
    #[error("Serialization failed: {message}")]
    SerializationFailed { message: String },

    /// Internal system errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DiscoveryError {
    /// Check if the error is recoverable (can be retried)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DiscoveryError::NetworkError { .. } | DiscoveryError::CacheWrite { .. }
        )
    }

    /// Get error category for metrics and logging
    pub fn category(&self) -> &'static str {
        match self {
            DiscoveryError::Config { .. } | DiscoveryError::ValidationFailed { .. } => {
                "configuration"
            }
            DiscoveryError::NetworkError { .. } | DiscoveryError::DataParsing { .. } => "targets",
            DiscoveryError::CacheWrite { .. } => "cache",
            DiscoveryError::SerializationFailed { .. } | DiscoveryError::Internal { .. } => {
                "generic"
            }
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for DiscoveryError {
    fn from(err: std::io::Error) -> Self {
        DiscoveryError::Internal {
            message: format!("IO error: {}", err),
        }
    }
}

impl From<serde_json::Error> for DiscoveryError {
    fn from(err: serde_json::Error) -> Self {
        DiscoveryError::SerializationFailed {
            message: format!("JSON serialization error: {}", err),
        }
    }
}

impl From<reqwest::Error> for DiscoveryError {
    fn from(err: reqwest::Error) -> Self {
        DiscoveryError::NetworkError {
            details: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DiscoveryError {
    fn from(err: toml::de::Error) -> Self {
        DiscoveryError::Config {
            message: format!("TOML parse error: {}", err),
        }
    }
}

//! # Configuration Management Module
//!
//! ## Purpose
//! Centralized configuration management for the drug-discovery workflow service,
//! supporting configuration files and environment variables with validation and
//! type-safe access to all system settings.
//!
//! ## Input/Output Specification
//! - **Input**: Configuration files (TOML), environment variables, CLI arguments
//! - **Output**: Validated configuration structs with defaults and overrides
//! - **Validation**: Type checking, range validation
//!
//! ## Key Features
//! - Hierarchical configuration with environment-specific overrides
//! - Automatic validation with detailed error messages
//! - Intelligent defaults matching the public RCSB PDB search service
//!
//! ## Configuration Sources (in order of precedence)
//! 1. Command line arguments (highest priority)
//! 2. Environment variables (`PHARMFLOW_` prefix)
//! 3. Configuration files
//! 4. Default values (lowest priority)

use crate::errors::{DiscoveryError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure containing all system settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server and API configuration
    pub server: ServerConfig,
    /// Target discovery (RCSB PDB query + cache) settings
    pub targets: TargetsConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server and API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
}

/// Target discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetsConfig {
    /// RCSB PDB entry-search endpoint
    pub api_url: String,
    /// Directory for durable per-term cache files
    pub cache_dir: PathBuf,
    /// Maximum distinct terms held in the in-memory response cache
    pub cache_capacity: usize,
    /// Time-to-live for in-memory cache entries, in seconds
    pub cache_ttl_seconds: u64,
    /// Outbound request timeout in seconds
    pub request_timeout_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Enable structured JSON logging
    pub json_format: bool,
}

impl Config {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::from_file("config.toml")
    }

    /// Load configuration from a specific file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!("Configuration file not found: {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| DiscoveryError::Config {
            message: format!("Failed to read config file {:?}: {}", path, e),
        })?;

        let mut config: Config = toml::from_str(&content).map_err(|e| DiscoveryError::Config {
            message: format!("Failed to parse config file {:?}: {}", path, e),
        })?;

        // Apply environment variable overrides
        config.apply_env_overrides()?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("PHARMFLOW_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PHARMFLOW_PORT") {
            self.server.port = port.parse().map_err(|_| DiscoveryError::Config {
                message: "Invalid port number in PHARMFLOW_PORT".to_string(),
            })?;
        }
        if let Ok(api_url) = std::env::var("PHARMFLOW_RCSB_URL") {
            self.targets.api_url = api_url;
        }
        if let Ok(cache_dir) = std::env::var("PHARMFLOW_CACHE_DIR") {
            self.targets.cache_dir = PathBuf::from(cache_dir);
        }
        if let Ok(capacity) = std::env::var("PHARMFLOW_CACHE_CAPACITY") {
            self.targets.cache_capacity = capacity.parse().map_err(|_| DiscoveryError::Config {
                message: "Invalid value in PHARMFLOW_CACHE_CAPACITY".to_string(),
            })?;
        }
        if let Ok(ttl) = std::env::var("PHARMFLOW_CACHE_TTL_SECONDS") {
            self.targets.cache_ttl_seconds = ttl.parse().map_err(|_| DiscoveryError::Config {
                message: "Invalid value in PHARMFLOW_CACHE_TTL_SECONDS".to_string(),
            })?;
        }
        if let Ok(timeout) = std::env::var("PHARMFLOW_REQUEST_TIMEOUT_SECONDS") {
            self.targets.request_timeout_seconds =
                timeout.parse().map_err(|_| DiscoveryError::Config {
                    message: "Invalid value in PHARMFLOW_REQUEST_TIMEOUT_SECONDS".to_string(),
                })?;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(DiscoveryError::ValidationFailed {
                field: "server.port".to_string(),
                reason: "Port cannot be zero".to_string(),
            });
        }

        if self.targets.api_url.is_empty() {
            return Err(DiscoveryError::ValidationFailed {
                field: "targets.api_url".to_string(),
                reason: "API URL cannot be empty".to_string(),
            });
        }

        if self.targets.cache_capacity == 0 {
            return Err(DiscoveryError::ValidationFailed {
                field: "targets.cache_capacity".to_string(),
                reason: "Cache capacity must be greater than zero".to_string(),
            });
        }

        if self.targets.cache_ttl_seconds == 0 {
            return Err(DiscoveryError::ValidationFailed {
                field: "targets.cache_ttl_seconds".to_string(),
                reason: "Cache TTL must be greater than zero".to_string(),
            });
        }

        if self.targets.request_timeout_seconds == 0 {
            return Err(DiscoveryError::ValidationFailed {
                field: "targets.request_timeout_seconds".to_string(),
                reason: "Request timeout must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Get configuration as TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| DiscoveryError::Config {
            message: format!("Failed to serialize config to TOML: {}", e),
        })
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml()?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            targets: TargetsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            enable_cors: true,
        }
    }
}

impl Default for TargetsConfig {
    fn default() -> Self {
        Self {
            api_url: "https://data.rcsb.org/rest/v1/core/query".to_string(),
            cache_dir: PathBuf::from("./data/target_cache"),
            cache_capacity: 100,
            cache_ttl_seconds: 3600,
            request_timeout_seconds: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

//! Configuration module for Speak Gateway
//!
//! This module handles server configuration from various sources: .env files, YAML files,
//! and environment variables. Priority: YAML > ENV vars > .env values > defaults.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: Merging YAML and environment configurations
//! - `validation`: Configuration validation logic
//!
//! # Example
//! ```rust,no_run
//! use speak_gateway::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file; YAML values take precedence over environment variables
//! let config_path = PathBuf::from("config.yaml");
//! let config = ServerConfig::from_file(&config_path)?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

mod env;
mod merge;
mod validation;
mod yaml;

pub use yaml::YamlConfig;

use crate::core::ssml::MarkupPolicy;
use crate::core::storage::S3StoreConfig;
use crate::core::tts::aws_polly::DEFAULT_AWS_REGION;
use crate::core::tts::{AwsPollyConfig, PollyEngine};
use crate::errors::ErrorStatusPolicy;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;

/// Errors raised while loading configuration at startup
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("AUDIO_BUCKET must be set (or storage.bucket in the YAML config)")]
    MissingBucket,

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },

    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Server configuration
///
/// Contains everything needed to run the Speak Gateway:
/// - Server settings (host, port)
/// - Audio bucket settings (bucket, key prefix, endpoint override)
/// - AWS region and optional explicit credentials shared by Polly and S3
/// - Synthesis and error reporting policies
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    // Audio storage
    pub audio_bucket: String,
    /// Optional key prefix: objects are stored as `{prefix}/{uuid}.{format}`
    pub audio_key_prefix: Option<String>,
    /// Custom S3-compatible endpoint (MinIO, LocalStack)
    pub audio_s3_endpoint: Option<String>,

    // AWS
    /// AWS region (e.g., "us-east-1", "eu-west-1")
    pub aws_region: Option<String>,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub aws_session_token: Option<String>,

    // Synthesis
    /// Engine override; `None` leaves the choice to Polly
    pub polly_engine: Option<PollyEngine>,
    pub markup_policy: MarkupPolicy,

    // Errors
    pub error_status_policy: ErrorStatusPolicy,
}

/// Zeroize secret fields when ServerConfig is dropped.
impl Drop for ServerConfig {
    fn drop(&mut self) {
        use zeroize::Zeroize;

        if let Some(ref mut key) = self.aws_access_key_id {
            key.zeroize();
        }
        if let Some(ref mut secret) = self.aws_secret_access_key {
            secret.zeroize();
        }
        if let Some(ref mut token) = self.aws_session_token {
            token.zeroize();
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables (and `.env`, loaded in main.rs)
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = merge::merge_config(None)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file with environment variable base
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - No audio bucket is configured
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let yaml_config = YamlConfig::from_file(path)?;
        let config = merge::merge_config(Some(yaml_config))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_bucket(&self.audio_bucket)?;
        validation::validate_endpoint(&self.audio_s3_endpoint)?;
        validation::validate_key_prefix(&self.audio_key_prefix)?;
        Ok(())
    }

    /// Get the server address as a string
    ///
    /// Returns the address in the format "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// AWS region, defaulting to `us-east-1`
    pub fn region(&self) -> &str {
        self.aws_region.as_deref().unwrap_or(DEFAULT_AWS_REGION)
    }

    /// Polly client settings derived from this configuration
    pub fn polly_config(&self) -> AwsPollyConfig {
        AwsPollyConfig {
            region: self.region().to_string(),
            aws_access_key_id: self.aws_access_key_id.clone(),
            aws_secret_access_key: self.aws_secret_access_key.clone(),
            aws_session_token: self.aws_session_token.clone(),
            engine: self.polly_engine,
        }
    }

    /// S3 store settings derived from this configuration
    pub fn s3_config(&self) -> S3StoreConfig {
        S3StoreConfig {
            bucket: self.audio_bucket.trim().to_string(),
            region: self.region().to_string(),
            endpoint: self.audio_s3_endpoint.clone(),
            access_key_id: self.aws_access_key_id.clone(),
            secret_access_key: self.aws_secret_access_key.clone(),
            session_token: self.aws_session_token.clone(),
        }
    }
}

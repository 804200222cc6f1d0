use serde::Deserialize;
use std::path::Path;

use super::ConfigError;
use crate::core::ssml::MarkupPolicy;
use crate::core::tts::PollyEngine;
use crate::errors::ErrorStatusPolicy;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Values present in
/// the file override environment variables.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 3001
///
/// storage:
///   bucket: "my-audio-bucket"
///   key_prefix: "tts"
///   endpoint: "http://localhost:9000"
///
/// aws:
///   region: "eu-west-1"
///   access_key_id: "access-key"
///   secret_access_key: "secret-key"
///
/// synthesis:
///   engine: "neural"
///   markup_policy: "sanitize"
///
/// errors:
///   status_policy: "classified"
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub storage: Option<StorageYaml>,
    pub aws: Option<AwsYaml>,
    pub synthesis: Option<SynthesisYaml>,
    pub errors: Option<ErrorsYaml>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Audio bucket configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct StorageYaml {
    pub bucket: Option<String>,
    pub key_prefix: Option<String>,
    pub endpoint: Option<String>,
}

/// AWS credentials and region from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AwsYaml {
    pub region: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
}

/// Synthesis settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SynthesisYaml {
    pub engine: Option<PollyEngine>,
    pub markup_policy: Option<MarkupPolicy>,
}

/// Error reporting settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ErrorsYaml {
    pub status_policy: Option<ErrorStatusPolicy>,
}

impl YamlConfig {
    /// Load and parse a YAML configuration file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }
}

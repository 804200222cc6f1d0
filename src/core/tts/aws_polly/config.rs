//! Configuration types for the Amazon Polly synthesizer.
//!
//! Voice identifiers and output formats are not modelled here: they are taken
//! from each request and forwarded to Polly verbatim. What is configured once
//! per process is the region, the credentials and optionally the engine.
//!
//! # Example
//!
//! ```rust,ignore
//! use speak_gateway::core::tts::aws_polly::{AwsPollyConfig, PollyEngine};
//!
//! let config = AwsPollyConfig {
//!     region: "eu-west-1".to_string(),
//!     engine: Some(PollyEngine::Neural),
//!     ..Default::default()
//! };
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// Polly Engine
// =============================================================================

/// Amazon Polly synthesis engine options.
///
/// Different engines provide different quality/latency trade-offs:
/// - **Standard**: Basic TTS, lowest latency, good for simple use cases
/// - **Neural**: High-quality neural voices, recommended for most applications
/// - **LongForm**: Optimized for longer content like audiobooks
/// - **Generative**: Latest generative AI voices with best quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PollyEngine {
    /// Standard TTS engine
    #[serde(rename = "standard")]
    Standard,
    /// Neural TTS engine
    #[serde(rename = "neural")]
    Neural,
    /// Long-form TTS engine (for audiobooks, articles)
    #[serde(rename = "long-form")]
    LongForm,
    /// Generative AI TTS engine (highest quality)
    #[serde(rename = "generative")]
    Generative,
}

impl PollyEngine {
    /// Convert to AWS API string.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Neural => "neural",
            Self::LongForm => "long-form",
            Self::Generative => "generative",
        }
    }
}

impl std::str::FromStr for PollyEngine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "neural" => Ok(Self::Neural),
            "long-form" | "longform" | "long_form" => Ok(Self::LongForm),
            "generative" => Ok(Self::Generative),
            other => Err(format!(
                "Unknown Polly engine '{other}'. Expected one of: standard, neural, long-form, generative"
            )),
        }
    }
}

impl std::fmt::Display for PollyEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Polly Output Format
// =============================================================================

/// Audio output formats Amazon Polly produces.
///
/// Requests carry the format as a free string; this type only classifies the
/// known ones so stored objects get a sensible `Content-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PollyOutputFormat {
    /// MP3 format (compressed)
    #[serde(rename = "mp3")]
    Mp3,
    /// OGG Vorbis format (compressed)
    #[serde(rename = "ogg_vorbis")]
    OggVorbis,
    /// PCM format (uncompressed, 16-bit signed little-endian)
    #[serde(rename = "pcm")]
    Pcm,
    /// Speech marks, newline-delimited JSON
    #[serde(rename = "json")]
    Json,
}

impl PollyOutputFormat {
    /// Convert to AWS API string.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::OggVorbis => "ogg_vorbis",
            Self::Pcm => "pcm",
            Self::Json => "json",
        }
    }

    /// Get the MIME type for this format.
    #[inline]
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::OggVorbis => "audio/ogg",
            Self::Pcm => "audio/pcm",
            Self::Json => "application/x-json-stream",
        }
    }

    /// Match an exact AWS API string. Polly format names are case-sensitive.
    pub fn from_api_str(s: &str) -> Option<Self> {
        match s {
            "mp3" => Some(Self::Mp3),
            "ogg_vorbis" => Some(Self::OggVorbis),
            "pcm" => Some(Self::Pcm),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Content type for an arbitrary requested format string.
    pub fn content_type_for(format: &str) -> &'static str {
        Self::from_api_str(format)
            .map(|f| f.mime_type())
            .unwrap_or("application/octet-stream")
    }
}

impl std::fmt::Display for PollyOutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Maximum total input length including SSML tags (characters).
pub const MAX_TOTAL_LENGTH: usize = 6000;

/// Default region when none is configured.
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Configuration for the Amazon Polly client.
///
/// # Authentication
///
/// AWS credentials can be provided via:
/// 1. `aws_access_key_id` and `aws_secret_access_key` fields
/// 2. Environment variables: `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`
/// 3. IAM role of the execution environment
/// 4. AWS credentials file (`~/.aws/credentials`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsPollyConfig {
    /// AWS region for the Polly service
    pub region: String,

    /// AWS access key ID (optional if using IAM roles)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws_access_key_id: Option<String>,

    /// AWS secret access key (optional if using IAM roles)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws_secret_access_key: Option<String>,

    /// AWS session token for temporary credentials (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws_session_token: Option<String>,

    /// Engine override. `None` lets Polly pick the voice's default engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<PollyEngine>,
}

impl Default for AwsPollyConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_AWS_REGION.to_string(),
            aws_access_key_id: None,
            aws_secret_access_key: None,
            aws_session_token: None,
            engine: None,
        }
    }
}

impl AwsPollyConfig {
    /// Check if explicit AWS credentials are provided.
    pub fn has_explicit_credentials(&self) -> bool {
        self.aws_access_key_id.is_some() && self.aws_secret_access_key.is_some()
    }
}

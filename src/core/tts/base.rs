//! Provider-agnostic synthesis types.
//!
//! A [`SpeechSynthesizer`] turns one [`SynthesisInput`] into a complete audio
//! payload. Implementations hold long-lived client handles and are shared
//! across requests behind an `Arc`.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for synthesis operations
pub type TTSResult<T> = Result<T, TTSError>;

/// Errors raised by a speech synthesis provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TTSError {
    /// Request rejected before reaching the provider
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Provider client could not be created
    #[error("Provider not ready: {0}")]
    ProviderNotReady(String),

    /// Provider rejected the request or was unreachable
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// Provider accepted the request but the audio stream could not be read
    #[error("Audio generation failed: {0}")]
    AudioGenerationFailed(String),
}

/// Input text type for the synthesis call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextType {
    /// Plain text input
    #[serde(rename = "text")]
    Text,
    /// SSML (Speech Synthesis Markup Language) input
    #[default]
    #[serde(rename = "ssml")]
    Ssml,
}

impl TextType {
    /// Convert to the wire string.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Ssml => "ssml",
        }
    }
}

impl std::fmt::Display for TextType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One synthesis call.
///
/// `voice` and `output_format` are forwarded to the provider as given; the
/// provider is the authority on which values it accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisInput {
    pub text: String,
    pub text_type: TextType,
    pub voice: String,
    pub output_format: String,
}

/// A text-to-speech backend producing a complete audio payload per call.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `input` and return the full audio stream.
    async fn synthesize(&self, input: &SynthesisInput) -> TTSResult<Bytes>;

    /// Short provider name used in logs.
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_type() {
        assert_eq!(TextType::Text.as_str(), "text");
        assert_eq!(TextType::Ssml.as_str(), "ssml");
        assert_eq!(TextType::default(), TextType::Ssml);
    }

    #[test]
    fn test_error_messages() {
        let err = TTSError::ProviderError("InvalidSsmlException: bad tag".to_string());
        assert_eq!(err.to_string(), "Provider error: InvalidSsmlException: bad tag");
    }
}

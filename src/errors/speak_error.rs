//! Failure type for the speak endpoint.
//!
//! Every failure a request can hit falls in one of four categories. The
//! category decides the HTTP status through [`ErrorStatusPolicy`]; the
//! `Display` text is what the client sees in the `error` field.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::ssml::MarkupError;
use crate::core::storage::StorageError;
use crate::core::tts::TTSError;

/// Result type for the speak pipeline
pub type SpeakResult<T> = Result<T, SpeakError>;

#[derive(Error, Debug)]
pub enum SpeakError {
    /// Body missing, not JSON, or missing/invalid fields
    #[error("Invalid request: {0}")]
    MalformedInput(String),

    /// Speech service rejected the request or was unreachable
    #[error("Speech synthesis failed: {0}")]
    Synthesis(#[from] TTSError),

    /// Audio could not be written to the bucket
    #[error("Failed to store audio: {0}")]
    Storage(StorageError),

    /// Audio was stored but no retrieval URL could be produced
    #[error("Failed to generate audio URL: {0}")]
    UrlGeneration(StorageError),
}

impl SpeakError {
    /// Short machine-readable category, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedInput(_) => "malformed_input",
            Self::Synthesis(_) => "synthesis_failure",
            Self::Storage(_) => "storage_failure",
            Self::UrlGeneration(_) => "url_failure",
        }
    }
}

impl From<MarkupError> for SpeakError {
    fn from(err: MarkupError) -> Self {
        Self::MalformedInput(err.to_string())
    }
}

impl From<serde_json::Error> for SpeakError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedInput(err.to_string())
    }
}

/// Maps failure categories to HTTP status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorStatusPolicy {
    /// Every failure is a 500
    #[default]
    Uniform,
    /// Malformed input is a 400, everything else a 500
    Classified,
}

impl ErrorStatusPolicy {
    pub fn status_for(&self, err: &SpeakError) -> StatusCode {
        match (self, err) {
            (Self::Classified, SpeakError::MalformedInput(_)) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::str::FromStr for ErrorStatusPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "uniform" => Ok(Self::Uniform),
            "classified" => Ok(Self::Classified),
            other => Err(format!(
                "Unknown error status policy '{other}'. Expected 'uniform' or 'classified'"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_error() -> StorageError {
        StorageError::Sign {
            bucket: "audio".to_string(),
            key: "a.mp3".to_string(),
            reason: "expired token".to_string(),
        }
    }

    #[test]
    fn test_uniform_policy_is_always_500() {
        let policy = ErrorStatusPolicy::Uniform;
        assert_eq!(
            policy.status_for(&SpeakError::MalformedInput("missing field `text`".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            policy.status_for(&SpeakError::UrlGeneration(sign_error())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_classified_policy_maps_input_to_400() {
        let policy = ErrorStatusPolicy::Classified;
        assert_eq!(
            policy.status_for(&SpeakError::MalformedInput("missing field `text`".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            policy.status_for(&SpeakError::Synthesis(TTSError::ProviderError("x".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages_carry_category_and_cause() {
        let err = SpeakError::UrlGeneration(sign_error());
        assert_eq!(err.kind(), "url_failure");
        assert!(err.to_string().starts_with("Failed to generate audio URL: "));
        assert!(err.to_string().contains("expired token"));

        let err: SpeakError = MarkupError::UnsupportedRate("warp".into()).into();
        assert_eq!(err.kind(), "malformed_input");
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("Classified".parse::<ErrorStatusPolicy>(), Ok(ErrorStatusPolicy::Classified));
        assert!("strict".parse::<ErrorStatusPolicy>().is_err());
    }
}

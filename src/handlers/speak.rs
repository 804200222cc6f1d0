//! Text-to-speech endpoint.
//!
//! One request runs strictly in sequence: parse body, wrap text in SSML,
//! synthesize, store the audio under a fresh key, sign a GET URL. Any failure
//! ends the request with the failure envelope; side effects that already
//! happened are not rolled back.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{error, info, warn};

use crate::core::ssml::{MarkupPolicy, wrap_with_prosody};
use crate::core::storage::{AudioStore, build_audio_object_key};
use crate::core::tts::aws_polly::PollyOutputFormat;
use crate::core::tts::{SpeechSynthesizer, SynthesisInput, TextType};
use crate::errors::{ErrorStatusPolicy, SpeakError, SpeakResult};
use crate::middleware::cors::cors_header_map;
use crate::state::AppState;

/// Lifetime of the returned download URL.
pub const SIGNED_URL_TTL_SECS: u64 = 3600;

pub const DEFAULT_VOICE: &str = "Joanna";
pub const DEFAULT_OUTPUT_FORMAT: &str = "mp3";
pub const DEFAULT_SPEED: &str = "medium";

fn default_voice() -> String {
    DEFAULT_VOICE.to_string()
}

fn default_output_format() -> String {
    DEFAULT_OUTPUT_FORMAT.to_string()
}

fn default_speed() -> String {
    DEFAULT_SPEED.to_string()
}

/// Parsed request body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisRequest {
    pub text: String,
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(default = "default_output_format")]
    pub output_format: String,
    #[serde(default = "default_speed")]
    pub speed: String,
}

impl SynthesisRequest {
    pub fn parse(body: &str) -> SpeakResult<Self> {
        let request: Self = serde_json::from_str(body)?;
        if request.text.is_empty() {
            return Err(SpeakError::MalformedInput(
                "field `text` must not be empty".to_string(),
            ));
        }
        Ok(request)
    }
}

/// Payload of a successful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakData {
    pub audio_url: String,
    pub voice: String,
    pub format: String,
    /// Character count of the caller's text, before SSML wrapping
    pub text_length: usize,
    pub expires_at: String,
}

/// JSON envelope shared by success and failure responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakBody {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SpeakData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Status code plus envelope; CORS headers are attached on conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakResponse {
    pub status: StatusCode,
    pub body: SpeakBody,
}

impl SpeakResponse {
    pub fn success(data: SpeakData) -> Self {
        Self {
            status: StatusCode::OK,
            body: SpeakBody {
                success: true,
                data: Some(data),
                error: None,
            },
        }
    }

    pub fn failure(status: StatusCode, message: String) -> Self {
        Self {
            status,
            body: SpeakBody {
                success: false,
                data: None,
                error: Some(message),
            },
        }
    }

    /// Serialized envelope.
    pub fn body_json(&self) -> String {
        serde_json::to_string(&self.body).unwrap_or_else(|e| {
            error!(error = %e, "Failed to serialize response body");
            r#"{"success":false,"error":"Failed to serialize response"}"#.to_string()
        })
    }
}

impl IntoResponse for SpeakResponse {
    fn into_response(self) -> Response {
        (self.status, cors_header_map(), Json(self.body)).into_response()
    }
}

/// The speak pipeline with its long-lived collaborators.
///
/// Cheap to clone; the synthesizer and store are shared handles.
#[derive(Clone)]
pub struct SpeakService {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    store: Arc<dyn AudioStore>,
    key_prefix: Option<String>,
    markup_policy: MarkupPolicy,
    error_status_policy: ErrorStatusPolicy,
}

impl SpeakService {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, store: Arc<dyn AudioStore>) -> Self {
        Self {
            synthesizer,
            store,
            key_prefix: None,
            markup_policy: MarkupPolicy::default(),
            error_status_policy: ErrorStatusPolicy::default(),
        }
    }

    pub fn with_key_prefix(mut self, prefix: Option<String>) -> Self {
        self.key_prefix = prefix;
        self
    }

    pub fn with_markup_policy(mut self, policy: MarkupPolicy) -> Self {
        self.markup_policy = policy;
        self
    }

    pub fn with_error_status_policy(mut self, policy: ErrorStatusPolicy) -> Self {
        self.error_status_policy = policy;
        self
    }

    /// Run one request body through the pipeline and build the response.
    pub async fn handle(&self, body: Option<&str>) -> SpeakResponse {
        match self.process(body).await {
            Ok(data) => SpeakResponse::success(data),
            Err(err) => self.fail(err),
        }
    }

    /// Turn a failure into the error envelope under the configured status policy.
    pub fn fail(&self, err: SpeakError) -> SpeakResponse {
        let status = self.error_status_policy.status_for(&err);
        error!(kind = err.kind(), status = status.as_u16(), error = %err, "Speak request failed");
        SpeakResponse::failure(status, err.to_string())
    }

    /// The pipeline proper, without response shaping.
    pub async fn process(&self, body: Option<&str>) -> SpeakResult<SpeakData> {
        let body = body
            .ok_or_else(|| SpeakError::MalformedInput("request body is missing".to_string()))?;
        let request = SynthesisRequest::parse(body)?;
        let ssml = wrap_with_prosody(&request.text, &request.speed, self.markup_policy)?;

        let audio = self
            .synthesizer
            .synthesize(&SynthesisInput {
                text: ssml,
                text_type: TextType::Ssml,
                voice: request.voice.clone(),
                output_format: request.output_format.clone(),
            })
            .await?;

        let key = build_audio_object_key(self.key_prefix.as_deref(), &request.output_format);
        let content_type = PollyOutputFormat::content_type_for(&request.output_format);

        let stored = self
            .store
            .put_audio(&key, audio, content_type)
            .await
            .map_err(SpeakError::Storage)?;

        let audio_url = self
            .store
            .signed_url(&key, Duration::from_secs(SIGNED_URL_TTL_SECS))
            .await
            .map_err(|e| {
                warn!(bucket = %self.store.bucket(), key = %key, "Audio stored but left without a download URL");
                SpeakError::UrlGeneration(e)
            })?;

        let expires_at = OffsetDateTime::now_utc() + time::Duration::seconds(SIGNED_URL_TTL_SECS as i64);

        info!(
            provider = self.synthesizer.provider_name(),
            bucket = %self.store.bucket(),
            key = %stored.key,
            audio_bytes = stored.size,
            voice = %request.voice,
            format = %request.output_format,
            "Synthesized and stored audio"
        );

        Ok(SpeakData {
            audio_url,
            text_length: request.text.chars().count(),
            voice: request.voice,
            format: request.output_format,
            expires_at: format_expiry(expires_at),
        })
    }
}

/// ISO-8601 UTC with microseconds and a literal `Z`, e.g. `2024-05-01T12:00:00.000000Z`.
pub fn format_expiry(at: OffsetDateTime) -> String {
    let at = at.to_offset(time::UtcOffset::UTC);
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:06}Z",
        at.year(),
        u8::from(at.month()),
        at.day(),
        at.hour(),
        at.minute(),
        at.second(),
        at.microsecond()
    )
}

/// Synthesize text and return a signed download URL
///
/// The raw body is read as bytes so that malformed JSON is reported through
/// the standard failure envelope instead of an extractor rejection.
pub async fn speak_handler(State(state): State<Arc<AppState>>, body: Bytes) -> SpeakResponse {
    match std::str::from_utf8(&body) {
        Ok(body) => state.speak.handle(Some(body)).await,
        Err(e) => state.speak.fail(SpeakError::MalformedInput(format!(
            "request body is not valid UTF-8: {e}"
        ))),
    }
}

/// CORS preflight: empty 200 with the fixed CORS headers.
pub async fn preflight_handler() -> impl IntoResponse {
    (StatusCode::OK, cors_header_map())
}

//! Amazon Polly synthesizer implementation.
//!
//! Implements [`SpeechSynthesizer`] on top of Polly's SynthesizeSpeech API via
//! the AWS SDK for Rust. The SDK client is built once and reused for every
//! request; it is cheap to clone and safe to share between tasks.
//!
//! # API Reference
//!
//! - Service: Amazon Polly
//! - Operation: SynthesizeSpeech
//! - Engines: standard, neural, long-form, generative
//! - Output formats: mp3, ogg_vorbis, pcm, json
//!
//! # Example
//!
//! ```rust,ignore
//! use speak_gateway::core::tts::{SpeechSynthesizer, SynthesisInput, TextType};
//! use speak_gateway::core::tts::aws_polly::{AwsPollyConfig, AwsPollySynthesizer};
//!
//! #[tokio::main]
//! async fn main() {
//!     let tts = AwsPollySynthesizer::connect(&AwsPollyConfig::default()).await;
//!     let audio = tts
//!         .synthesize(&SynthesisInput {
//!             text: "<speak>Hello, world!</speak>".to_string(),
//!             text_type: TextType::Ssml,
//!             voice: "Joanna".to_string(),
//!             output_format: "mp3".to_string(),
//!         })
//!         .await
//!         .unwrap();
//! }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_polly::Client as PollyClient;
use aws_sdk_polly::config::Builder as PollyConfigBuilder;
use aws_sdk_polly::error::DisplayErrorContext;
use aws_sdk_polly::primitives::ByteStream;
use aws_sdk_polly::types::{Engine, OutputFormat, TextType as PollyTextType, VoiceId};
use bytes::Bytes;
use tracing::{debug, error, info};

use super::config::{AwsPollyConfig, MAX_TOTAL_LENGTH, PollyEngine};
use crate::core::tts::base::{SpeechSynthesizer, SynthesisInput, TTSError, TTSResult, TextType};

/// Amazon Polly TTS API base URL (for documentation purposes)
pub const AWS_POLLY_TTS_URL: &str = "https://polly.{region}.amazonaws.com/v1/speech";

// =============================================================================
// Helper Functions
// =============================================================================

/// Convert PollyEngine to AWS SDK Engine type
fn engine_to_sdk(engine: PollyEngine) -> Engine {
    match engine {
        PollyEngine::Standard => Engine::Standard,
        PollyEngine::Neural => Engine::Neural,
        PollyEngine::LongForm => Engine::LongForm,
        PollyEngine::Generative => Engine::Generative,
    }
}

/// Convert TextType to AWS SDK TextType
fn text_type_to_sdk(text_type: TextType) -> PollyTextType {
    match text_type {
        TextType::Text => PollyTextType::Text,
        TextType::Ssml => PollyTextType::Ssml,
    }
}

// =============================================================================
// Amazon Polly Synthesizer
// =============================================================================

/// Amazon Polly synthesizer backed by a process-wide SDK client.
pub struct AwsPollySynthesizer {
    client: PollyClient,
    engine: Option<PollyEngine>,
    /// Request counter for logging (atomic for lock-free access)
    request_counter: AtomicU64,
}

impl AwsPollySynthesizer {
    /// Build the Polly client from configuration.
    ///
    /// Explicit credentials take precedence; otherwise the default AWS
    /// credential chain (environment, profile, execution role) is used.
    pub async fn connect(config: &AwsPollyConfig) -> Self {
        let region = Region::new(config.region.clone());

        let client = match (&config.aws_access_key_id, &config.aws_secret_access_key) {
            (Some(access_key), Some(secret_key)) => {
                let credentials = Credentials::new(
                    access_key,
                    secret_key,
                    config.aws_session_token.clone(),
                    None,
                    "speak-gateway",
                );

                let polly_config = PollyConfigBuilder::new()
                    .behavior_version(BehaviorVersion::latest())
                    .region(region)
                    .credentials_provider(credentials)
                    .build();

                PollyClient::from_conf(polly_config)
            }
            _ => {
                let aws_config = aws_config::defaults(BehaviorVersion::latest())
                    .region(region)
                    .load()
                    .await;
                PollyClient::new(&aws_config)
            }
        };

        info!(
            region = %config.region,
            explicit_credentials = config.has_explicit_credentials(),
            engine = ?config.engine,
            "Amazon Polly client initialized"
        );

        Self::from_client(client, config.engine)
    }

    /// Wrap an already-built SDK client.
    pub fn from_client(client: PollyClient, engine: Option<PollyEngine>) -> Self {
        Self {
            client,
            engine,
            request_counter: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for AwsPollySynthesizer {
    async fn synthesize(&self, input: &SynthesisInput) -> TTSResult<Bytes> {
        let total_len = input.text.chars().count();
        if total_len > MAX_TOTAL_LENGTH {
            return Err(TTSError::InvalidConfiguration(format!(
                "Text length {} exceeds maximum {} characters",
                total_len, MAX_TOTAL_LENGTH
            )));
        }

        let request_id = self.request_counter.fetch_add(1, Ordering::Relaxed) + 1;

        debug!(
            request_id = request_id,
            text_len = total_len,
            voice = %input.voice,
            format = %input.output_format,
            "Synthesizing text with Amazon Polly"
        );

        let mut request = self
            .client
            .synthesize_speech()
            .text(&input.text)
            .text_type(text_type_to_sdk(input.text_type))
            .voice_id(VoiceId::from(input.voice.as_str()))
            .output_format(OutputFormat::from(input.output_format.as_str()));

        if let Some(engine) = self.engine {
            request = request.engine(engine_to_sdk(engine));
        }

        let response = request.send().await.map_err(|e| {
            let message = DisplayErrorContext(&e).to_string();
            error!(request_id = request_id, error = %message, "Polly API error");
            TTSError::ProviderError(message)
        })?;

        let audio_stream: ByteStream = response.audio_stream;
        let audio_bytes = audio_stream.collect().await.map_err(|e| {
            error!(request_id = request_id, error = %e, "Failed to read audio stream");
            TTSError::AudioGenerationFailed(format!("Failed to read audio stream: {}", e))
        })?;

        let bytes = audio_bytes.into_bytes();

        debug!(
            request_id = request_id,
            audio_bytes = bytes.len(),
            "Successfully synthesized audio"
        );

        Ok(bytes)
    }

    fn provider_name(&self) -> &'static str {
        "aws-polly"
    }
}

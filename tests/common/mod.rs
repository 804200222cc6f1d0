//! Shared fakes for the integration tests.
//!
//! The synthesizer and stores stand in for Polly and S3 so the full request
//! pipeline can run offline.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::signer::Signer;
use object_store::ObjectStore;
use url::Url;

use speak_gateway::core::storage::{StorageResult, StoredAudio};
use speak_gateway::core::tts::TTSResult;
use speak_gateway::{
    AppState, AudioStore, ErrorStatusPolicy, MarkupPolicy, ObjectStoreAudioStore, ServerConfig,
    SpeechSynthesizer, StorageError, SynthesisInput, TTSError,
};

pub const TEST_BUCKET: &str = "speak-audio-test";

/// Minimal configuration for building state with injected clients.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        audio_bucket: TEST_BUCKET.to_string(),
        audio_key_prefix: None,
        audio_s3_endpoint: None,
        aws_region: Some("us-east-1".to_string()),
        aws_access_key_id: None,
        aws_secret_access_key: None,
        aws_session_token: None,
        polly_engine: None,
        markup_policy: MarkupPolicy::Passthrough,
        error_status_policy: ErrorStatusPolicy::Uniform,
    }
}

/// Synthesizer that records every call and returns deterministic audio.
#[derive(Default)]
pub struct RecordingSynthesizer {
    calls: Mutex<Vec<SynthesisInput>>,
}

impl RecordingSynthesizer {
    pub fn calls(&self) -> Vec<SynthesisInput> {
        self.calls.lock().unwrap().clone()
    }

    /// Audio bytes produced for a given SSML document.
    pub fn audio_for(ssml: &str) -> Bytes {
        Bytes::from(format!("AUDIO[{ssml}]"))
    }
}

#[async_trait]
impl SpeechSynthesizer for RecordingSynthesizer {
    async fn synthesize(&self, input: &SynthesisInput) -> TTSResult<Bytes> {
        self.calls.lock().unwrap().push(input.clone());
        Ok(Self::audio_for(&input.text))
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}

/// Synthesizer that rejects every call, like Polly on an unknown voice.
pub struct FailingSynthesizer;

#[async_trait]
impl SpeechSynthesizer for FailingSynthesizer {
    async fn synthesize(&self, input: &SynthesisInput) -> TTSResult<Bytes> {
        Err(TTSError::ProviderError(format!(
            "InvalidParameterValueException: voice {} is not available",
            input.voice
        )))
    }

    fn provider_name(&self) -> &'static str {
        "failing"
    }
}

/// Signer producing S3-shaped query-signed URLs without credentials.
#[derive(Debug)]
pub struct TestSigner;

#[async_trait]
impl Signer for TestSigner {
    async fn signed_url(
        &self,
        method: Method,
        path: &ObjectPath,
        expires_in: Duration,
    ) -> object_store::Result<Url> {
        Ok(Url::parse(&format!(
            "https://{TEST_BUCKET}.s3.us-east-1.amazonaws.com/{path}?X-Amz-Method={method}&X-Amz-Expires={}&X-Amz-Signature=test",
            expires_in.as_secs()
        ))
        .unwrap())
    }
}

/// Signer that always fails.
#[derive(Debug)]
pub struct BrokenSigner;

#[async_trait]
impl Signer for BrokenSigner {
    async fn signed_url(
        &self,
        _method: Method,
        _path: &ObjectPath,
        _expires_in: Duration,
    ) -> object_store::Result<Url> {
        Err(object_store::Error::Generic {
            store: "test",
            source: "signing credentials unavailable".into(),
        })
    }
}

/// Store that rejects writes and counts attempts.
#[derive(Default)]
pub struct FailingStore {
    pub writes: AtomicUsize,
}

#[async_trait]
impl AudioStore for FailingStore {
    async fn put_audio(
        &self,
        key: &str,
        _audio: Bytes,
        _content_type: &'static str,
    ) -> StorageResult<StoredAudio> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::Write {
            bucket: TEST_BUCKET.to_string(),
            key: key.to_string(),
            reason: "AccessDenied".to_string(),
        })
    }

    async fn signed_url(&self, key: &str, _expires_in: Duration) -> StorageResult<String> {
        Err(StorageError::Sign {
            bucket: TEST_BUCKET.to_string(),
            key: key.to_string(),
            reason: "nothing was written".to_string(),
        })
    }

    fn bucket(&self) -> &str {
        TEST_BUCKET
    }
}

/// Everything a test needs to inspect after driving a request.
pub struct Harness {
    pub state: Arc<AppState>,
    pub synthesizer: Arc<RecordingSynthesizer>,
    pub memory: Arc<InMemory>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: ServerConfig) -> Self {
        Self::with_signer(config, Arc::new(TestSigner))
    }

    pub fn with_signer(config: ServerConfig, signer: Arc<dyn Signer>) -> Self {
        let synthesizer = Arc::new(RecordingSynthesizer::default());
        let memory = Arc::new(InMemory::new());
        let store = Arc::new(ObjectStoreAudioStore::new(
            memory.clone(),
            signer,
            TEST_BUCKET,
        ));
        let state = AppState::with_clients(config, synthesizer.clone(), store);
        Self {
            state,
            synthesizer,
            memory,
        }
    }

    /// Number of objects stored at the top level of the bucket.
    pub async fn object_count(&self) -> usize {
        self.memory
            .list_with_delimiter(None)
            .await
            .unwrap()
            .objects
            .len()
    }

    /// Fetch the object a signed URL points at.
    pub async fn fetch(&self, audio_url: &str) -> Bytes {
        let url = Url::parse(audio_url).unwrap();
        let key = url.path().trim_start_matches('/');
        self.memory
            .get(&ObjectPath::from(key))
            .await
            .unwrap()
            .bytes()
            .await
            .unwrap()
    }
}


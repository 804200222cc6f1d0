//! Shared application state.
//!
//! Client handles are created once at startup and live for the lifetime of
//! the process; every request borrows them through `Arc<AppState>`.

use std::sync::Arc;

use tracing::info;

use crate::config::ServerConfig;
use crate::core::storage::{AudioStore, ObjectStoreAudioStore, StorageError};
use crate::core::tts::{AwsPollySynthesizer, SpeechSynthesizer};
use crate::handlers::speak::SpeakService;

pub struct AppState {
    pub config: ServerConfig,
    pub speak: SpeakService,
}

impl AppState {
    /// Build the Polly client and S3 store from configuration.
    pub async fn new(config: ServerConfig) -> Result<Arc<Self>, StorageError> {
        let synthesizer: Arc<dyn SpeechSynthesizer> =
            Arc::new(AwsPollySynthesizer::connect(&config.polly_config()).await);
        let store: Arc<dyn AudioStore> =
            Arc::new(ObjectStoreAudioStore::from_s3_config(&config.s3_config())?);

        info!(
            bucket = %config.audio_bucket,
            region = %config.region(),
            markup_policy = ?config.markup_policy,
            error_status_policy = ?config.error_status_policy,
            "Application state initialized"
        );

        Ok(Self::with_clients(config, synthesizer, store))
    }

    /// Assemble state from already-built clients.
    pub fn with_clients(
        config: ServerConfig,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        store: Arc<dyn AudioStore>,
    ) -> Arc<Self> {
        let speak = SpeakService::new(synthesizer, store)
            .with_key_prefix(config.audio_key_prefix.clone())
            .with_markup_policy(config.markup_policy)
            .with_error_status_policy(config.error_status_policy);

        Arc::new(Self { config, speak })
    }
}

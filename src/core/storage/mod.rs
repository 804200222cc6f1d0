//! Audio object storage.
//!
//! An [`AudioStore`] writes one synthesized payload under a fresh key and
//! hands out a time-limited GET URL for it. Stored objects are never deleted
//! by this service; the URL expiry does not affect the object's lifetime.

mod object;

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use uuid::Uuid;

pub use object::{ObjectStoreAudioStore, S3StoreConfig};

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by an [`AudioStore`]
#[derive(Error, Debug)]
pub enum StorageError {
    /// Object key could not be turned into a storage path
    #[error("Invalid object key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// Write rejected by the backend
    #[error("Failed to write '{key}' to bucket '{bucket}': {reason}")]
    Write {
        bucket: String,
        key: String,
        reason: String,
    },

    /// Signed URL could not be produced
    #[error("Failed to sign URL for '{key}' in bucket '{bucket}': {reason}")]
    Sign {
        bucket: String,
        key: String,
        reason: String,
    },

    /// Backend could not be constructed
    #[error("Storage backend unavailable: {0}")]
    Backend(String),
}

/// Reference to an object written by [`AudioStore::put_audio`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAudio {
    pub key: String,
    pub size: usize,
    pub content_type: &'static str,
}

/// Write-once audio storage with signed retrieval URLs.
#[async_trait]
pub trait AudioStore: Send + Sync {
    /// Write `audio` under `key`.
    async fn put_audio(
        &self,
        key: &str,
        audio: Bytes,
        content_type: &'static str,
    ) -> StorageResult<StoredAudio>;

    /// Produce a GET URL for `key` valid for `expires_in`.
    async fn signed_url(&self, key: &str, expires_in: Duration) -> StorageResult<String>;

    /// Bucket (or namespace) the store writes into, for logging.
    fn bucket(&self) -> &str;
}

/// Build a fresh object key for one synthesized payload.
///
/// Path format:
/// - Without prefix: `{id}.{format}`
/// - With prefix: `{prefix}/{id}.{format}`
///
/// The id is a random v4 UUID, so two calls never produce the same key.
pub fn build_audio_object_key(prefix: Option<&str>, format: &str) -> String {
    build_audio_object_key_with_id(prefix, Uuid::new_v4(), format)
}

fn build_audio_object_key_with_id(prefix: Option<&str>, id: Uuid, format: &str) -> String {
    let normalized_prefix = prefix
        .map(|p| p.trim().trim_matches('/'))
        .filter(|p| !p.is_empty());

    match normalized_prefix {
        None => format!("{}.{}", id, format),
        Some(prefix) => format!("{}/{}.{}", prefix, id, format),
    }
}

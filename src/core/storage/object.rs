use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path as ObjectPath;
use object_store::signer::Signer;
use object_store::{Attribute, AttributeValue, Attributes, ObjectStore, PutOptions, PutPayload};
use tracing::{debug, error, info};

use super::{AudioStore, StorageError, StorageResult, StoredAudio};

/// S3 connection settings for [`ObjectStoreAudioStore::from_s3_config`].
#[derive(Debug, Clone, Default)]
pub struct S3StoreConfig {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint (MinIO, LocalStack). Plain `http://` endpoints are allowed.
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
}

/// [`AudioStore`] over any `object_store` backend.
///
/// Writes and URL signing are separate handles so that a store without a
/// native signer (such as the in-memory store) can be paired with another
/// signer. For S3 both handles point at the same `AmazonS3` client.
#[derive(Debug, Clone)]
pub struct ObjectStoreAudioStore {
    store: Arc<dyn ObjectStore>,
    signer: Arc<dyn Signer>,
    bucket: String,
}

impl ObjectStoreAudioStore {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        signer: Arc<dyn Signer>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            store,
            signer,
            bucket: bucket.into(),
        }
    }

    /// Build an S3-backed store.
    ///
    /// Settings left unset fall back to the `AWS_*` environment variables
    /// read by `AmazonS3Builder::from_env`.
    pub fn from_s3_config(config: &S3StoreConfig) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(&config.bucket)
            .with_region(&config.region);

        if let Some(endpoint) = &config.endpoint {
            builder = builder.with_endpoint(endpoint);
            if endpoint.starts_with("http://") {
                builder = builder.with_allow_http(true);
            }
        }

        if let (Some(access_key), Some(secret_key)) =
            (&config.access_key_id, &config.secret_access_key)
        {
            builder = builder
                .with_access_key_id(access_key)
                .with_secret_access_key(secret_key);
            if let Some(token) = &config.session_token {
                builder = builder.with_token(token);
            }
        }

        let s3 = Arc::new(builder.build().map_err(|e| {
            error!(bucket = %config.bucket, error = %e, "Failed to build S3 client");
            StorageError::Backend(e.to_string())
        })?);

        info!(
            bucket = %config.bucket,
            region = %config.region,
            endpoint = ?config.endpoint,
            "S3 audio store initialized"
        );

        let store: Arc<dyn ObjectStore> = s3.clone();
        let signer: Arc<dyn Signer> = s3;
        Ok(Self::new(store, signer, config.bucket.clone()))
    }

    fn object_path(key: &str) -> StorageResult<ObjectPath> {
        ObjectPath::parse(key).map_err(|e| StorageError::InvalidKey {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl AudioStore for ObjectStoreAudioStore {
    async fn put_audio(
        &self,
        key: &str,
        audio: Bytes,
        content_type: &'static str,
    ) -> StorageResult<StoredAudio> {
        let path = Self::object_path(key)?;
        let size = audio.len();

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, AttributeValue::from(content_type));
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        self.store
            .put_opts(&path, PutPayload::from(audio), options)
            .await
            .map_err(|e| StorageError::Write {
                bucket: self.bucket.clone(),
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        debug!(bucket = %self.bucket, key = %key, size = size, "Stored audio object");

        Ok(StoredAudio {
            key: key.to_string(),
            size,
            content_type,
        })
    }

    async fn signed_url(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        let path = Self::object_path(key)?;

        let url = self
            .signer
            .signed_url(Method::GET, &path, expires_in)
            .await
            .map_err(|e| StorageError::Sign {
                bucket: self.bucket.clone(),
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        Ok(url.to_string())
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }
}

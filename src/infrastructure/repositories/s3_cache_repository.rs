use super::cache_repository::{decode_fresh_text, encode_text_entry, CacheError, CacheRepository, TEXT_TTL};
use async_trait::async_trait;
use aws_sdk_s3::{
    error::DisplayErrorContext, presigning::PresigningConfig, primitives::ByteStream,
    Client as S3Client,
};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

/// S3-backed cache.
///
/// Layout: `summaries/<token>.json`, `explorations/<token>.json`,
/// `audio/...mp3`. Audio is never returned inline, only through presigned
/// GET URLs.
pub struct S3CacheRepository {
    s3_client: Arc<S3Client>,
    bucket: String,
}

impl S3CacheRepository {
    pub fn new(s3_client: Arc<S3Client>, bucket: String) -> Self {
        Self { s3_client, bucket }
    }

    async fn get_object_bytes(&self, key: &str) -> Result<Vec<u8>, CacheError> {
        let output = self
            .s3_client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| CacheError::Storage(DisplayErrorContext(&e).to_string()))?;

        let data = output
            .body
            .collect()
            .await
            .map_err(|e| CacheError::Storage(e.to_string()))?;

        Ok(data.into_bytes().to_vec())
    }

    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), CacheError> {
        self.s3_client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| CacheError::Storage(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }

    async fn object_exists(&self, key: &str) -> Result<bool, CacheError> {
        match self
            .s3_client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                if e.as_service_error().map(|se| se.is_not_found()).unwrap_or(false) {
                    Ok(false)
                } else {
                    Err(CacheError::Storage(DisplayErrorContext(&e).to_string()))
                }
            }
        }
    }

    async fn presign_get(&self, key: &str, ttl: Duration) -> Result<String, CacheError> {
        let presigning = PresigningConfig::expires_in(ttl)
            .map_err(|e| CacheError::Storage(e.to_string()))?;

        let request = self
            .s3_client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| CacheError::Storage(DisplayErrorContext(&e).to_string()))?;

        Ok(request.uri().to_string())
    }
}

#[async_trait]
impl CacheRepository for S3CacheRepository {
    async fn get_text(&self, key: &str) -> Option<String> {
        match self.get_object_bytes(key).await {
            Ok(bytes) => decode_fresh_text(key, &bytes, Utc::now(), TEXT_TTL),
            Err(e) => {
                tracing::debug!(key = key, error = %e, "Cache text lookup missed");
                None
            }
        }
    }

    async fn put_text(&self, key: &str, text: &str) -> Result<(), CacheError> {
        let bytes = encode_text_entry(key, text, Utc::now())?;
        self.put_object(key, bytes, "application/json").await
    }

    async fn put_binary(&self, key: &str, bytes: Vec<u8>) -> Result<(), CacheError> {
        self.put_object(key, bytes, "audio/mpeg").await
    }

    async fn get_binary_url(&self, key: &str, ttl: Duration) -> Option<String> {
        match self.object_exists(key).await {
            Ok(true) => {}
            Ok(false) => return None,
            Err(e) => {
                tracing::warn!(key = key, error = %e, "Could not check audio object");
                return None;
            }
        }

        match self.presign_get(key, ttl).await {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(key = key, error = %e, "Could not presign audio URL");
                None
            }
        }
    }

    async fn get_binary(&self, key: &str) -> Option<Vec<u8>> {
        self.get_object_bytes(key).await.ok()
    }

    fn backend_name(&self) -> &'static str {
        "s3"
    }
}

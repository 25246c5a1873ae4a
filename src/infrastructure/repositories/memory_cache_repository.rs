use super::cache_repository::{decode_fresh_text, encode_text_entry, CacheError, CacheRepository, TEXT_TTL};
use async_trait::async_trait;
use chrono::Utc;
use moka::{future::Cache, policy::EvictionPolicy};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_MAX_BYTES: u64 = 256 * 1024 * 1024;

/// Process-local object store for development and tests.
///
/// Capacity is measured in stored bytes. Objects never expire by age; text
/// freshness is checked on read exactly like the S3 backend. Once the byte
/// budget is exceeded the least recently used objects are evicted, so a
/// successful put is no guarantee the object is still there later.
///
/// Audio URLs point at the `/api/cache/*key` route served by this process
/// and stay valid for as long as the object is held.
pub struct MemoryCacheRepository {
    objects: Cache<String, Arc<Vec<u8>>>,
    public_base_url: String,
    text_ttl: Duration,
}

impl MemoryCacheRepository {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            objects: build_store(DEFAULT_MAX_BYTES),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            text_ttl: TEXT_TTL,
        }
    }

    /// Replaces the byte budget; call before storing anything
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.objects = build_store(max_bytes);
        self
    }

    pub fn with_text_ttl(mut self, ttl: Duration) -> Self {
        self.text_ttl = ttl;
        self
    }

    /// Whether an object exists, regardless of age
    pub async fn contains(&self, key: &str) -> bool {
        self.objects.get(key).await.is_some()
    }
}

fn build_store(max_bytes: u64) -> Cache<String, Arc<Vec<u8>>> {
    Cache::builder()
        .weigher(|key: &String, value: &Arc<Vec<u8>>| {
            u32::try_from(key.len() + value.len()).unwrap_or(u32::MAX)
        })
        .max_capacity(max_bytes)
        .eviction_policy(EvictionPolicy::lru())
        .build()
}

#[async_trait]
impl CacheRepository for MemoryCacheRepository {
    async fn get_text(&self, key: &str) -> Option<String> {
        let bytes = self.objects.get(key).await?;
        decode_fresh_text(key, &bytes, Utc::now(), self.text_ttl)
    }

    async fn put_text(&self, key: &str, text: &str) -> Result<(), CacheError> {
        let bytes = encode_text_entry(key, text, Utc::now())?;
        self.objects.insert(key.to_string(), Arc::new(bytes)).await;
        Ok(())
    }

    async fn put_binary(&self, key: &str, bytes: Vec<u8>) -> Result<(), CacheError> {
        self.objects.insert(key.to_string(), Arc::new(bytes)).await;
        Ok(())
    }

    /// `ttl` does not apply: the URL is served while the object is held
    async fn get_binary_url(&self, key: &str, _ttl: Duration) -> Option<String> {
        if !self.contains(key).await {
            return None;
        }
        Some(format!("{}/api/cache/{}", self.public_base_url, key))
    }

    async fn get_binary(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.get(key).await.map(|bytes| bytes.as_ref().clone())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

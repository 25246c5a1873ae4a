use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{json, Value};
use std::time::Duration;

/// Cached scripts are served for 10 minutes after they were written
pub const TEXT_TTL: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Object storage used to cache generated scripts and audio.
///
/// Reads never fail: a missing object, a stale text entry and a storage
/// error all come back as `None`. Writes return errors so callers can log
/// them, but callers must not fail a request because of them.
#[async_trait]
pub trait CacheRepository: Send + Sync {
    /// Text stored under `key`, if it was written less than the TTL ago
    async fn get_text(&self, key: &str) -> Option<String>;

    /// Overwrite `key` with `text`, stamped with the current time
    async fn put_text(&self, key: &str, text: &str) -> Result<(), CacheError>;

    /// Overwrite `key` with raw audio bytes
    async fn put_binary(&self, key: &str, bytes: Vec<u8>) -> Result<(), CacheError>;

    /// Temporary URL for the object at `key`, valid for `ttl`.
    /// Only existence is checked, not age.
    async fn get_binary_url(&self, key: &str, ttl: Duration) -> Option<String>;

    /// Raw bytes of the object at `key`
    async fn get_binary(&self, key: &str) -> Option<Vec<u8>>;

    /// Short backend name for logs and readiness output
    fn backend_name(&self) -> &'static str;
}

/// JSON field holding the text for a given key namespace
fn text_field(key: &str) -> &'static str {
    if key.starts_with("explorations/") {
        "exploration"
    } else {
        "summary"
    }
}

/// Serialize `text` into the `{"<field>": ..., "timestamp": ...}` envelope
pub fn encode_text_entry(key: &str, text: &str, now: DateTime<Utc>) -> Result<Vec<u8>, CacheError> {
    let envelope = json!({
        text_field(key): text,
        "timestamp": now.to_rfc3339(),
    });
    Ok(serde_json::to_vec(&envelope)?)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    // Entries written without an offset are treated as UTC
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Decode an envelope and return its text if `now - timestamp <= ttl`
pub fn decode_fresh_text(
    key: &str,
    bytes: &[u8],
    now: DateTime<Utc>,
    ttl: Duration,
) -> Option<String> {
    let envelope: Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key = key, error = %e, "Unreadable cache entry");
            return None;
        }
    };

    let text = envelope.get(text_field(key))?.as_str()?;
    let created_at = parse_timestamp(envelope.get("timestamp")?.as_str()?)?;
    let ttl = chrono::Duration::from_std(ttl).ok()?;

    if now.signed_duration_since(created_at) <= ttl {
        Some(text.to_string())
    } else {
        tracing::debug!(key = key, created_at = %created_at, "Cache entry is stale");
        None
    }
}

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    infrastructure::repositories::CacheRepository,
};

/// Serves cached audio for backends whose URLs point back at this process
pub struct AudioController {
    cache_repo: Arc<dyn CacheRepository>,
}

impl AudioController {
    pub fn new(cache_repo: Arc<dyn CacheRepository>) -> Self {
        Self { cache_repo }
    }

    /// GET /api/cache/*key - Raw MP3 bytes
    pub async fn get_audio(
        State(controller): State<Arc<AudioController>>,
        Path(key): Path<String>,
    ) -> AppResult<(StatusCode, HeaderMap, Vec<u8>)> {
        let key = key.trim_start_matches('/');
        if !key.starts_with("audio/") || key.split('/').any(|segment| segment == "..") {
            return Err(AppError::NotFound(format!("No audio at {}", key)));
        }

        let bytes = controller
            .cache_repo
            .get_binary(key)
            .await
            .ok_or_else(|| AppError::NotFound(format!("No audio at {}", key)))?;

        tracing::debug!(key = %key, audio_size = bytes.len(), "Serving cached audio");

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/mpeg"));
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        Ok((StatusCode::OK, headers, bytes))
    }
}

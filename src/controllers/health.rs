use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::infrastructure::repositories::CacheRepository;

/// Readiness details reported by `/health/ready`
pub struct HealthState {
    pub cache_repo: Arc<dyn CacheRepository>,
    pub tts_provider: &'static str,
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "cache": state.cache_repo.backend_name(),
            "tts": state.tts_provider
        })),
    )
}

pub mod request_id;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{
    audio::AudioController,
    health::{self, HealthState},
    news::NewsController,
    podcast::PodcastController,
};
use crate::infrastructure::config::Config;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

/// Build the application router with all routes and middleware
pub fn create_router(
    health_state: Arc<HealthState>,
    news_controller: Arc<NewsController>,
    podcast_controller: Arc<PodcastController>,
    audio_controller: Arc<AudioController>,
) -> Router {
    let news_routes = Router::new()
        .route("/api/news", get(NewsController::top_headlines))
        .with_state(news_controller);

    let podcast_routes = Router::new()
        .route("/api/summarize", post(PodcastController::summarize))
        .route("/api/explore-topic", post(PodcastController::explore_topic))
        .with_state(podcast_controller);

    // Only populated by the in-memory cache backend
    let audio_routes = Router::new()
        .route("/api/cache/*key", get(AudioController::get_audio))
        .with_state(audio_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(health_state)
        .merge(news_routes)
        .merge(podcast_routes)
        .merge(audio_routes)
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

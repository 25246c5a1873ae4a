use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::{
    domain::podcast::{
        ExplorationResponse, ExploreTopicRequest, PodcastService, PodcastServiceApi,
        SummarizeRequest, SummaryResponse,
    },
    error::AppResult,
};

pub struct PodcastController {
    podcast_service: Arc<PodcastService>,
}

impl PodcastController {
    pub fn new(podcast_service: Arc<PodcastService>) -> Self {
        Self { podcast_service }
    }

    /// POST /api/summarize - News round-up script and audio
    pub async fn summarize(
        State(controller): State<Arc<PodcastController>>,
        payload: Result<Json<SummarizeRequest>, JsonRejection>,
    ) -> AppResult<Json<SummaryResponse>> {
        let Json(request) = payload?;
        let episode = controller
            .podcast_service
            .summarize(request.articles, request.category, request.style)
            .await?;
        Ok(Json(episode.into()))
    }

    /// POST /api/explore-topic - Topic deep-dive script and audio
    pub async fn explore_topic(
        State(controller): State<Arc<PodcastController>>,
        payload: Result<Json<ExploreTopicRequest>, JsonRejection>,
    ) -> AppResult<Json<ExplorationResponse>> {
        let Json(request) = payload?;
        let episode = controller.podcast_service.explore(request.topic).await?;
        Ok(Json(episode.into()))
    }
}

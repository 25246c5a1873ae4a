use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use std::sync::Arc;

use crate::{
    domain::news::{NewsQuery, NewsResponse, NewsService, NewsServiceApi},
    error::AppResult,
};

pub struct NewsController {
    news_service: Arc<NewsService>,
}

impl NewsController {
    pub fn new(news_service: Arc<NewsService>) -> Self {
        Self { news_service }
    }

    /// GET /api/news - Top headlines for a category
    pub async fn top_headlines(
        State(controller): State<Arc<NewsController>>,
        query: Result<Query<NewsQuery>, QueryRejection>,
    ) -> AppResult<Json<NewsResponse>> {
        let Query(query) = query?;
        let articles = controller
            .news_service
            .top_headlines(query.category, query.page_size)
            .await?;
        Ok(Json(NewsResponse { articles }))
    }
}

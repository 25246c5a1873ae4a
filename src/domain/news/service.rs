use super::error::NewsServiceError;
use super::model::Article;
use crate::infrastructure::repositories::{HeadlineQuery, NewsRepository};
use async_trait::async_trait;
use std::sync::Arc;

const DEFAULT_CATEGORY: &str = "business";
const DEFAULT_COUNTRY: &str = "us";
const DEFAULT_PAGE_SIZE: u32 = 5;
const MAX_PAGE_SIZE: u32 = 100;

pub struct NewsService {
    news_repo: Arc<dyn NewsRepository>,
}

impl NewsService {
    pub fn new(news_repo: Arc<dyn NewsRepository>) -> Self {
        Self { news_repo }
    }
}

#[async_trait]
pub trait NewsServiceApi: Send + Sync {
    /// Top US headlines for a category.
    ///
    /// Defaults to `business` and 5 articles; an empty result is
    /// `NotFound`.
    async fn top_headlines(
        &self,
        category: Option<String>,
        page_size: Option<u32>,
    ) -> Result<Vec<Article>, NewsServiceError>;
}

#[async_trait]
impl NewsServiceApi for NewsService {
    async fn top_headlines(
        &self,
        category: Option<String>,
        page_size: Option<u32>,
    ) -> Result<Vec<Article>, NewsServiceError> {
        let query = self.build_query(category, page_size);

        tracing::info!(
            category = %query.category,
            page_size = query.page_size,
            "Fetching top headlines"
        );

        let articles = self
            .news_repo
            .top_headlines(&query)
            .await
            .map_err(NewsServiceError::Dependency)?;

        if articles.is_empty() {
            return Err(NewsServiceError::NotFound);
        }

        Ok(articles)
    }
}

impl NewsService {
    fn build_query(
        &self,
        category: Option<String>,
        page_size: Option<u32>,
    ) -> HeadlineQuery {
        let category = category
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        let page_size = page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        HeadlineQuery {
            country: DEFAULT_COUNTRY.to_string(),
            category,
            page_size,
        }
    }
}

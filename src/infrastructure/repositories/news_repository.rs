use crate::domain::news::Article;
use async_trait::async_trait;
use serde::Deserialize;

pub const NEWSAPI_BASE_URL: &str = "https://newsapi.org/v2";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlineQuery {
    pub country: String,
    pub category: String,
    pub page_size: u32,
}

/// Source of top headlines
#[async_trait]
pub trait NewsRepository: Send + Sync {
    async fn top_headlines(&self, query: &HeadlineQuery) -> Result<Vec<Article>, String>;
}

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    status: String,
    #[serde(default)]
    articles: Option<Vec<Article>>,
    #[serde(default)]
    message: Option<String>,
}

/// NewsAPI `top-headlines` client
pub struct NewsApiRepository {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl NewsApiRepository {
    pub fn new(http_client: reqwest::Client, api_key: String) -> Self {
        Self {
            http_client,
            api_key,
            base_url: NEWSAPI_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl NewsRepository for NewsApiRepository {
    async fn top_headlines(&self, query: &HeadlineQuery) -> Result<Vec<Article>, String> {
        let page_size = query.page_size.to_string();
        let response = self
            .http_client
            .get(format!("{}/top-headlines", self.base_url))
            .header("X-Api-Key", &self.api_key)
            .query(&[
                ("country", query.country.as_str()),
                ("category", query.category.as_str()),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "NewsAPI request failed");
                format!("NewsAPI request failed: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("NewsAPI returned {}: {}", status.as_u16(), body));
        }

        let payload: NewsApiResponse = response
            .json()
            .await
            .map_err(|e| format!("Unexpected NewsAPI response: {}", e))?;

        if payload.status != "ok" {
            return Err(format!(
                "NewsAPI error: {}",
                payload.message.unwrap_or_else(|| payload.status.clone())
            ));
        }

        Ok(payload.articles.unwrap_or_default())
    }
}

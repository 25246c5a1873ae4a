pub mod error;
pub mod model;
pub mod service;

pub use error::NewsServiceError;
pub use model::{Article, ArticleSource};
pub use service::{NewsService, NewsServiceApi};

use serde::{Deserialize, Serialize};

/// Query for GET /api/news
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NewsQuery {
    pub category: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<u32>,
}

/// Response for GET /api/news
#[derive(Debug, Serialize, Deserialize)]
pub struct NewsResponse {
    pub articles: Vec<Article>,
}

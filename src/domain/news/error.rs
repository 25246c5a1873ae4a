use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum NewsServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("no articles found")]
    NotFound,
}

impl From<NewsServiceError> for AppError {
    fn from(err: NewsServiceError) -> Self {
        match err {
            NewsServiceError::NotFound => AppError::NotFound("No articles found".to_string()),
            NewsServiceError::Dependency(msg) => AppError::ExternalService(msg),
        }
    }
}

use crate::error::AppError;

/// Failure of a single text-to-speech call
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SynthesisError {
    #[error("provider returned status {status}: {message}")]
    Provider { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("provider returned no audio")]
    EmptyAudio,
    #[error("cannot synthesize empty text")]
    EmptyText,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssemblyError {
    #[error("script contained no speaker turns")]
    NoUtterances,
    #[error("speech synthesis failed for all {attempted} turns")]
    NoAudio { attempted: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum PodcastServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("upstream unavailable: {0}")]
    Upstream(String),
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}

impl From<PodcastServiceError> for AppError {
    fn from(err: PodcastServiceError) -> Self {
        match err {
            PodcastServiceError::Invalid(msg) => AppError::BadRequest(msg),
            PodcastServiceError::Upstream(msg) => AppError::ExternalService(msg),
            PodcastServiceError::Assembly(e) => AppError::ExternalService(e.to_string()),
        }
    }
}

pub mod assembler;
pub mod cache_key;
pub mod error;
pub mod prompt;
pub mod script;
pub mod service;
pub mod voice;

pub use assembler::{AssembledAudio, AudioAssembler};
pub use cache_key::CacheKeys;
pub use error::{AssemblyError, PodcastServiceError, SynthesisError};
pub use prompt::{Prompt, PromptMode};
pub use script::{Speaker, Utterance};
pub use service::{PodcastService, PodcastServiceApi};
pub use voice::VoiceMap;

use crate::domain::news::Article;
use serde::{Deserialize, Serialize};

/// Tone of a category round-up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptStyle {
    #[default]
    Normal,
    Funny,
}

/// Request for POST /api/summarize
#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub style: ScriptStyle,
}

/// Request for POST /api/explore-topic
#[derive(Debug, Serialize, Deserialize)]
pub struct ExploreTopicRequest {
    #[serde(default)]
    pub topic: String,
}

/// Response for POST /api/summarize
#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
    pub cached: bool,
    pub audio_url: Option<String>,
}

/// Response for POST /api/explore-topic
#[derive(Debug, Serialize, Deserialize)]
pub struct ExplorationResponse {
    pub exploration: String,
    pub cached: bool,
    pub audio_url: Option<String>,
}

/// A script plus where its audio can be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodcastEpisode {
    pub text: String,
    pub cached: bool,
    pub audio_url: Option<String>,
}

impl From<PodcastEpisode> for SummaryResponse {
    fn from(episode: PodcastEpisode) -> Self {
        Self {
            summary: episode.text,
            cached: episode.cached,
            audio_url: episode.audio_url,
        }
    }
}

impl From<PodcastEpisode> for ExplorationResponse {
    fn from(episode: PodcastEpisode) -> Self {
        Self {
            exploration: episode.text,
            cached: episode.cached,
            audio_url: episode.audio_url,
        }
    }
}

use super::assembler::AudioAssembler;
use super::cache_key::CacheKeys;
use super::error::PodcastServiceError;
use super::prompt::{self, Prompt};
use super::script;
use super::{PodcastEpisode, ScriptStyle};
use crate::domain::news::Article;
use crate::infrastructure::repositories::{CacheRepository, CompletionRepository};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Lifetime of the audio URLs handed to clients
pub const AUDIO_URL_TTL: Duration = Duration::from_secs(3600);

pub struct PodcastService {
    cache_repo: Arc<dyn CacheRepository>,
    script_repo: Arc<dyn CompletionRepository>,
    research_repo: Option<Arc<dyn CompletionRepository>>,
    assembler: AudioAssembler,
}

impl PodcastService {
    pub fn new(
        cache_repo: Arc<dyn CacheRepository>,
        script_repo: Arc<dyn CompletionRepository>,
        research_repo: Option<Arc<dyn CompletionRepository>>,
        assembler: AudioAssembler,
    ) -> Self {
        Self {
            cache_repo,
            script_repo,
            research_repo,
            assembler,
        }
    }
}

#[async_trait]
pub trait PodcastServiceApi: Send + Sync {
    /// Two-host news round-up for a category.
    ///
    /// Served from cache while the stored script is younger than 10
    /// minutes and its audio exists. Otherwise the script is generated,
    /// voiced turn by turn and written back to the cache.
    async fn summarize(
        &self,
        articles: Vec<Article>,
        category: String,
        style: ScriptStyle,
    ) -> Result<PodcastEpisode, PodcastServiceError>;

    /// Two-host deep dive into a free-form topic, cached the same way
    async fn explore(&self, topic: String) -> Result<PodcastEpisode, PodcastServiceError>;
}

#[async_trait]
impl PodcastServiceApi for PodcastService {
    async fn summarize(
        &self,
        articles: Vec<Article>,
        category: String,
        style: ScriptStyle,
    ) -> Result<PodcastEpisode, PodcastServiceError> {
        if articles.is_empty() {
            return Err(PodcastServiceError::Invalid("No articles provided".to_string()));
        }
        let category = category.trim();
        if category.is_empty() {
            return Err(PodcastServiceError::Invalid("Category is required".to_string()));
        }
        let keys = CacheKeys::summary(category, style).ok_or_else(|| {
            PodcastServiceError::Invalid("Category must contain letters or digits".to_string())
        })?;

        tracing::info!(
            category = %category,
            style = ?style,
            article_count = articles.len(),
            "Summarize request"
        );

        if let Some(episode) = self.check_cache(&keys).await {
            return Ok(episode);
        }

        let prompt = prompt::summary_prompt(&articles, category, style);
        self.produce(&keys, &prompt).await
    }

    async fn explore(&self, topic: String) -> Result<PodcastEpisode, PodcastServiceError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(PodcastServiceError::Invalid("Topic is required".to_string()));
        }
        let keys = CacheKeys::exploration(topic).ok_or_else(|| {
            PodcastServiceError::Invalid("Topic must contain letters or digits".to_string())
        })?;

        tracing::info!(topic = %topic, "Explore request");

        if let Some(episode) = self.check_cache(&keys).await {
            return Ok(episode);
        }

        let research = self.research(topic).await;
        let prompt = prompt::exploration_prompt(topic, research.as_deref());
        self.produce(&keys, &prompt).await
    }
}

impl PodcastService {
    /// A hit needs both a fresh script and its audio
    async fn check_cache(&self, keys: &CacheKeys) -> Option<PodcastEpisode> {
        let Some(text) = self.cache_repo.get_text(&keys.text).await else {
            tracing::info!(stage = "check_cache", key = %keys.text, "Cache miss");
            return None;
        };

        let Some(audio_url) = self
            .cache_repo
            .get_binary_url(&keys.audio, AUDIO_URL_TTL)
            .await
        else {
            tracing::info!(
                stage = "check_cache",
                key = %keys.audio,
                "Cache miss, fresh script without audio"
            );
            return None;
        };

        tracing::info!(stage = "check_cache", key = %keys.text, "Cache hit");

        Some(PodcastEpisode {
            text,
            cached: true,
            audio_url: Some(audio_url),
        })
    }

    async fn produce(
        &self,
        keys: &CacheKeys,
        prompt: &Prompt,
    ) -> Result<PodcastEpisode, PodcastServiceError> {
        let text = self.generate(prompt).await?;

        let utterances = script::parse(&text);
        tracing::info!(
            stage = "synthesize_audio",
            utterance_count = utterances.len(),
            "Script parsed"
        );
        let audio = self.assembler.assemble(&utterances).await?;

        let audio_url = self.write_cache(keys, &text, audio.bytes).await;

        Ok(PodcastEpisode {
            text,
            cached: false,
            audio_url,
        })
    }

    async fn generate(&self, prompt: &Prompt) -> Result<String, PodcastServiceError> {
        let text = self.script_repo.complete(prompt).await.map_err(|e| {
            tracing::error!(stage = "generate_text", error = %e, "Script generation failed");
            PodcastServiceError::Upstream(format!("Script generation failed: {}", e))
        })?;

        if text.trim().is_empty() {
            tracing::error!(stage = "generate_text", "Script generation returned no text");
            return Err(PodcastServiceError::Upstream(
                "Script generation returned no text".to_string(),
            ));
        }

        tracing::info!(
            stage = "generate_text",
            script_length = text.len(),
            "Script generated"
        );

        Ok(text)
    }

    /// Research notes for an exploration, if a research backend is configured
    async fn research(&self, topic: &str) -> Option<String> {
        let research_repo = self.research_repo.as_ref()?;

        match research_repo.complete(&prompt::research_prompt(topic)).await {
            Ok(notes) if !notes.trim().is_empty() => Some(notes),
            Ok(_) => Some(prompt::research_fallback(topic)),
            Err(e) => {
                tracing::warn!(topic = %topic, error = %e, "Research failed, using fallback");
                Some(prompt::research_fallback(topic))
            }
        }
    }

    /// Audio first, then text. Failures are logged and never fail the request.
    async fn write_cache(&self, keys: &CacheKeys, text: &str, audio: Vec<u8>) -> Option<String> {
        let audio_size = audio.len();
        if let Err(e) = self.cache_repo.put_binary(&keys.audio, audio).await {
            tracing::warn!(
                stage = "write_cache",
                key = %keys.audio,
                error = %e,
                "Failed to cache audio"
            );
            return None;
        }

        if let Err(e) = self.cache_repo.put_text(&keys.text, text).await {
            tracing::warn!(
                stage = "write_cache",
                key = %keys.text,
                error = %e,
                "Failed to cache script"
            );
        }

        let audio_url = self
            .cache_repo
            .get_binary_url(&keys.audio, AUDIO_URL_TTL)
            .await;

        tracing::info!(
            stage = "write_cache",
            key = %keys.audio,
            audio_size,
            has_url = audio_url.is_some(),
            "Podcast cached"
        );

        audio_url
    }
}

use crate::domain::podcast::{Speaker, VoiceMap};
use crate::infrastructure::repositories::{
    ELEVENLABS_BASE_URL, NEWSAPI_BASE_URL, PERPLEXITY_BASE_URL,
};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    pub aws_region: String,
    // Cache
    pub cache_backend: CacheBackend,
    pub s3_bucket_name: String,
    pub public_base_url: String,
    // News
    pub news_api_key: String,
    pub news_api_base_url: String,
    // Script generation
    pub openai_api_key: String,
    pub openai_model: String,
    pub perplexity_api_key: Option<String>,
    pub perplexity_base_url: String,
    // Speech
    pub tts_provider: TtsProvider,
    pub elevenlabs_api_key: Option<String>,
    pub elevenlabs_base_url: String,
    pub host_a_voice: Option<String>,
    pub host_b_voice: Option<String>,
    pub synthesis_concurrency: usize,
    pub http_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    S3,
    Memory,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    ElevenLabs,
    Polly,
}

impl TtsProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            TtsProvider::ElevenLabs => "elevenlabs",
            TtsProvider::Polly => "polly",
        }
    }
}

fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// An explicit `LOG_FORMAT` wins; otherwise production logs JSON
fn log_format(environment: &Environment, value: Option<&str>) -> LogFormat {
    match value.map(str::to_lowercase).as_deref() {
        Some("json") => LogFormat::Json,
        Some(_) => LogFormat::Pretty,
        None if *environment == Environment::Production => LogFormat::Json,
        None => LogFormat::Pretty,
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let tts_provider = env::var("TTS_PROVIDER")
            .unwrap_or_else(|_| "elevenlabs".to_string())
            .parse::<String>()
            .map(|s| match s.to_lowercase().as_str() {
                "polly" => TtsProvider::Polly,
                _ => TtsProvider::ElevenLabs,
            })?;

        let cache_backend = env::var("CACHE_BACKEND")
            .unwrap_or_else(|_| "s3".to_string())
            .parse::<String>()
            .map(|s| match s.to_lowercase().as_str() {
                "memory" => CacheBackend::Memory,
                _ => CacheBackend::S3,
            })?;

        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()?;

        let environment = env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .parse::<String>()
            .map(|s| match s.as_str() {
                "production" => Environment::Production,
                _ => Environment::Development,
            })?;

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            log_format: log_format(&environment, optional_var("LOG_FORMAT").as_deref()),
            environment,
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            cache_backend,
            s3_bucket_name: match cache_backend {
                CacheBackend::S3 => env::var("AWS_S3_BUCKET_NAME")?,
                CacheBackend::Memory => optional_var("AWS_S3_BUCKET_NAME").unwrap_or_default(),
            },
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}", port)),
            news_api_key: env::var("NEWS_API_KEY")?,
            news_api_base_url: env::var("NEWS_API_BASE_URL")
                .unwrap_or_else(|_| NEWSAPI_BASE_URL.to_string()),
            openai_api_key: env::var("OPENAI_API_KEY")?,
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            perplexity_api_key: optional_var("PERPLEXITY_API_KEY"),
            perplexity_base_url: env::var("PERPLEXITY_BASE_URL")
                .unwrap_or_else(|_| PERPLEXITY_BASE_URL.to_string()),
            tts_provider,
            elevenlabs_api_key: match tts_provider {
                TtsProvider::ElevenLabs => Some(env::var("ELEVENLABS_API_KEY")?),
                TtsProvider::Polly => optional_var("ELEVENLABS_API_KEY"),
            },
            elevenlabs_base_url: env::var("ELEVENLABS_BASE_URL")
                .unwrap_or_else(|_| ELEVENLABS_BASE_URL.to_string()),
            host_a_voice: optional_var("HOST_A_VOICE"),
            host_b_voice: optional_var("HOST_B_VOICE"),
            synthesis_concurrency: env::var("SYNTHESIS_CONCURRENCY")
                .unwrap_or_else(|_| "1".to_string())
                .parse()?,
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()?,
        };

        Ok(config)
    }

    /// Provider defaults, with per-host overrides from the environment
    pub fn voice_map(&self) -> VoiceMap {
        let defaults = match self.tts_provider {
            TtsProvider::ElevenLabs => VoiceMap::elevenlabs(),
            TtsProvider::Polly => VoiceMap::polly(),
        };
        let host_a = self
            .host_a_voice
            .clone()
            .unwrap_or_else(|| defaults.voice_for(Speaker::HostA).to_string());
        let host_b = self
            .host_b_voice
            .clone()
            .unwrap_or_else(|| defaults.voice_for(Speaker::HostB).to_string());
        VoiceMap::new(host_a, host_b)
    }
}

pub mod cache_repository;
pub mod completion_repository;
pub mod elevenlabs_tts_repository;
pub mod memory_cache_repository;
pub mod news_repository;
pub mod polly_tts_repository;
pub mod s3_cache_repository;
pub mod tts_repository;

pub use cache_repository::{CacheError, CacheRepository, TEXT_TTL};
pub use completion_repository::{CompletionRepository, OpenAiCompletionRepository, PERPLEXITY_BASE_URL};
pub use elevenlabs_tts_repository::{ElevenLabsTtsRepository, ELEVENLABS_BASE_URL};
pub use memory_cache_repository::MemoryCacheRepository;
pub use news_repository::{HeadlineQuery, NewsApiRepository, NewsRepository, NEWSAPI_BASE_URL};
pub use polly_tts_repository::PollyTtsRepository;
pub use s3_cache_repository::S3CacheRepository;
pub use tts_repository::TtsRepository;

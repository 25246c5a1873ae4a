use news_podcast_backend::controllers::{
    audio::AudioController, health::HealthState, news::NewsController, podcast::PodcastController,
};
use news_podcast_backend::domain::news::NewsService;
use news_podcast_backend::domain::podcast::{AudioAssembler, PodcastService};
use news_podcast_backend::infrastructure::config::{CacheBackend, Config, LogFormat, TtsProvider};
use news_podcast_backend::infrastructure::http::{create_router, start_http_server};
use news_podcast_backend::infrastructure::repositories::{
    CacheRepository, CompletionRepository, ElevenLabsTtsRepository, MemoryCacheRepository,
    NewsApiRepository, OpenAiCompletionRepository, PollyTtsRepository, S3CacheRepository,
    TtsRepository,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting News Podcast Backend on {}:{}",
        config.host,
        config.port
    );

    let timeout = Duration::from_secs(config.http_timeout_secs);
    let http_client = reqwest::Client::builder().timeout(timeout).build()?;

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.aws_region.clone()))
        .load()
        .await;

    tracing::info!(
        region = ?aws_config.region(),
        cache_backend = ?config.cache_backend,
        tts_provider = config.tts_provider.as_str(),
        "AWS configuration loaded"
    );

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Repositories
    let cache_repo: Arc<dyn CacheRepository> = match config.cache_backend {
        CacheBackend::S3 => Arc::new(S3CacheRepository::new(
            Arc::new(aws_sdk_s3::Client::new(&aws_config)),
            config.s3_bucket_name.clone(),
        )),
        CacheBackend::Memory => {
            tracing::warn!("Using in-memory cache, artifacts are lost on restart");
            Arc::new(MemoryCacheRepository::new(config.public_base_url.clone()))
        }
    };

    let tts_repo: Arc<dyn TtsRepository> = match config.tts_provider {
        TtsProvider::ElevenLabs => Arc::new(
            ElevenLabsTtsRepository::new(
                http_client.clone(),
                config.elevenlabs_api_key.clone().unwrap_or_default(),
            )
            .with_base_url(config.elevenlabs_base_url.clone()),
        ),
        TtsProvider::Polly => Arc::new(PollyTtsRepository::new(Arc::new(
            aws_sdk_polly::Client::new(&aws_config),
        ))),
    };

    let news_repo = Arc::new(
        NewsApiRepository::new(http_client.clone(), config.news_api_key.clone())
            .with_base_url(config.news_api_base_url.clone()),
    );

    let script_repo: Arc<dyn CompletionRepository> = Arc::new(
        OpenAiCompletionRepository::script_writer(&config.openai_api_key, &config.openai_model, timeout),
    );

    let research_repo: Option<Arc<dyn CompletionRepository>> =
        config.perplexity_api_key.as_deref().map(|api_key| {
            Arc::new(OpenAiCompletionRepository::perplexity(
                api_key,
                &config.perplexity_base_url,
                timeout,
            )) as Arc<dyn CompletionRepository>
        });
    if research_repo.is_none() {
        tracing::info!("PERPLEXITY_API_KEY not set, explorations run without research notes");
    }

    // 2. Services
    let assembler = AudioAssembler::new(tts_repo, config.voice_map())
        .with_concurrency(config.synthesis_concurrency);
    let news_service = Arc::new(NewsService::new(news_repo));
    let podcast_service = Arc::new(PodcastService::new(
        cache_repo.clone(),
        script_repo,
        research_repo,
        assembler,
    ));

    // 3. Controllers
    let health_state = Arc::new(HealthState {
        cache_repo: cache_repo.clone(),
        tts_provider: config.tts_provider.as_str(),
    });
    let news_controller = Arc::new(NewsController::new(news_service));
    let podcast_controller = Arc::new(PodcastController::new(podcast_service));
    let audio_controller = Arc::new(AudioController::new(cache_repo));

    let app = create_router(health_state, news_controller, podcast_controller, audio_controller);

    start_http_server(Arc::new(config), app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "news_podcast_backend=debug,tower_http=debug".into())
    };

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(env_filter())
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter())
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

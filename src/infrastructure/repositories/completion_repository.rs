use crate::domain::podcast::Prompt;
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::time::Duration;

pub const PERPLEXITY_BASE_URL: &str = "https://api.perplexity.ai";

/// Black-box text generator used for podcast scripts and research notes
#[async_trait]
pub trait CompletionRepository: Send + Sync {
    /// Returns the first choice's message content
    async fn complete(&self, prompt: &Prompt) -> Result<String, String>;
}

/// Chat completions against OpenAI or any OpenAI-compatible API
pub struct OpenAiCompletionRepository {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    timeout: Duration,
}

impl OpenAiCompletionRepository {
    pub fn new(client: Client<OpenAIConfig>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            model: model.into(),
            temperature: None,
            max_tokens: None,
            timeout,
        }
    }

    /// OpenAI script writer: temperature 0.7, at most 1000 tokens
    pub fn script_writer(api_key: &str, model: &str, timeout: Duration) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self::new(Client::with_config(config), model, timeout).with_sampling(0.7, 1000)
    }

    /// Perplexity `sonar` research assistant
    pub fn perplexity(api_key: &str, base_url: &str, timeout: Duration) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        Self::new(Client::with_config(config), "sonar", timeout)
    }

    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = Some(temperature);
        self.max_tokens = Some(max_tokens);
        self
    }

    async fn send(&self, prompt: &Prompt) -> Result<String, String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(prompt.system.as_str())
                .build()
                .map_err(|e| e.to_string())?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt.user.as_str())
                .build()
                .map_err(|e| e.to_string())?
                .into(),
        ];

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.as_str()).messages(messages);
        if let Some(temperature) = self.temperature {
            args.temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            args.max_tokens(max_tokens);
        }
        let request = args.build().map_err(|e| e.to_string())?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| format!("chat completion failed: {}", e))?;

        if let Some(usage) = &response.usage {
            tracing::debug!(
                model = %self.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completion usage"
            );
        }

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| "chat completion returned no content".to_string())
    }
}

#[async_trait]
impl CompletionRepository for OpenAiCompletionRepository {
    async fn complete(&self, prompt: &Prompt) -> Result<String, String> {
        let start_time = std::time::Instant::now();

        let content = tokio::time::timeout(self.timeout, self.send(prompt))
            .await
            .map_err(|_| format!("chat completion timed out after {:?}", self.timeout))?
            .inspect_err(|e| tracing::error!(model = %self.model, error = %e, "Chat completion failed"))?;

        tracing::info!(
            model = %self.model,
            latency_ms = start_time.elapsed().as_millis(),
            content_length = content.len(),
            "Chat completion finished"
        );

        Ok(content)
    }
}

use super::tts_repository::TtsRepository;
use crate::domain::podcast::SynthesisError;
use async_trait::async_trait;
use aws_sdk_polly::{
    error::DisplayErrorContext,
    types::{Engine, OutputFormat, VoiceId},
    Client as PollyClient,
};
use regex::Regex;
use std::sync::{Arc, LazyLock};

/// AWS Polly has a limit of 3000 characters per request
const MAX_BATCH_SIZE: usize = 3000;

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+\s+").expect("valid sentence regex"));

/// AWS Polly implementation of TTS repository
pub struct PollyTtsRepository {
    polly_client: Arc<PollyClient>,
}

impl PollyTtsRepository {
    pub fn new(polly_client: Arc<PollyClient>) -> Self {
        Self { polly_client }
    }

    async fn call_polly(&self, text: &str, voice: &str) -> Result<Vec<u8>, SynthesisError> {
        tracing::debug!(
            voice = voice,
            text_length = text.len(),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(VoiceId::from(voice))
            .output_format(OutputFormat::Mp3)
            .engine(Engine::Neural)
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                tracing::error!(error = %message, voice = voice, "AWS Polly synthesize_speech failed");
                match e.raw_response() {
                    Some(raw) => SynthesisError::Provider {
                        status: raw.status().as_u16(),
                        message,
                    },
                    None => SynthesisError::Transport(message),
                }
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            SynthesisError::Transport(e.to_string())
        })?;

        Ok(audio_stream.into_bytes().to_vec())
    }
}

/// Split text into chunks under Polly's request limit, preferring sentence
/// boundaries. A single sentence longer than the limit is cut on char
/// boundaries.
fn split_into_batches(text: &str) -> Vec<String> {
    if text.len() <= MAX_BATCH_SIZE {
        return vec![text.to_string()];
    }

    let mut sentences = Vec::new();
    let mut last_end = 0;
    for mat in SENTENCE_END.find_iter(text) {
        sentences.push(&text[last_end..mat.end()]);
        last_end = mat.end();
    }
    if last_end < text.len() {
        sentences.push(&text[last_end..]);
    }

    let mut batches = Vec::new();
    let mut current = String::new();
    for sentence in sentences {
        if !current.is_empty() && current.len() + sentence.len() > MAX_BATCH_SIZE {
            batches.push(current.trim().to_string());
            current.clear();
        }
        if sentence.len() > MAX_BATCH_SIZE {
            let chars: Vec<char> = sentence.chars().collect();
            batches.extend(
                chars
                    .chunks(MAX_BATCH_SIZE)
                    .map(|chunk| chunk.iter().collect::<String>()),
            );
        } else {
            current.push_str(sentence);
        }
    }
    if !current.trim().is_empty() {
        batches.push(current.trim().to_string());
    }

    batches
}

#[async_trait]
impl TtsRepository for PollyTtsRepository {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, SynthesisError> {
        if text.trim().is_empty() {
            return Err(SynthesisError::EmptyText);
        }

        let start_time = std::time::Instant::now();
        let batches = split_into_batches(text);

        let mut merged_audio = Vec::new();
        for batch in &batches {
            merged_audio.extend(self.call_polly(batch, voice).await?);
        }
        if merged_audio.is_empty() {
            return Err(SynthesisError::EmptyAudio);
        }

        tracing::info!(
            provider = "polly",
            voice = voice,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            batch_count = batches.len(),
            audio_size_bytes = merged_audio.len(),
            "TTS synthesis completed"
        );

        Ok(merged_audio)
    }
}

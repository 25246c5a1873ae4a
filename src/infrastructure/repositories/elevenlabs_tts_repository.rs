use super::tts_repository::TtsRepository;
use crate::domain::podcast::SynthesisError;
use async_trait::async_trait;
use serde::Serialize;

pub const ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io";
const DEFAULT_MODEL_ID: &str = "eleven_monolingual_v1";

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

/// ElevenLabs streaming text-to-speech
pub struct ElevenLabsTtsRepository {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
    model_id: String,
}

impl ElevenLabsTtsRepository {
    pub fn new(http_client: reqwest::Client, api_key: String) -> Self {
        Self {
            http_client,
            api_key,
            base_url: ELEVENLABS_BASE_URL.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn speech_url(&self, voice: &str) -> String {
        format!("{}/v1/text-to-speech/{}/stream", self.base_url, voice)
    }
}

#[async_trait]
impl TtsRepository for ElevenLabsTtsRepository {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, SynthesisError> {
        if text.trim().is_empty() {
            return Err(SynthesisError::EmptyText);
        }

        let start_time = std::time::Instant::now();
        tracing::debug!(
            voice = voice,
            text_length = text.len(),
            text_preview = %text.chars().take(80).collect::<String>(),
            "Calling ElevenLabs text-to-speech"
        );

        let body = SpeechRequest {
            text,
            model_id: &self.model_id,
            voice_settings: VoiceSettings {
                stability: 0.5,
                similarity_boost: 0.5,
            },
        };

        let response = self
            .http_client
            .post(self.speech_url(voice))
            .header("Accept", "audio/mpeg")
            .header("xi-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, voice = voice, "ElevenLabs request failed");
                SynthesisError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = status.as_u16(),
                voice = voice,
                message = %message,
                "ElevenLabs returned an error status"
            );
            return Err(SynthesisError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::Transport(e.to_string()))?;
        if audio.is_empty() {
            return Err(SynthesisError::EmptyAudio);
        }

        tracing::info!(
            provider = "elevenlabs",
            voice = voice,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            audio_size_bytes = audio.len(),
            "TTS synthesis completed"
        );

        Ok(audio.to_vec())
    }
}

use crate::domain::podcast::SynthesisError;
use async_trait::async_trait;

/// Repository for text-to-speech synthesis.
/// Abstracts the underlying TTS provider (ElevenLabs, AWS Polly, ...)
///
/// One call synthesizes one speaker turn with one voice. Implementations
/// must not retry; the caller decides what a failed turn means.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize `text` with the provider voice `voice`
    ///
    /// Returns MP3 audio bytes
    ///
    /// # Errors
    /// `SynthesisError::Provider` carries the provider's HTTP status on
    /// non-2xx responses.
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, SynthesisError>;
}

use super::error::{AssemblyError, SynthesisError};
use super::script::Utterance;
use super::voice::VoiceMap;
use crate::infrastructure::repositories::TtsRepository;
use futures::stream::{self, StreamExt};
use std::sync::Arc;

/// Concatenated MP3 for a whole script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledAudio {
    pub bytes: Vec<u8>,
    /// Turns that produced audio
    pub clips: usize,
    /// Turns dropped because synthesis failed
    pub skipped: usize,
}

/// Turns parsed utterances into one audio track, one TTS call per turn.
///
/// Clips are joined by raw byte concatenation in script order. A failed
/// turn is logged and left out; the episode only fails when no turn
/// produced audio.
pub struct AudioAssembler {
    tts_repo: Arc<dyn TtsRepository>,
    voices: VoiceMap,
    concurrency: usize,
}

impl AudioAssembler {
    pub fn new(tts_repo: Arc<dyn TtsRepository>, voices: VoiceMap) -> Self {
        Self {
            tts_repo,
            voices,
            concurrency: 1,
        }
    }

    /// Allow up to `n` synthesis calls in flight. Output order is unchanged.
    pub fn with_concurrency(mut self, n: usize) -> Self {
        self.concurrency = n.max(1);
        self
    }

    pub async fn assemble(&self, utterances: &[Utterance]) -> Result<AssembledAudio, AssemblyError> {
        if utterances.is_empty() {
            return Err(AssemblyError::NoUtterances);
        }

        let tts_repo = &self.tts_repo;
        let voices = &self.voices;
        let turns: Vec<_> = utterances
            .iter()
            .map(|utterance| synthesize_turn(tts_repo, voices, utterance))
            .collect();
        let results: Vec<(&Utterance, Result<Vec<u8>, SynthesisError>)> = stream::iter(turns)
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut bytes = Vec::new();
        let mut clips = 0;
        let mut skipped = 0;

        for (utterance, result) in results {
            match result {
                Ok(clip) if !clip.is_empty() => {
                    bytes.extend_from_slice(&clip);
                    clips += 1;
                }
                Ok(_) => {
                    tracing::warn!(
                        speaker = %utterance.speaker,
                        position = utterance.position,
                        "Skipping turn with empty audio"
                    );
                    skipped += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        speaker = %utterance.speaker,
                        position = utterance.position,
                        error = %e,
                        "Skipping turn after synthesis failure"
                    );
                    skipped += 1;
                }
            }
        }

        if clips == 0 {
            return Err(AssemblyError::NoAudio {
                attempted: utterances.len(),
            });
        }

        tracing::info!(
            clips,
            skipped,
            audio_size = bytes.len(),
            "Podcast audio assembled"
        );

        Ok(AssembledAudio {
            bytes,
            clips,
            skipped,
        })
    }
}

async fn synthesize_turn<'a>(
    tts_repo: &'a Arc<dyn TtsRepository>,
    voices: &'a VoiceMap,
    utterance: &'a Utterance,
) -> (&'a Utterance, Result<Vec<u8>, SynthesisError>) {
    let voice = voices.voice_for(utterance.speaker);
    (utterance, tts_repo.synthesize(&utterance.text, voice).await)
}

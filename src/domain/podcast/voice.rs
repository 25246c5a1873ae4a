use super::script::Speaker;

/// Default ElevenLabs voices for the two hosts
pub const ELEVENLABS_HOST_A_VOICE: &str = "pwMBn0SsmN1220Aorv15";
pub const ELEVENLABS_HOST_B_VOICE: &str = "UgBBYS2sOqTuMpoF3BR0";

/// Polly neural voices
pub const POLLY_HOST_A_VOICE: &str = "Matthew";
pub const POLLY_HOST_B_VOICE: &str = "Joanna";

/// Provider voice id for each host. Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceMap {
    host_a: String,
    host_b: String,
}

impl VoiceMap {
    pub fn new(host_a: impl Into<String>, host_b: impl Into<String>) -> Self {
        Self {
            host_a: host_a.into(),
            host_b: host_b.into(),
        }
    }

    pub fn elevenlabs() -> Self {
        Self::new(ELEVENLABS_HOST_A_VOICE, ELEVENLABS_HOST_B_VOICE)
    }

    pub fn polly() -> Self {
        Self::new(POLLY_HOST_A_VOICE, POLLY_HOST_B_VOICE)
    }

    pub fn voice_for(&self, speaker: Speaker) -> &str {
        match speaker {
            Speaker::HostA => &self.host_a,
            Speaker::HostB => &self.host_b,
        }
    }
}

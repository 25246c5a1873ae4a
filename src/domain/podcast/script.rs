use serde::{Deserialize, Serialize};

/// One of the two podcast hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Speaker {
    HostA,
    HostB,
}

impl Speaker {
    pub const ALL: [Speaker; 2] = [Speaker::HostA, Speaker::HostB];

    /// Line prefix that opens a turn for this speaker
    pub fn marker(&self) -> &'static str {
        match self {
            Speaker::HostA => "Host A:",
            Speaker::HostB => "Host B:",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Speaker::HostA => "Host A",
            Speaker::HostB => "Host B",
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A contiguous block of text spoken by one host.
///
/// `position` is the 1-based script line the turn started on, so it grows
/// monotonically across the parsed sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    pub speaker: Speaker,
    pub text: String,
    pub position: usize,
}

enum ParserState {
    NoSpeaker,
    Collecting {
        speaker: Speaker,
        position: usize,
        buffer: Vec<String>,
    },
}

impl ParserState {
    fn feed(self, line_number: usize, line: &str, out: &mut Vec<Utterance>) -> Self {
        match (self, match_marker(line)) {
            (
                ParserState::Collecting {
                    speaker,
                    position,
                    mut buffer,
                },
                Some((next, remainder)),
            ) if speaker == next => {
                push_fragment(&mut buffer, remainder);
                ParserState::Collecting {
                    speaker,
                    position,
                    buffer,
                }
            }
            (state, Some((next, remainder))) => {
                state.finish(out);
                let mut buffer = Vec::new();
                push_fragment(&mut buffer, remainder);
                ParserState::Collecting {
                    speaker: next,
                    position: line_number,
                    buffer,
                }
            }
            (
                ParserState::Collecting {
                    speaker,
                    position,
                    mut buffer,
                },
                None,
            ) => {
                push_fragment(&mut buffer, line);
                ParserState::Collecting {
                    speaker,
                    position,
                    buffer,
                }
            }
            (ParserState::NoSpeaker, None) => {
                if !line.trim().is_empty() {
                    tracing::trace!(line = line_number, "Discarding line before first speaker marker");
                }
                ParserState::NoSpeaker
            }
        }
    }

    fn finish(self, out: &mut Vec<Utterance>) {
        if let ParserState::Collecting {
            speaker,
            position,
            buffer,
        } = self
        {
            let text = buffer.join(" ");
            if !text.is_empty() {
                out.push(Utterance {
                    speaker,
                    text,
                    position,
                });
            }
        }
    }
}

fn match_marker(line: &str) -> Option<(Speaker, &str)> {
    Speaker::ALL
        .iter()
        .find_map(|speaker| line.strip_prefix(speaker.marker()).map(|rest| (*speaker, rest)))
}

fn push_fragment(buffer: &mut Vec<String>, fragment: &str) {
    let fragment = fragment.trim();
    if !fragment.is_empty() {
        buffer.push(fragment.to_string());
    }
}

/// Split a dialogue script into ordered speaker turns.
///
/// Consecutive lines for the same host collapse into one utterance; a host
/// that speaks again after the other host produces a new utterance.
pub fn parse(script: &str) -> Vec<Utterance> {
    let mut utterances = Vec::new();
    let mut state = ParserState::NoSpeaker;

    for (index, line) in script.lines().enumerate() {
        state = state.feed(index + 1, line, &mut utterances);
    }
    state.finish(&mut utterances);

    utterances
}

/// Render utterances back into the normalized one-turn-per-line form
pub fn render(utterances: &[Utterance]) -> String {
    utterances
        .iter()
        .map(|u| format!("{} {}", u.speaker.marker(), u.text))
        .collect::<Vec<_>>()
        .join("\n")
}

use super::ScriptStyle;
use regex::Regex;
use std::sync::LazyLock;

static UNSAFE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").expect("valid token regex"));
static UNDERSCORE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_{2,}").expect("valid underscore regex"));

/// Reduce a category or topic to `[A-Za-z0-9_]`, with no leading, trailing
/// or doubled underscores. `"AI & Robots!"` becomes `"AI_Robots"`.
pub fn sanitize(raw: &str) -> String {
    let replaced = UNSAFE_RUN.replace_all(raw, "_");
    UNDERSCORE_RUN
        .replace_all(&replaced, "_")
        .trim_matches('_')
        .to_string()
}

/// Storage keys for one podcast: the script and its audio
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKeys {
    pub text: String,
    pub audio: String,
}

impl CacheKeys {
    /// Keys for a category round-up. `None` if the category has no usable
    /// characters.
    pub fn summary(category: &str, style: ScriptStyle) -> Option<Self> {
        let mut token = sanitize(category);
        if token.is_empty() {
            return None;
        }
        if style == ScriptStyle::Funny {
            token.push_str("_funny");
        }

        Some(Self {
            text: format!("summaries/{token}.json"),
            audio: format!("audio/{token}.mp3"),
        })
    }

    /// Keys for a topic exploration: `explorations/<token>.json` and
    /// `audio/explorations/<token>.mp3`.
    ///
    /// Exploration audio is nested one level below the flat
    /// `audio/<token>.mp3` layout used for summaries, so a topic named like a
    /// category (`"business"`) can never overwrite that category's audio.
    /// Clients only ever see the returned URL, never the raw key. The layout
    /// decision is recorded under "Exploration audio" in DESIGN.md.
    pub fn exploration(topic: &str) -> Option<Self> {
        let token = sanitize(topic);
        if token.is_empty() {
            return None;
        }

        Some(Self {
            text: format!("explorations/{token}.json"),
            audio: format!("audio/explorations/{token}.mp3"),
        })
    }
}

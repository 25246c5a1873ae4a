use super::ScriptStyle;
use crate::domain::news::Article;
use html2text::from_read;
use regex::Regex;
use std::sync::LazyLock;

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s]+").expect("valid url regex"));
static TRUNCATION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\+\d+ chars\]").expect("valid truncation regex"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

const SCRIPT_WRITER_SYSTEM: &str =
    "You are a professional podcast script writer who creates engaging, conversational content.";
const RESEARCH_SYSTEM: &str = "You are a research assistant that provides concise summaries of academic topics. \
     Focus on recent developments, key findings, and implications.";

/// Shape of the script requested from the language model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    Normal,
    Funny,
    Exploration,
}

impl PromptMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptMode::Normal => "normal",
            PromptMode::Funny => "funny",
            PromptMode::Exploration => "exploration",
        }
    }
}

impl From<ScriptStyle> for PromptMode {
    fn from(style: ScriptStyle) -> Self {
        match style {
            ScriptStyle::Normal => PromptMode::Normal,
            ScriptStyle::Funny => PromptMode::Funny,
        }
    }
}

/// A system + user message pair for a chat completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Strip HTML, URLs and NewsAPI's "[+123 chars]" suffix, collapse whitespace
pub fn clean_text(text: &str) -> String {
    let plain_text = from_read(text.as_bytes(), usize::MAX);
    let without_urls = URL_PATTERN.replace_all(&plain_text, "");
    let without_marker = TRUNCATION_MARKER.replace_all(&without_urls, "");
    WHITESPACE
        .replace_all(&without_marker, " ")
        .trim()
        .to_string()
}

fn article_block(articles: &[Article]) -> String {
    articles
        .iter()
        .map(|article| {
            format!(
                "Title: {}\nDescription: {}\nContent: {}",
                clean_text(article.title.as_deref().unwrap_or_default()),
                clean_text(article.description.as_deref().unwrap_or_default()),
                clean_text(article.content.as_deref().unwrap_or_default()),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

const FORMAT_RULES: &str = "The script should be in a conversational format between two hosts, Host A and Host B.
Format the output as a script with clear speaker labels, one turn per line starting with \"Host A:\" or \"Host B:\". Format the script with no markdown.
Have the first line be \"Host A\" describing the title and what is happening. When a host speaks
about the other host, use \"Edward\" for Host A and \"Mark\" for Host B.";

/// Builds the script-writer prompt; `mode` picks length, brief and tone
pub fn script_prompt(mode: PromptMode, subject: &str, material: &str) -> Prompt {
    let (brief, tone, closing) = match mode {
        PromptMode::Normal => (
            summary_brief(subject),
            "Make it engaging and include 1-2 sentences of analysis or implications for each major point.",
            SUMMARY_CLOSING,
        ),
        PromptMode::Funny => (
            summary_brief(subject),
            "Keep the facts accurate but make it funny: playful banter, light jokes and witty reactions between the hosts.",
            SUMMARY_CLOSING,
        ),
        PromptMode::Exploration => (
            format!(
                "Create a 1-2 minute podcast script (150-250 words) exploring the topic: {subject}.
Explain what it is, why it matters right now, and one surprising angle listeners may not know."
            ),
            "",
            "Please provide a natural, curious conversation that stays accessible to a general audience.",
        ),
    };

    tracing::debug!(mode = mode.as_str(), material_length = material.len(), "Built script prompt");

    Prompt {
        system: SCRIPT_WRITER_SYSTEM.to_string(),
        user: format!("{brief}\n{FORMAT_RULES}\n{tone}\n{material}\n\n{closing}"),
    }
}

const SUMMARY_CLOSING: &str =
    "Please provide a natural, engaging conversation that flows well and maintains listener interest.";

fn summary_brief(category: &str) -> String {
    format!(
        "Create a 30 seconds - 1 minute podcast script (50-100 words), not including the title and description and host names. \
The word count is based on what the hosts say.
Summarize the following news articles about {category}."
    )
}

/// Prompt for a news round-up script about `category`
pub fn summary_prompt(articles: &[Article], category: &str, style: ScriptStyle) -> Prompt {
    let material = format!("Articles to summarize:\n{}", article_block(articles));
    script_prompt(PromptMode::from(style), category, &material)
}

/// Prompt for a deep-dive script about a free-form topic
pub fn exploration_prompt(topic: &str, research: Option<&str>) -> Prompt {
    let background = match research {
        Some(notes) => format!("Use these research notes as background:\n{}", clean_text(notes)),
        None => String::new(),
    };
    script_prompt(PromptMode::Exploration, topic, &background)
}

/// Prompt for the research assistant used to ground explorations
pub fn research_prompt(topic: &str) -> Prompt {
    Prompt {
        system: RESEARCH_SYSTEM.to_string(),
        user: format!("Provide a brief summary of recent research and developments about {topic}."),
    }
}

/// Background used when the research assistant is unavailable
pub fn research_fallback(topic: &str) -> String {
    format!(
        "While we couldn't fetch recent research, here's what we know about {topic}: \
It's a topic of ongoing study with various implications across different fields."
    )
}

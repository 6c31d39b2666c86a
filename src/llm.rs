//! Matchup blurb generation via the OpenAI chat completions API.
//!
//! Blurb failures never fail a build: with no API key, or on any API error,
//! the deterministic fallback blurb is used instead.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cli::types::{BlurbStyle, Week};
use crate::espn::compute::Matchup;
use crate::{OPENAI_API_KEY_ENV_VAR, OPENAI_MODEL_ENV_VAR};

#[cfg(test)]
mod tests;

pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const SABRE_SIGNATURE: &str = "\u{2014} Sabre, Gridiron Gazette";

/// Generation parameters carried from the CLI.
#[derive(Debug, Clone)]
pub struct BlurbParams {
    pub style: BlurbStyle,
    pub model: Option<String>,
    pub temperature: f64,
    pub words: u32,
}

impl BlurbParams {
    /// Model precedence: CLI flag, then `OPENAI_MODEL`, then the default.
    pub fn model_name(&self) -> String {
        self.model
            .clone()
            .or_else(|| std::env::var(OPENAI_MODEL_ENV_VAR).ok())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Blurb writer bound to one API endpoint; the URL is swappable for tests.
pub struct BlurbWriter {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl BlurbWriter {
    pub fn new() -> Self {
        Self::with_api_url(OPENAI_CHAT_URL)
    }

    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        // Smart quotes sneak in when keys are pasted from chat apps
        let api_key = std::env::var(OPENAI_API_KEY_ENV_VAR)
            .ok()
            .map(|k| k.replace(['"', '\u{201c}', '\u{201d}', '\u{2018}', '\u{2019}'], ""))
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            api_key,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Write a blurb for one matchup. Falls back to the deterministic blurb
    /// when no key is configured or the API call fails.
    pub async fn blurb(&self, matchup: &Matchup, week: Week, params: &BlurbParams) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return fallback_blurb(matchup, week, params.style);
        };

        match self.request_blurb(api_key, matchup, week, params).await {
            Ok(text) => {
                let cleaned = clean_markdown(&text);
                finish_blurb(cleaned, params.style)
            }
            Err(e) => {
                warn!(
                    "blurb generation failed for {} vs {}: {}",
                    matchup.home.name, matchup.away.name, e
                );
                fallback_blurb(matchup, week, params.style)
            }
        }
    }

    async fn request_blurb(
        &self,
        api_key: &str,
        matchup: &Matchup,
        week: Week,
        params: &BlurbParams,
    ) -> crate::Result<String> {
        let request = ChatRequest {
            model: params.model_name(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt(params.style).to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: matchup_prompt(matchup, week, params.words),
                },
            ],
            temperature: params.temperature,
            // Rough budget: tokens run ~1.5x words
            max_tokens: (params.words * 3 / 2).max(64),
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<ChatResponse>()
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(crate::GazetteError::Llm {
                message: "empty completion".to_string(),
            })
    }
}

impl Default for BlurbWriter {
    fn default() -> Self {
        Self::new()
    }
}

pub fn system_prompt(style: BlurbStyle) -> &'static str {
    match style {
        BlurbStyle::Default => {
            "You are the recap writer for a weekly fantasy football gazette. \
             Write punchy, neutral-tone matchup recaps. Use only the data \
             provided, never invent stats. No profanity."
        }
        BlurbStyle::Mascot => {
            "You are Sabre, the witty Doberman mascot and beat reporter for \
             the Gridiron Gazette. Sharp-tongued but fair, clever wordplay, \
             never mean-spirited. First-person as Sabre, dog puns sparingly. \
             Use only the data provided, never invent stats. No profanity. \
             End with your signature: \u{2014} Sabre, Gridiron Gazette"
        }
        BlurbStyle::Rtg => {
            "You write the \"Rate the Game\" column of a fantasy football \
             gazette: terse, by-the-numbers analysis. Lead with a 1-10 game \
             rating, justify it from the scores and performances provided, \
             never invent stats. No profanity."
        }
    }
}

pub fn matchup_prompt(matchup: &Matchup, week: Week, words: u32) -> String {
    let mut prompt = format!(
        "Write a recap of at most {} words for this Week {} fantasy matchup:\n\n\
         FINAL SCORE: {} {:.1} - {} {:.1}\n",
        words,
        week.as_u16(),
        matchup.home.name,
        matchup.home.score,
        matchup.away.name,
        matchup.away.score
    );
    if let Some(top) = &matchup.home.top_scorer {
        prompt.push_str(&format!("\n{} best: {}", matchup.home.name, top));
    }
    if let Some(top) = &matchup.away.top_scorer {
        prompt.push_str(&format!("\n{} best: {}", matchup.away.name, top));
    }
    if let Some(bust) = &matchup.biggest_bust {
        prompt.push_str(&format!("\nBiggest disappointment: {}", bust));
    }
    prompt
}

/// Strip markdown that would end up verbatim in the docx.
pub fn clean_markdown(text: &str) -> String {
    static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
    static BOLD_U: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"__(.*?)__").unwrap());
    static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
    static CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());
    static HEADER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#{1,6}\s*").unwrap());
    static STRIKE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"~~(.*?)~~").unwrap());
    static QUOTE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^>\s*").unwrap());

    let text = BOLD.replace_all(text, "$1");
    let text = BOLD_U.replace_all(&text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    let text = CODE.replace_all(&text, "$1");
    let text = HEADER.replace_all(&text, "");
    let text = STRIKE.replace_all(&text, "$1");
    let text = QUOTE.replace_all(&text, "");
    text.trim().to_string()
}

fn finish_blurb(text: String, style: BlurbStyle) -> String {
    if style == BlurbStyle::Mascot && !text.contains(SABRE_SIGNATURE) {
        format!("{}\n{}", text, SABRE_SIGNATURE)
    } else {
        text
    }
}

/// Margin-bucketed narrative when the LLM is unavailable.
pub fn fallback_blurb(matchup: &Matchup, week: Week, style: BlurbStyle) -> String {
    let winner = matchup.winner();
    let loser = matchup.loser();
    let margin = matchup.margin();

    let (outcome, narrative) = if margin < 3.0 {
        ("squeaked by", "a nail-biter that came down to the wire")
    } else if margin < 10.0 {
        ("edged out", "a competitive matchup")
    } else if margin < 20.0 {
        ("defeated", "a solid victory")
    } else if margin < 40.0 {
        ("dominated", "an impressive performance")
    } else {
        ("absolutely demolished", "a complete blowout")
    };

    let mut lines = vec![format!(
        "Week {}: {} {} {} {:.1}-{:.1} in {}.",
        week.as_u16(),
        winner.name,
        outcome,
        loser.name,
        winner.score,
        loser.score,
        narrative
    )];
    if let Some(top) = &matchup.home.top_scorer {
        lines.push(format!("{} led {}.", top, matchup.home.name));
    }
    if let Some(top) = &matchup.away.top_scorer {
        lines.push(format!("{} paced {}.", top, matchup.away.name));
    }
    if let Some(bust) = &matchup.biggest_bust {
        lines.push(format!("Biggest letdown: {}.", bust));
    }
    lines.push(format!(
        "The {:.1}-point margin tells the story.",
        margin
    ));
    if style == BlurbStyle::Mascot {
        lines.push(format!(
            "This dog's nose knows {} had it all along.",
            winner.name
        ));
        lines.push(SABRE_SIGNATURE.to_string());
    }

    lines.join("\n")
}

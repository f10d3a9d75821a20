//! Optional AI-generated change summaries for PR bodies

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODEL: &str = "gpt-4o-mini";

// Diffs beyond this are replaced by the commit list to stay inside the
// model context window
const MAX_DIFF_CHARS: usize = 9000;

const SYSTEM_PROMPT: &str = "You are a developer summarizing your own changes \
for a pull request description. Write a short markdown summary of what changed \
and why, in at most three bullet points. Do not mention individual file names \
unless they are essential.";

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// OpenAI-backed summarizer. Built only when `OPENAI_API_KEY` is set.
pub struct Summarizer {
    api_key: String,
    client: reqwest::blocking::Client,
}

impl Summarizer {
    /// Build a summarizer from `OPENAI_API_KEY`, or `None` when the key is
    /// not configured
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            return None;
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .ok()?;
        Some(Self { api_key, client })
    }

    /// Summarize a change from its diff, falling back to the commit list
    /// when the diff is empty or too large. Returns an empty string when
    /// there is nothing to summarize.
    ///
    /// # Errors
    /// Fails on HTTP errors or an unparseable response
    pub fn summarize(&self, diff: &str, commits: &[String]) -> Result<String> {
        let content = if !diff.is_empty() && diff.chars().count() <= MAX_DIFF_CHARS {
            format!("Summarize this diff:\n\n{diff}")
        } else if !commits.is_empty() {
            format!("Summarize these commit messages:\n\n{}", commits.join("\n"))
        } else {
            return Ok(String::new());
        };

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": MODEL,
                "messages": [
                    {"role": "system", "content": SYSTEM_PROMPT},
                    {"role": "user", "content": content},
                ],
            }))
            .send()
            .context("OpenAI request failed")?;

        let status = response.status();
        let body = response.text().context("Failed to read OpenAI response")?;
        if !status.is_success() {
            anyhow::bail!("OpenAI returned {status}: {body}");
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).context("Failed to parse OpenAI response")?;
        let summary = parsed
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .unwrap_or_default();
        Ok(summary)
    }
}

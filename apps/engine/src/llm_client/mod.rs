/// LLM Client: the single point of entry for every generative-model call in the engine.
///
/// ARCHITECTURAL RULE: scoring and suggestion code never talks HTTP directly.
/// They depend on the `GenerativeModel` trait; `GeminiClient` is the production
/// implementation, tests substitute a scripted fake.
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::AiConfig;

pub mod extract;
pub mod prompts;

/// Hard budget for one outbound call, connect through body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM response missing content")]
    EmptyContent,
}

/// Why an AI-backed operation produced nothing.
#[derive(Debug, Error)]
pub enum UnavailableReason {
    #[error("AI disabled by configuration")]
    Disabled,

    #[error("upstream call failed: {0}")]
    Upstream(#[from] LlmError),

    #[error("reply was not a structured object: {0}")]
    Malformed(String),
}

/// Result of a fallible call to the external model.
///
/// Callers must handle both branches; nothing here is ever thrown.
#[derive(Debug)]
pub enum AiOutcome<T> {
    Available(T),
    Unavailable(UnavailableReason),
}

impl<T> AiOutcome<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, AiOutcome::Available(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            AiOutcome::Available(value) => Some(value),
            AiOutcome::Unavailable(_) => None,
        }
    }
}

/// A text-in, text-out generative model.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Sends `prompt` once and returns the model's free-text reply.
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

/// Client for the `generateContent` endpoint of a Gemini-compatible service.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(config: &AiConfig) -> Result<Self> {
        Self::with_timeout(config, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(config: &AiConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: generate_content_url(&config.base_url, &config.model),
            api_key: config.api_key.clone(),
            timeout,
        })
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String, LlmError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig { temperature },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.timeout)
                } else {
                    LlmError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw = response.text().await?;
        let root: Value = serde_json::from_str(&raw)?;
        let text = reply_text(&root).ok_or(LlmError::EmptyContent)?;

        debug!("LLM call succeeded: {} chars of reply", text.len());
        Ok(text)
    }
}

/// `{base}/v1beta/models/{model}:generateContent`, tolerating a trailing slash on `base`.
pub fn generate_content_url(base_url: &str, model: &str) -> String {
    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    format!("{base}/v1beta/models/{model}:generateContent")
}

/// Navigates `candidates[0].content.parts[0].text`.
pub fn reply_text(root: &Value) -> Option<String> {
    root.pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::to_owned)
}

/// Joins the system line and the task prompt the way the upstream expects them.
pub fn compose_prompt(system: &str, user: &str) -> String {
    format!("{system}\n\n{user}")
}

/// Truncates to at most `max` characters without splitting a code point.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

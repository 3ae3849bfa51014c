use std::str::FromStr;

use anyhow::{Context, Result};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";

/// What the orchestrator does when AI scoring is unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackMode {
    /// Score with the deterministic heuristic scorer.
    #[default]
    Heuristic,
    /// Return an all-zero score annotated "AI unavailable".
    ZeroScore,
}

impl FromStr for FallbackMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heuristic" | "" => Ok(FallbackMode::Heuristic),
            "zero" | "zero_score" | "zero-score" => Ok(FallbackMode::ZeroScore),
            other => anyhow::bail!("Unknown fallback mode '{other}' (expected 'heuristic' or 'zero')"),
        }
    }
}

/// Settings for the external generative-text service.
/// Shared by the scoring and suggestion clients.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub enabled: bool,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl AiConfig {
    /// AI is only used when switched on AND a non-blank credential is present.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.api_key.trim().is_empty()
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

/// Engine configuration loaded from environment variables.
/// Read once at startup and cloned into the components.
#[derive(Debug, Clone)]
pub struct Config {
    pub ai: AiConfig,
    pub fallback_mode: FallbackMode,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let enabled = match std::env::var("AI_SCORING_ENABLED") {
            Ok(raw) => parse_bool(&raw)
                .with_context(|| format!("AI_SCORING_ENABLED must be a boolean, got '{raw}'"))?,
            Err(_) => false,
        };

        let fallback_mode = std::env::var("SCORING_FALLBACK_MODE")
            .unwrap_or_default()
            .parse::<FallbackMode>()
            .context("SCORING_FALLBACK_MODE is invalid")?;

        Ok(Config {
            ai: AiConfig {
                enabled,
                api_key: std::env::var("AI_SCORING_API_KEY").unwrap_or_default(),
                base_url: std::env::var("AI_SCORING_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
                model: std::env::var("AI_SCORING_MODEL")
                    .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            },
            fallback_mode,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("not a boolean: {other}"),
    }
}

//! AI scoring: delegates judgment to the generative model and fails soft.

use std::sync::Arc;

use anyhow::Result;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::config::AiConfig;
use crate::llm_client::extract::parse_json_object;
use crate::llm_client::{
    compose_prompt, AiOutcome, GeminiClient, GenerativeModel, UnavailableReason,
};
use crate::scoring::models::{EngineLabel, ScoreResult};
use crate::scoring::prompts::{build_scoring_prompt, SCORING_SYSTEM};
use crate::scoring::weights::{bound_score, compute_overall};

/// Scoring must be reproducible: no sampling.
pub const SCORING_TEMPERATURE: f32 = 0.0;

const SCORE_KEYS: [&str; 5] = ["overall", "skills", "experience", "keywords", "formatting"];

#[derive(Clone)]
pub struct AiScoringClient {
    config: AiConfig,
    model: Arc<dyn GenerativeModel>,
}

impl AiScoringClient {
    pub fn new(config: AiConfig) -> Result<Self> {
        let model = GeminiClient::new(&config)?;
        Ok(Self::with_model(config, Arc::new(model)))
    }

    pub fn with_model(config: AiConfig, model: Arc<dyn GenerativeModel>) -> Self {
        Self { config, model }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.is_active()
    }

    /// Scores the resume against the job text. Never errors: every failure
    /// becomes `AiOutcome::Unavailable`.
    pub async fn score(&self, resume_text: &str, job_info: Option<&str>) -> AiOutcome<ScoreResult> {
        if !self.is_enabled() {
            debug!("AI scoring disabled; skipping upstream call");
            return AiOutcome::Unavailable(UnavailableReason::Disabled);
        }

        let prompt = compose_prompt(SCORING_SYSTEM, &build_scoring_prompt(resume_text, job_info));

        let reply = match self.model.generate(&prompt, SCORING_TEMPERATURE).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("AI scoring failed: {e}");
                return AiOutcome::Unavailable(e.into());
            }
        };

        match parse_score_reply(&reply) {
            Ok(result) => {
                debug!("AI scoring succeeded: overall={:.1}", result.overall);
                AiOutcome::Available(result)
            }
            Err(reason) => {
                warn!("AI scoring reply unusable: {reason}");
                AiOutcome::Unavailable(reason)
            }
        }
    }
}

/// Locates the score object in a free-text reply.
///
/// A reply with no brace pair yields an all-zero object that keeps the text
/// under `raw`, so the caller always gets a map or a parse error.
pub fn score_payload(content: &str) -> Result<Map<String, Value>, serde_json::Error> {
    match parse_json_object(content) {
        Some(parsed) => parsed,
        None => {
            let mut fallback = Map::new();
            for key in SCORE_KEYS {
                fallback.insert(key.to_string(), json!(0));
            }
            fallback.insert("raw".to_string(), Value::String(content.to_string()));
            Ok(fallback)
        }
    }
}

/// Turns a raw model reply into a bounded `ScoreResult`.
pub fn parse_score_reply(content: &str) -> Result<ScoreResult, UnavailableReason> {
    let map = score_payload(content).map_err(|e| UnavailableReason::Malformed(e.to_string()))?;

    let skills = coerce_score(map.get("skills"));
    let experience = coerce_score(map.get("experience"));
    let keywords = coerce_score(map.get("keywords"));
    let formatting = coerce_score(map.get("formatting"));

    let supplied_overall = coerce_score(map.get("overall"));
    let overall = if supplied_overall > 0.0 {
        supplied_overall
    } else {
        compute_overall(skills, experience, keywords, formatting)
    };

    let nested = match map.get("details") {
        Some(Value::Object(details)) => Some(Value::Object(details.clone())),
        _ => None,
    };
    let details = nested.unwrap_or_else(|| json!({ "raw": Value::Object(map) }));

    Ok(ScoreResult {
        overall,
        skills,
        experience,
        keywords,
        formatting,
        engine: EngineLabel::Ai,
        details,
    })
}

/// Numbers and numeric strings are read; anything else is 0. Always bounded.
fn coerce_score(value: Option<&Value>) -> f64 {
    let raw = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    bound_score(raw)
}

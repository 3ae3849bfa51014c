//! AI suggestion generation with on-receipt shape enforcement.

use std::sync::Arc;

use anyhow::Result;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::AiConfig;
use crate::llm_client::extract::parse_json_object;
use crate::llm_client::{compose_prompt, GeminiClient, GenerativeModel, UnavailableReason};
use crate::suggestions::models::{Priority, ScoreContext, SuggestionCategory, SuggestionItem};
use crate::suggestions::prompts::{build_suggestion_prompt, SUGGESTION_SYSTEM};

pub const SUGGESTION_TEMPERATURE: f32 = 0.3;

#[derive(Clone)]
pub struct AiSuggestionClient {
    config: AiConfig,
    model: Arc<dyn GenerativeModel>,
}

impl AiSuggestionClient {
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

    /// Best-effort suggestions. Empty on disablement or any upstream/shape failure.
    pub async fn generate_suggestions(
        &self,
        resume_text: &str,
        job_info: Option<&str>,
        context: &ScoreContext,
    ) -> Vec<SuggestionItem> {
        if !self.is_enabled() {
            debug!("AI suggestions disabled; returning none");
            return Vec::new();
        }

        let context_json = match serde_json::to_string(context) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize score context: {e}");
                "{}".to_string()
            }
        };
        let prompt = compose_prompt(
            SUGGESTION_SYSTEM,
            &build_suggestion_prompt(resume_text, job_info, &context_json),
        );

        let reply = match self.model.generate(&prompt, SUGGESTION_TEMPERATURE).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("AI suggestion generation failed: {e}");
                return Vec::new();
            }
        };

        match parse_suggestion_reply(&reply) {
            Ok(items) => {
                debug!("AI returned {} suggestions", items.len());
                items
            }
            Err(reason) => {
                warn!("AI suggestion reply unusable: {reason}");
                Vec::new()
            }
        }
    }
}

/// Parses `{"suggestions": [...]}` out of a free-text reply.
///
/// No brace pair means no suggestions. A missing or non-array `suggestions`
/// key, or any non-object element, is a malformed reply.
pub fn parse_suggestion_reply(content: &str) -> Result<Vec<SuggestionItem>, UnavailableReason> {
    let map = match parse_json_object(content) {
        None => return Ok(Vec::new()),
        Some(parsed) => parsed.map_err(|e| UnavailableReason::Malformed(e.to_string()))?,
    };

    let raw_items = map
        .get("suggestions")
        .and_then(Value::as_array)
        .ok_or_else(|| UnavailableReason::Malformed("missing suggestions array".to_string()))?;

    raw_items
        .iter()
        .map(|raw| {
            raw.as_object()
                .map(map_suggestion)
                .ok_or_else(|| UnavailableReason::Malformed("non-object suggestion".to_string()))
        })
        .collect()
}

fn map_suggestion(raw: &Map<String, Value>) -> SuggestionItem {
    let mut item = SuggestionItem {
        category: text_field(raw, "category")
            .map(|c| SuggestionCategory::parse(&c))
            .unwrap_or_default(),
        message: text_field(raw, "message").unwrap_or_default(),
        priority: text_field(raw, "priority")
            .map(|p| Priority::parse(&p))
            .unwrap_or_default(),
        remediation_steps: text_field(raw, "remediationSteps").unwrap_or_default(),
        recommendation_type: text_field(raw, "recommendationType"),
        program_name: text_field(raw, "programName"),
        program_url: text_field(raw, "programUrl"),
        duration: text_field(raw, "duration"),
        cost_range: text_field(raw, "costRange"),
    };
    enforce_career_growth_contract(&mut item);
    item
}

/// Career-growth items are kept with whatever program fields they carry;
/// nothing is invented. Other categories have stray program fields cleared.
fn enforce_career_growth_contract(item: &mut SuggestionItem) {
    if item.is_career_growth() {
        let missing = item.missing_career_fields();
        if !missing.is_empty() {
            warn!(
                "career_growth suggestion missing required fields {:?}: {:?}",
                missing,
                item.message.chars().take(60).collect::<String>()
            );
        }
        if !item.has_known_recommendation_type() {
            warn!(
                "career_growth suggestion has unknown recommendationType {:?}",
                item.recommendation_type
            );
        }
    } else if item.has_any_career_field() {
        debug!(
            "Clearing program fields from non-career suggestion ({})",
            item.category.as_str()
        );
        item.clear_career_fields();
    }
}

/// Absent or null → `None`. Arrays become newline-joined text; other scalars are stringified.
fn text_field(raw: &Map<String, Value>, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        other => Some(other.to_string()),
    }
}

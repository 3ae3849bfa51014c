use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scoring::models::{EngineLabel, ScoreResult};
use crate::suggestions::models::SuggestionItem;

/// A score ready to be persisted; the store assigns identity.
#[derive(Debug, Clone, Serialize)]
pub struct NewScore {
    pub resume_id: Uuid,
    pub overall_score: f64,
    pub skills_score: f64,
    pub experience_score: f64,
    pub keywords_score: f64,
    pub formatting_score: f64,
    pub engine_label: EngineLabel,
    pub engine_version: String,
    /// Serialized JSON details.
    pub details: String,
}

impl NewScore {
    pub fn from_result(resume_id: Uuid, result: &ScoreResult) -> Self {
        Self {
            resume_id,
            overall_score: result.overall,
            skills_score: result.skills,
            experience_score: result.experience,
            keywords_score: result.keywords,
            formatting_score: result.formatting,
            engine_label: result.engine,
            engine_version: result.engine.engine_version().to_string(),
            details: result.details_json(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub overall_score: f64,
    pub skills_score: f64,
    pub experience_score: f64,
    pub keywords_score: f64,
    pub formatting_score: f64,
    pub engine_label: EngineLabel,
    pub engine_version: String,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

/// A suggestion linked to its score. `position` is the caller-assigned order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionRecord {
    pub id: Uuid,
    pub score_id: Uuid,
    pub position: u32,
    #[serde(flatten)]
    pub item: SuggestionItem,
    pub created_at: DateTime<Utc>,
}

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::scoring::weights::compute_overall;

/// Which strategy produced a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineLabel {
    Ai,
    Heuristic,
    /// Only produced by `FallbackMode::ZeroScore`.
    Unavailable,
}

impl EngineLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineLabel::Ai => "ai",
            EngineLabel::Heuristic => "heuristic",
            EngineLabel::Unavailable => "unavailable",
        }
    }

    /// Version string stored alongside persisted scores.
    pub fn engine_version(&self) -> &'static str {
        match self {
            EngineLabel::Ai => "v2.0-ai",
            EngineLabel::Heuristic => "v1.0-basic",
            EngineLabel::Unavailable => "v2.0-ai-unavailable",
        }
    }
}

/// One scoring pass over a resume. Every score lies in [0, 100].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResult {
    pub overall: f64,
    pub skills: f64,
    pub experience: f64,
    pub keywords: f64,
    pub formatting: f64,
    pub engine: EngineLabel,
    /// Opaque facts about the pass (matched skills, word count, notes...).
    pub details: Value,
}

impl ScoreResult {
    /// All-zero result used when AI is unavailable and heuristics are switched off.
    pub fn unavailable() -> Self {
        Self {
            overall: 0.0,
            skills: 0.0,
            experience: 0.0,
            keywords: 0.0,
            formatting: 0.0,
            engine: EngineLabel::Unavailable,
            details: json!({ "notes": "AI unavailable" }),
        }
    }

    /// Serialized `details`, as persisted.
    pub fn details_json(&self) -> String {
        self.details.to_string()
    }

    /// Overall recomputed from the sub-scores with the fixed weights.
    pub fn weighted_overall(&self) -> f64 {
        compute_overall(self.skills, self.experience, self.keywords, self.formatting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_label_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&EngineLabel::Ai).unwrap(), "\"ai\"");
        assert_eq!(
            serde_json::to_string(&EngineLabel::Heuristic).unwrap(),
            "\"heuristic\""
        );
        assert_eq!(EngineLabel::Heuristic.as_str(), "heuristic");
    }

    #[test]
    fn test_engine_versions() {
        assert_eq!(EngineLabel::Ai.engine_version(), "v2.0-ai");
        assert_eq!(EngineLabel::Heuristic.engine_version(), "v1.0-basic");
    }

    #[test]
    fn test_unavailable_is_all_zero_and_annotated() {
        let result = ScoreResult::unavailable();
        assert_eq!(result.overall, 0.0);
        assert_eq!(result.weighted_overall(), 0.0);
        assert_eq!(result.engine, EngineLabel::Unavailable);
        assert_eq!(result.details["notes"], "AI unavailable");
    }

    #[test]
    fn test_details_json_roundtrips_as_text() {
        let result = ScoreResult::unavailable();
        let parsed: Value = serde_json::from_str(&result.details_json()).unwrap();
        assert_eq!(parsed, result.details);
    }
}

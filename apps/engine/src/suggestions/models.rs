use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::scoring::models::{EngineLabel, ScoreResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionCategory {
    Skills,
    Experience,
    Format,
    Keywords,
    CareerGrowth,
    #[default]
    Other,
}

impl SuggestionCategory {
    /// Lenient parse of the model's label; anything unrecognised is `Other`.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_ascii_lowercase().replace(&['-', ' '][..], "_");
        match normalized.as_str() {
            "skills" | "skill" => SuggestionCategory::Skills,
            "experience" => SuggestionCategory::Experience,
            "format" | "formatting" => SuggestionCategory::Format,
            "keywords" | "keyword" => SuggestionCategory::Keywords,
            "career_growth" | "careergrowth" => SuggestionCategory::CareerGrowth,
            _ => SuggestionCategory::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionCategory::Skills => "skills",
            SuggestionCategory::Experience => "experience",
            SuggestionCategory::Format => "format",
            SuggestionCategory::Keywords => "keywords",
            SuggestionCategory::CareerGrowth => "career_growth",
            SuggestionCategory::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Priority::High,
            "low" => Priority::Low,
            _ => Priority::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// Kinds of upskilling program a career-growth suggestion may recommend.
pub const RECOMMENDATION_TYPES: &[&str] = &["internship", "bootcamp", "certificate", "project"];

/// Names of the fields every career-growth suggestion must carry.
pub const CAREER_GROWTH_FIELDS: [&str; 5] = [
    "recommendationType",
    "programName",
    "programUrl",
    "duration",
    "costRange",
];

/// One actionable improvement suggestion.
///
/// The five program fields keep `None` ("not provided") distinct from
/// `Some("")` ("explicitly empty").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionItem {
    pub category: SuggestionCategory,
    pub message: String,
    pub priority: Priority,
    pub remediation_steps: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_range: Option<String>,
}

impl SuggestionItem {
    pub fn is_career_growth(&self) -> bool {
        self.category == SuggestionCategory::CareerGrowth
    }

    fn career_fields(&self) -> [&Option<String>; 5] {
        [
            &self.recommendation_type,
            &self.program_name,
            &self.program_url,
            &self.duration,
            &self.cost_range,
        ]
    }

    /// Career-growth fields that are absent or blank.
    pub fn missing_career_fields(&self) -> Vec<&'static str> {
        CAREER_GROWTH_FIELDS
            .iter()
            .zip(self.career_fields())
            .filter(|(_, value)| value.as_deref().map_or(true, |v| v.trim().is_empty()))
            .map(|(name, _)| *name)
            .collect()
    }

    pub fn has_any_career_field(&self) -> bool {
        self.career_fields().iter().any(|v| v.is_some())
    }

    pub fn clear_career_fields(&mut self) {
        self.recommendation_type = None;
        self.program_name = None;
        self.program_url = None;
        self.duration = None;
        self.cost_range = None;
    }

    /// `true` when the recommendation type is absent or one of `RECOMMENDATION_TYPES`.
    pub fn has_known_recommendation_type(&self) -> bool {
        match self.recommendation_type.as_deref() {
            None => true,
            Some(t) => RECOMMENDATION_TYPES.contains(&t.trim().to_ascii_lowercase().as_str()),
        }
    }
}

/// Scores handed to the suggestion prompt as context.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreContext {
    pub overall_score: f64,
    pub skills_score: f64,
    pub experience_score: f64,
    pub keywords_score: f64,
    pub formatting_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_details: Option<Value>,
}

impl ScoreContext {
    /// AI details travel along only when the AI produced the score.
    pub fn from_result(result: &ScoreResult) -> Self {
        Self {
            overall_score: result.overall,
            skills_score: result.skills,
            experience_score: result.experience,
            keywords_score: result.keywords,
            formatting_score: result.formatting,
            ai_details: (result.engine == EngineLabel::Ai).then(|| result.details.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn career_item() -> SuggestionItem {
        SuggestionItem {
            category: SuggestionCategory::CareerGrowth,
            message: "Gain hands-on cloud experience".to_string(),
            priority: Priority::High,
            remediation_steps: "Enroll and ship a capstone".to_string(),
            recommendation_type: Some("bootcamp".to_string()),
            program_name: Some("Cloud Engineering Bootcamp".to_string()),
            program_url: Some("https://example.org/cloud".to_string()),
            duration: Some("12 weeks".to_string()),
            cost_range: Some("$2,000-$4,000".to_string()),
        }
    }

    #[test]
    fn test_category_parse_is_lenient() {
        assert_eq!(SuggestionCategory::parse("Career-Growth"), SuggestionCategory::CareerGrowth);
        assert_eq!(SuggestionCategory::parse(" formatting "), SuggestionCategory::Format);
        assert_eq!(SuggestionCategory::parse("SKILLS"), SuggestionCategory::Skills);
        assert_eq!(SuggestionCategory::parse("networking"), SuggestionCategory::Other);
    }

    #[test]
    fn test_priority_parse_defaults_to_medium() {
        assert_eq!(Priority::parse("HIGH"), Priority::High);
        assert_eq!(Priority::parse("low"), Priority::Low);
        assert_eq!(Priority::parse("urgent"), Priority::Medium);
        assert!(Priority::High < Priority::Medium && Priority::Medium < Priority::Low);
    }

    #[test]
    fn test_complete_career_item_has_no_missing_fields() {
        let item = career_item();
        assert!(item.missing_career_fields().is_empty());
        assert!(item.has_known_recommendation_type());
    }

    #[test]
    fn test_missing_and_blank_fields_reported() {
        let mut item = career_item();
        item.program_url = None;
        item.duration = Some("  ".to_string());
        assert_eq!(item.missing_career_fields(), vec!["programUrl", "duration"]);
    }

    #[test]
    fn test_unknown_recommendation_type() {
        let mut item = career_item();
        item.recommendation_type = Some("mentorship".to_string());
        assert!(!item.has_known_recommendation_type());
    }

    #[test]
    fn test_serialization_omits_absent_program_fields() {
        let item = SuggestionItem {
            category: SuggestionCategory::Keywords,
            message: "Add Kubernetes".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["category"], "keywords");
        assert_eq!(value["priority"], "medium");
        assert!(value.get("programUrl").is_none());
        assert!(value.get("remediationSteps").is_some());
    }

    #[test]
    fn test_context_includes_ai_details_only_for_ai() {
        let mut result = ScoreResult {
            overall: 70.0,
            skills: 80.0,
            experience: 60.0,
            keywords: 55.0,
            formatting: 76.0,
            engine: EngineLabel::Ai,
            details: json!({"inferredRole": "Data Engineer"}),
        };
        let ctx = ScoreContext::from_result(&result);
        assert_eq!(ctx.ai_details, Some(json!({"inferredRole": "Data Engineer"})));

        result.engine = EngineLabel::Heuristic;
        let ctx = ScoreContext::from_result(&result);
        assert!(ctx.ai_details.is_none());
        let value = serde_json::to_value(&ctx).unwrap();
        assert_eq!(value["skillsScore"], 80.0);
        assert!(value.get("aiDetails").is_none());
    }
}

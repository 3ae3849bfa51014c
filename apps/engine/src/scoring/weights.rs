use serde::{Deserialize, Serialize};

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

/// Fixed weights of the overall score. Both engines and the AI prompt use them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skills: f64,
    pub experience: f64,
    pub keywords: f64,
    pub formatting: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 0.35,
            experience: 0.30,
            keywords: 0.20,
            formatting: 0.15,
        }
    }
}

/// Bounds a score into [0, 100]. NaN and infinities collapse to 0.
pub fn bound_score(value: f64) -> f64 {
    if !value.is_finite() {
        return SCORE_MIN;
    }
    value.clamp(SCORE_MIN, SCORE_MAX)
}

/// Weighted overall: 0.35*skills + 0.30*experience + 0.20*keywords + 0.15*formatting, bounded.
pub fn compute_overall(skills: f64, experience: f64, keywords: f64, formatting: f64) -> f64 {
    let w = ScoringWeights::default();
    bound_score(
        w.skills * skills
            + w.experience * experience
            + w.keywords * keywords
            + w.formatting * formatting,
    )
}

//! Heuristic scorer: pure string analysis over the resume and job text.
//!
//! No network, no randomness, no failure mode. This is the guaranteed fallback
//! whenever AI scoring is disabled or unavailable.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;

use crate::scoring::models::{EngineLabel, ScoreResult};
use crate::scoring::weights::{bound_score, compute_overall};

/// Skills score when there is nothing to match against.
pub const NEUTRAL_SKILLS_BASELINE: f64 = 55.0;
/// Experience score when no "N years" phrase is found.
pub const NEUTRAL_EXPERIENCE_BASELINE: f64 = 55.0;

const MIN_TOKEN_LEN: usize = 3;

/// Action verbs and platform terms that signal concrete, modern work.
const ACTION_VOCABULARY: &[&str] = &[
    "designed",
    "implemented",
    "optimized",
    "delivered",
    "migrated",
    "microservice",
    "cloud",
    "aws",
    "gcp",
    "azure",
];

static YEARS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{1,2})\s*\+?\s*(?:years|yrs)").expect("years pattern is valid")
});

/// Per-section markers; a section counts if any of its needles appears.
const SECTION_MARKERS: &[(&str, &[&str])] = &[
    ("experience", &["experience", "employment"]),
    ("education", &["education"]),
    ("skills", &["skills"]),
    ("contact", &["email", "phone"]),
];

const BULLET_MARKERS: &[char] = &['•', '-', '*'];

/// Stateless; kept as a type so the orchestrator can hold it next to the AI client.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer;

impl HeuristicScorer {
    /// Full heuristic pass. Always succeeds.
    pub fn score(&self, resume_text: &str, job_text: Option<&str>) -> ScoreResult {
        let resume_lower = resume_text.to_lowercase();
        let coverage = skill_coverage(&resume_lower, job_text.unwrap_or_default());
        let years = max_years_mentioned(&resume_lower);
        let sections = sections_found(resume_text);

        let skills = skills_score(resume_text, job_text.unwrap_or_default());
        let experience = experience_score(resume_text);
        let keywords = keywords_score(resume_text);
        let formatting = formatting_score(resume_text);
        let overall = compute_overall(skills, experience, keywords, formatting);

        let notes = if coverage.total() == 0 {
            "No job requirements to match against; neutral skills baseline applied.".to_string()
        } else {
            format!(
                "{}/{} job terms found in resume.",
                coverage.matched.len(),
                coverage.total()
            )
        };

        ScoreResult {
            overall,
            skills,
            experience,
            keywords,
            formatting,
            engine: EngineLabel::Heuristic,
            details: json!({
                "engine": "basic-heuristic",
                "wordCount": resume_text.split_whitespace().count(),
                "matchedSkills": coverage.matched,
                "missingSkills": coverage.missing,
                "experienceYears": years,
                "sectionsFound": sections,
                "notes": notes,
            }),
        }
    }
}

/// Job terms split by whether the resume mentions them.
#[derive(Debug, Default)]
struct SkillCoverage {
    matched: Vec<String>,
    missing: Vec<String>,
}

impl SkillCoverage {
    fn total(&self) -> usize {
        self.matched.len() + self.missing.len()
    }
}

/// Lowercased runs of `[a-z0-9+#/.]` of length ≥ 3.
pub fn job_tokens(job_text: &str) -> BTreeSet<String> {
    let lower = job_text.to_lowercase();
    lower
        .split(|c: char| {
            !(c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '+' | '#' | '/' | '.'))
        })
        .filter(|t| t.len() >= MIN_TOKEN_LEN)
        .map(str::to_owned)
        .collect()
}

fn skill_coverage(resume_lower: &str, job_text: &str) -> SkillCoverage {
    let mut coverage = SkillCoverage::default();
    for token in job_tokens(job_text) {
        if resume_lower.contains(&token) {
            coverage.matched.push(token);
        } else {
            coverage.missing.push(token);
        }
    }
    coverage
}

/// `40 + coverage*60`, or 55 when the job text yields no tokens.
pub fn skills_score(resume_text: &str, job_text: &str) -> f64 {
    let coverage = skill_coverage(&resume_text.to_lowercase(), job_text);
    if coverage.total() == 0 {
        return NEUTRAL_SKILLS_BASELINE;
    }
    let ratio = coverage.matched.len() as f64 / coverage.total() as f64;
    bound_score(40.0 + ratio * 60.0)
}

fn max_years_mentioned(resume_lower: &str) -> u32 {
    YEARS_RE
        .captures_iter(resume_lower)
        .filter_map(|c| c.get(1)?.as_str().parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}

/// `min(100, 30 + 7*years)` (55 with no years found), +5 for lead/senior.
pub fn experience_score(resume_text: &str) -> f64 {
    let lower = resume_text.to_lowercase();
    let years = max_years_mentioned(&lower);
    let mut base = if years > 0 {
        (30.0 + 7.0 * years as f64).min(100.0)
    } else {
        NEUTRAL_EXPERIENCE_BASELINE
    };
    if lower.contains("lead") || lower.contains("senior") {
        base += 5.0;
    }
    bound_score(base)
}

/// `50 + min(25, 5 * distinct vocabulary terms present)`.
pub fn keywords_score(resume_text: &str) -> f64 {
    let lower = resume_text.to_lowercase();
    let count = ACTION_VOCABULARY
        .iter()
        .filter(|term| lower.contains(*term))
        .count();
    bound_score(50.0 + (count as f64 * 5.0).min(25.0))
}

fn sections_found(resume_text: &str) -> Vec<&'static str> {
    let lower = resume_text.to_lowercase();
    let mut found: Vec<&'static str> = SECTION_MARKERS
        .iter()
        .filter(|(_, needles)| needles.iter().any(|n| lower.contains(n)))
        .map(|(name, _)| *name)
        .collect();
    if resume_text.contains(BULLET_MARKERS) {
        found.push("bullets");
    }
    found
}

/// 60 plus 8 per structural marker found.
pub fn formatting_score(resume_text: &str) -> f64 {
    bound_score(60.0 + 8.0 * sections_found(resume_text).len() as f64)
}

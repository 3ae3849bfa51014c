// Prompt constants for AI scoring.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, WEIGHTING_INSTRUCTION};
use crate::llm_client::truncate_chars;

pub const SCORING_SYSTEM: &str =
    "You are a precise resume-job matching and scoring engine. Return strict JSON.";

pub const MAX_JOB_CHARS: usize = 6000;
pub const MAX_RESUME_CHARS: usize = 8000;

/// Scoring instructions.
/// Replace: {weighting}, {json_only}
const SCORING_INSTRUCTIONS: &str = r#"You will score how well a resume matches a job.
Return ONLY a compact JSON object with keys: overall, skills, experience, keywords, formatting, details.
- Each score must be a number between 0 and 100.
- {weighting}
- details should include: matchedSkills[], missingSkills[], inferredRole, experienceYears, sectionsFound[], wordCount, briefNotes.
{json_only}"#;

/// Caller text is spliced in one pass, after the template is filled.
pub fn build_scoring_prompt(resume_text: &str, job_info: Option<&str>) -> String {
    let instructions = SCORING_INSTRUCTIONS
        .replace("{weighting}", WEIGHTING_INSTRUCTION)
        .replace("{json_only}", JSON_ONLY_INSTRUCTION);
    format!(
        "{instructions}\n\nJOB INFO:\n{job}\n\nRESUME TEXT (first {MAX_RESUME_CHARS} chars):\n{resume}",
        job = truncate_chars(job_info.unwrap_or_default(), MAX_JOB_CHARS),
        resume = truncate_chars(resume_text, MAX_RESUME_CHARS),
    )
}

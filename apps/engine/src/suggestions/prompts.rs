// Prompt constants for suggestion generation.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::truncate_chars;

pub const SUGGESTION_SYSTEM: &str = "You are a career coach providing actionable resume \
    improvement suggestions. Return strict JSON.";

pub const MAX_JOB_CHARS: usize = 5000;
pub const MAX_RESUME_CHARS: usize = 10000;
pub const MAX_CONTEXT_CHARS: usize = 2000;

/// Career-growth escalation. The client validates the shape on receipt;
/// it cannot verify that programs are real.
pub const CAREER_GROWTH_RULE: &str = r#"MANDATORY CAREER GROWTH RULE:
If the resume shows low experience, no internships, or no real-world projects relevant to the target role,
you MUST include one to two suggestions with category 'career_growth'.
For EVERY 'career_growth' suggestion ALL of the following fields are REQUIRED, non-empty and realistic:
- recommendationType: 'internship' | 'bootcamp' | 'certificate' | 'project'
- programName: the name of a real, reputable program or project idea
- programUrl: a URL where the program can be found
- duration: expected time commitment (e.g. '12 weeks')
- costRange: expected cost (e.g. 'Free', '$500-$1,000')
For every other category leave these five fields out."#;

/// Suggestion instructions.
/// Replace: {career_growth_rule}, {json_only}
const SUGGESTION_INSTRUCTIONS: &str = r#"Analyze this resume against the job requirements and provide 3-6 actionable suggestions for improvement.

Return ONLY a JSON object with key 'suggestions' containing an array of objects with:
- category: 'skills' | 'experience' | 'format' | 'keywords' | 'career_growth' | 'other'
- message: concise description of the issue (1-2 sentences)
- priority: 'high' | 'medium' | 'low'
- remediationSteps: specific actionable steps (2-4 bullet points)
- recommendationType, programName, programUrl, duration, costRange: only for 'career_growth'

{career_growth_rule}

Focus on gaps between the resume and job requirements. Be specific and constructive.
{json_only}"#;

/// Caller text and the score context are spliced in one pass, after the template is filled.
pub fn build_suggestion_prompt(
    resume_text: &str,
    job_info: Option<&str>,
    score_context_json: &str,
) -> String {
    let instructions = SUGGESTION_INSTRUCTIONS
        .replace("{career_growth_rule}", CAREER_GROWTH_RULE)
        .replace("{json_only}", JSON_ONLY_INSTRUCTION);
    format!(
        "{instructions}\n\nJOB INFO:\n{job}\n\nRESUME TEXT:\n{resume}\n\nSCORE DETAILS:\n{context}",
        job = truncate_chars(job_info.unwrap_or_default(), MAX_JOB_CHARS),
        resume = truncate_chars(resume_text, MAX_RESUME_CHARS),
        context = truncate_chars(score_context_json, MAX_CONTEXT_CHARS),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_escalation_rule() {
        let prompt = build_suggestion_prompt("resume", Some("job"), "{}");
        assert!(prompt.contains("career_growth"));
        assert!(prompt.contains("programUrl"));
        assert!(prompt.contains("internship' | 'bootcamp' | 'certificate' | 'project"));
        assert!(prompt.contains("SCORE DETAILS:\n{}"));
    }

    #[test]
    fn test_prompt_truncates_each_section() {
        let resume = "r".repeat(MAX_RESUME_CHARS + 10);
        let job = "j".repeat(MAX_JOB_CHARS + 10);
        let context = "c".repeat(MAX_CONTEXT_CHARS + 10);
        let prompt = build_suggestion_prompt(&resume, Some(&job), &context);
        assert!(prompt.contains(&"r".repeat(MAX_RESUME_CHARS)));
        assert!(!prompt.contains(&"r".repeat(MAX_RESUME_CHARS + 1)));
        assert!(prompt.contains(&"j".repeat(MAX_JOB_CHARS)));
        assert!(!prompt.contains(&"j".repeat(MAX_JOB_CHARS + 1)));
        assert!(prompt.ends_with(&"c".repeat(MAX_CONTEXT_CHARS)));
        assert!(!prompt.contains(&"c".repeat(MAX_CONTEXT_CHARS + 1)));
    }

    #[test]
    fn test_placeholders_in_caller_text_are_left_alone() {
        let prompt = build_suggestion_prompt(
            "SECRET_RESUME_BODY",
            Some("Job mentions {resume_text} literally"),
            r#"{"notes":"{job_info}"}"#,
        );
        assert_eq!(prompt.matches("SECRET_RESUME_BODY").count(), 1);
        assert!(prompt.contains("Job mentions {resume_text} literally"));
        assert!(prompt.ends_with(r#"{"notes":"{job_info}"}"#));
    }
}

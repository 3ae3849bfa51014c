// Shared prompt fragments.
// Each caller of the model defines its own prompts.rs alongside it;
// this file holds the pieces they have in common.

/// Appended to every task prompt: the reply is parsed, not read.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Respond with the JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// The overall-score definition every scoring prompt must state.
pub const WEIGHTING_INSTRUCTION: &str =
    "overall is a weighted mix: skills 35%, experience 30%, keywords 20%, formatting 15%.";

//! Locating a JSON object inside free-form model output.
//!
//! The upstream is asked for JSON only but routinely wraps it in prose or code
//! fences. Everything between the first `{` and the last `}` is taken as the
//! candidate object; callers decide what to do when there is none.

use serde_json::{Map, Value};

/// Returns the slice from the first `{` through the last `}`, if such a pair exists.
pub fn extract_json_object(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (end > start).then(|| &content[start..=end])
}

/// Parses the located object. `None` when there is no brace pair or the
/// candidate is not a JSON object.
pub fn parse_json_object(content: &str) -> Option<Result<Map<String, Value>, serde_json::Error>> {
    let candidate = extract_json_object(content)?;
    Some(serde_json::from_str::<Map<String, Value>>(candidate))
}

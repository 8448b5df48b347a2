//! Recovery of a JSON object from free-text model output.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::warn;

use crate::error::PlannerError;

const SNIPPET_CHARS: usize = 500;

fn fence() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    // Opening fences may carry a language tag; closing ones are bare.
    FENCE.get_or_init(|| {
        Regex::new(r"(?i)```[a-z0-9_+-]*\s*").expect("fence pattern is valid")
    })
}

/// Span from the first `{` to the last `}`, or the whole text when there is
/// no such span.
fn object_span(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

pub fn parse_json_from_completion(text: &str) -> Result<Value, PlannerError> {
    let cleaned = fence().replace_all(text, "");
    let cleaned = cleaned.trim();

    let parsed = serde_json::from_str::<Value>(object_span(cleaned));

    match parsed {
        Ok(value @ Value::Object(_)) => Ok(value),
        other => {
            let snippet: String = cleaned.chars().take(SNIPPET_CHARS).collect();
            warn!(
                task = "parse completion",
                error = other
                    .err()
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "not an object".to_string()),
                snippet = snippet.as_str(),
            );
            Err(PlannerError::Parse { snippet })
        }
    }
}

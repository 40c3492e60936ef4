//! Best-effort recovery of JSON from free-form model output.
//!
//! Functions occasionally answer with prose, fenced code blocks or truncated
//! JSON instead of a clean object. Nothing here guarantees field presence.

use parking_lot::Mutex;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)```").expect("valid fenced block regex")
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SalvageError {
    #[error("No JSON object found in model output")]
    NoJson,
}

/// Parse model output as JSON: whole text, then a fenced block, then the
/// outermost `{...}` span.
pub fn parse_model_json(text: &str) -> Result<Value, SalvageError> {
    let trimmed = text.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Ok(value);
    }

    for captures in FENCED_BLOCK.captures_iter(trimmed) {
        if let Some(block) = captures.get(1) {
            if let Ok(value) = serde_json::from_str::<Value>(block.as_str().trim()) {
                return Ok(value);
            }
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            if let Ok(value) = serde_json::from_str::<Value>(&trimmed[start..=end]) {
                return Ok(value);
            }
        }
    }

    Err(SalvageError::NoJson)
}

/// Compiled field-scan patterns keyed by the requested field list
static FIELD_PATTERNS: LazyLock<Mutex<HashMap<String, Regex>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// One alternation over every requested field; capture 1 is the field name,
/// capture 2 its value.
fn field_pattern(fields: &[&str]) -> Option<Regex> {
    let key = fields.join("\u{0}");
    let mut cache = FIELD_PATTERNS.lock();
    if let Some(re) = cache.get(&key) {
        return Some(re.clone());
    }

    let names: Vec<String> = fields.iter().map(|f| regex::escape(f)).collect();
    let pattern = format!(
        r#""({})"\s*:\s*("(?:[^"\\]|\\.)*"|-?\d+(?:\.\d+)?|true|false)"#,
        names.join("|")
    );
    let re = Regex::new(&pattern).ok()?;
    cache.insert(key, re.clone());
    Some(re)
}

/// Regex scan for `"field": <string|number|bool>` pairs. Fields that cannot be
/// found are left out of the returned object; the first occurrence wins.
pub fn salvage_fields(text: &str, fields: &[&str]) -> Value {
    let mut object = Map::new();

    if let Some(re) = (!fields.is_empty()).then(|| field_pattern(fields)).flatten() {
        for captures in re.captures_iter(text) {
            let (Some(name), Some(raw)) = (captures.get(1), captures.get(2)) else {
                continue;
            };
            if object.contains_key(name.as_str()) {
                continue;
            }
            if let Ok(value) = serde_json::from_str::<Value>(raw.as_str()) {
                object.insert(name.as_str().to_string(), value);
            }
        }
    }

    debug!(
        recovered = object.len(),
        requested = fields.len(),
        "Salvaged fields from model output"
    );
    Value::Object(object)
}

/// Normalize a function payload: strings are parsed as model output, falling
/// back to field salvage; every other value is returned unchanged. Text that
/// yields neither JSON nor a single salvaged field is an error.
pub fn coerce_payload(value: Value, fields: &[&str]) -> Result<Value, SalvageError> {
    match value {
        Value::String(text) => match parse_model_json(&text) {
            Ok(parsed) => Ok(parsed),
            Err(_) => match salvage_fields(&text, fields) {
                Value::Object(object) if !object.is_empty() => Ok(Value::Object(object)),
                _ => Err(SalvageError::NoJson),
            },
        },
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_json() {
        assert_eq!(parse_model_json(r#" {"score": 7} "#), Ok(json!({"score": 7})));
    }

    #[test]
    fn test_fenced_block() {
        let text = "Here is the analysis:\n```json\n{\"alignmentScore\": 82}\n```\nThanks.";
        assert_eq!(parse_model_json(text), Ok(json!({"alignmentScore": 82})));
    }

    #[test]
    fn test_embedded_object() {
        let text = "Result => {\"summary\": \"ok\", \"risks\": []} (end)";
        assert_eq!(
            parse_model_json(text),
            Ok(json!({"summary": "ok", "risks": []}))
        );
    }

    #[test]
    fn test_no_json() {
        assert_eq!(parse_model_json("no structure here"), Err(SalvageError::NoJson));
    }

    #[test]
    fn test_salvage_fields_from_truncated_output() {
        let text = r#"{"impactScore": 64, "economicImpact": "Moderate \"gains\"", "approved": true, "stakeholderImpact": {"#;
        let value = salvage_fields(text, &["impactScore", "economicImpact", "approved", "missing"]);

        assert_eq!(value["impactScore"], json!(64));
        assert_eq!(value["economicImpact"], json!("Moderate \"gains\""));
        assert_eq!(value["approved"], json!(true));
        assert!(value.get("missing").is_none());
    }

    #[test]
    fn test_coerce_payload() {
        assert_eq!(coerce_payload(json!({"a": 1}), &[]), Ok(json!({"a": 1})));
        assert_eq!(
            coerce_payload(json!("```\n{\"a\": 2}\n```"), &[]),
            Ok(json!({"a": 2}))
        );
        assert_eq!(
            coerce_payload(json!("score \"a\": 3 and more"), &["a"]),
            Ok(json!({"a": 3}))
        );
    }

    #[test]
    fn test_unrecoverable_text_is_an_error() {
        assert_eq!(
            coerce_payload(json!("Sorry, the model is overloaded."), &["impactScore"]),
            Err(SalvageError::NoJson)
        );
        assert_eq!(
            coerce_payload(json!("Internal server error"), &[]),
            Err(SalvageError::NoJson)
        );
    }

    #[test]
    fn test_salvage_keeps_first_occurrence_and_reuses_pattern() {
        let text = r#""score": 1, "label": "a", "score": 2"#;
        let first = salvage_fields(text, &["score", "label"]);
        let second = salvage_fields(text, &["score", "label"]);

        assert_eq!(first, json!({"score": 1, "label": "a"}));
        assert_eq!(first, second);
        assert!(FIELD_PATTERNS.lock().contains_key("score\u{0}label"));
    }
}

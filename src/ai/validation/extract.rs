//! JSON Array Extraction
//!
//! Recovers a JSON array from collaborator text.
//!
//! Handles the usual ways a model wraps its answer:
//! - Markdown code fences (```json ... ```)
//! - Explanatory prose before or after the array
//! - Byte order mark and surrounding whitespace

use serde_json::Value;
use tracing::{debug, warn};

use crate::types::ExtractionError;

/// Parse collaborator text into the elements of a top-level JSON array
pub fn extract_json_array(raw: &str) -> Result<Vec<Value>, ExtractionError> {
    if raw.trim().is_empty() {
        return Err(ExtractionError::EmptyOutput);
    }

    let preprocessed = preprocess(raw);
    let cleaned = isolate_array(&preprocessed);

    match serde_json::from_str::<Value>(cleaned) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(other) => {
            warn!(
                "Collaborator output parsed as JSON {} instead of an array",
                json_kind(&other)
            );
            Err(ExtractionError::NotJsonArray {
                raw: raw.to_string(),
            })
        }
        Err(e) => {
            warn!("JSON parse error: {}", e);
            debug!(
                "Unparseable content preview: {}...",
                raw.chars().take(200).collect::<String>()
            );
            Err(ExtractionError::NotJsonArray {
                raw: raw.to_string(),
            })
        }
    }
}

/// Strip fences and BOM, trim
fn preprocess(raw: &str) -> String {
    let s = strip_code_fences(raw.trim());
    s.trim_start_matches('\u{feff}').trim().to_string()
}

/// Remove every ``` marker, and a `json` language tag directly after one
fn strip_code_fences(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find("```") {
        result.push_str(&rest[..pos]);
        rest = &rest[pos + 3..];
        if rest
            .get(..4)
            .is_some_and(|tag| tag.eq_ignore_ascii_case("json"))
        {
            rest = &rest[4..];
        }
    }
    result.push_str(rest);

    result
}

/// Slice from the first `[` to the last `]` when the text does not already
/// start with an array
fn isolate_array(s: &str) -> &str {
    if s.starts_with('[') {
        return s;
    }

    match (s.find('['), s.rfind(']')) {
        (Some(first), Some(last)) if last > first => &s[first..=last],
        _ => s,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_array() {
        let items = extract_json_array(r#"[{"a": 1}, {"a": 2}]"#).unwrap();
        assert_eq!(items, vec![json!({"a": 1}), json!({"a": 2})]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_json_array(""), Err(ExtractionError::EmptyOutput));
        assert_eq!(extract_json_array("  \n\t "), Err(ExtractionError::EmptyOutput));
    }

    #[test]
    fn test_fenced_array() {
        let items = extract_json_array("```json\n[1, 2, 3]\n```").unwrap();
        assert_eq!(items, vec![json!(1), json!(2), json!(3)]);

        let items = extract_json_array("```JSON\n[1]\n```").unwrap();
        assert_eq!(items, vec![json!(1)]);

        let items = extract_json_array("```\n[true]\n```").unwrap();
        assert_eq!(items, vec![json!(true)]);
    }

    #[test]
    fn test_array_in_prose() {
        let items = extract_json_array("Sure! Here it is:\n[\"x\"]\nEnjoy.").unwrap();
        assert_eq!(items, vec![json!("x")]);
    }

    #[test]
    fn test_fence_inside_prose() {
        let text = "Here you go:\n```json\n[{\"k\": \"v\"}]\n```\nHave fun";
        let items = extract_json_array(text).unwrap();
        assert_eq!(items, vec![json!({"k": "v"})]);
    }

    #[test]
    fn test_bom_is_ignored() {
        let items = extract_json_array("\u{feff}[1]").unwrap();
        assert_eq!(items, vec![json!(1)]);
    }

    #[test]
    fn test_refusal_is_not_an_array() {
        let raw = "I cannot generate that.";
        assert_eq!(
            extract_json_array(raw),
            Err(ExtractionError::NotJsonArray {
                raw: raw.to_string()
            })
        );
    }

    #[test]
    fn test_object_wrapping_an_array_yields_the_inner_array() {
        // First `[` to last `]` is sliced out before parsing
        assert_eq!(extract_json_array(r#"{"questions": []}"#), Ok(vec![]));
    }

    #[test]
    fn test_scalar_and_object_are_not_arrays() {
        for raw in ["42", r#""text""#, r#"{"a": 1}"#, "null"] {
            assert_eq!(
                extract_json_array(raw),
                Err(ExtractionError::NotJsonArray {
                    raw: raw.to_string()
                }),
                "input: {raw}"
            );
        }
    }

    #[test]
    fn test_truncated_array_keeps_raw() {
        let raw = "```json\n[{\"question\": \"cut off";
        assert_eq!(
            extract_json_array(raw),
            Err(ExtractionError::NotJsonArray {
                raw: raw.to_string()
            })
        );
    }

    #[test]
    fn test_reversed_brackets_left_unchanged() {
        assert_eq!(isolate_array("] nothing ["), "] nothing [");
        assert_eq!(isolate_array("no brackets"), "no brackets");
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n[]\n```"), "\n[]\n");
        assert_eq!(strip_code_fences("no fences"), "no fences");
        assert_eq!(strip_code_fences("```js"), "js");
    }
}

//! Recover JSON payloads from free-form model output.
//!
//! Model output is not guaranteed to be isolated JSON: it may be wrapped in
//! prose, markdown fences, or contain several JSON-like fragments. This
//! module only delimits the candidate text. Parsing and shape validation
//! belong to each call site, since the expected shapes differ.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // ```json ... ``` (tag is case-insensitive), shortest body
    static ref FENCED_JSON_REGEX: Regex =
        Regex::new(r"(?s)```(?i:json)\s*(.*?)\s*```").unwrap();

    // Outermost array or object followed only by non-backtick text to the end
    static ref TRAILING_JSON_REGEX: Regex =
        Regex::new(r"(?s)(\[.*\]|\{.*\})[^`]*$").unwrap();
}

/// Extract a JSON substring from model text.
///
/// Search order, first match wins:
/// 1. the body of a fenced block tagged `json`
/// 2. a standalone JSON array or object, allowing trailing non-backtick text
///
/// Returns `None` when neither is present. The returned slice is trimmed but
/// not validated.
pub fn extract_json(text: &str) -> Option<&str> {
    if let Some(body) = FENCED_JSON_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|body| !body.is_empty())
    {
        return Some(body);
    }

    TRAILING_JSON_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fenced_block_with_prose() {
        let text = "prefix ```json {\"a\":1} ``` suffix";
        assert_eq!(extract_json(text), Some("{\"a\":1}"));
    }

    #[test]
    fn test_fenced_block_multiline() {
        let text = "Here are the clauses:\n```json\n[\n  {\"clause_type\": \"Term\"}\n]\n```\nLet me know.";
        assert_eq!(extract_json(text), Some("[\n  {\"clause_type\": \"Term\"}\n]"));
    }

    #[test]
    fn test_fenced_block_preferred_over_bare_json() {
        let text = "{\"draft\": true}\n```json\n{\"final\": true}\n```";
        assert_eq!(extract_json(text), Some("{\"final\": true}"));
    }

    #[test]
    fn test_bare_object_with_trailing_prose() {
        let text = "Sure! {\"summary\": \"S\", \"events\": []} Hope this helps.";
        assert_eq!(
            extract_json(text),
            Some("{\"summary\": \"S\", \"events\": []}")
        );
    }

    #[test]
    fn test_bare_array() {
        assert_eq!(extract_json("[1, 2, 3]"), Some("[1, 2, 3]"));
    }

    #[test]
    fn test_plain_prose_returns_none() {
        assert_eq!(extract_json("The contract is valid for two years."), None);
        assert_eq!(extract_json(""), None);
    }

    #[test]
    fn test_bare_json_followed_by_backticks_returns_none() {
        assert_eq!(extract_json("{\"a\": 1} ```"), None);
    }

    #[test]
    fn test_empty_fence_falls_back() {
        let text = "```json\n```\n{\"a\": 1}";
        assert_eq!(extract_json(text), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_no_validation_performed() {
        assert_eq!(extract_json("```json\n{not json\n```"), Some("{not json"));
    }

    proptest! {
        #[test]
        fn prop_fenced_object_recovered_exactly(
            prefix in "[a-zA-Z .,]{0,30}",
            suffix in "[a-zA-Z .,]{0,30}",
            key in "[a-z]{1,8}",
            value in 0i64..10_000,
        ) {
            let payload = format!("{{\"{}\":{}}}", key, value);
            let text = format!("{} ```json {} ``` {}", prefix, payload, suffix);
            prop_assert_eq!(extract_json(&text), Some(payload.as_str()));
        }

        #[test]
        fn prop_text_without_brackets_yields_none(text in "[^\\[\\]{}`]{0,200}") {
            prop_assert_eq!(extract_json(&text), None);
        }
    }
}

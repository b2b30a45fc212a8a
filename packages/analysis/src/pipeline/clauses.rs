//! Clause extraction parsing.

use tracing::{debug, warn};

use crate::pipeline::extract::extract_json;
use crate::types::{analysis::ClauseRecord, generation::GenerationOutcome};

/// Turn a clause-prompt outcome into clause records.
///
/// - JSON array of `{clause_type, clause_text}` -> the records, in order
/// - generation failed -> one "Generation Error" sentinel, whatever the diagnostic contains
/// - JSON found but unparsable or wrongly shaped -> one "Parsing Error" sentinel
/// - no JSON from a successful generation -> no clauses
pub fn parse_clauses(outcome: &GenerationOutcome) -> Vec<ClauseRecord> {
    if !outcome.succeeded {
        return vec![ClauseRecord::generation_error(&outcome.text)];
    }

    let Some(json) = extract_json(&outcome.text) else {
        debug!("No clause JSON found in model response");
        return Vec::new();
    };

    match serde_json::from_str::<Vec<ClauseRecord>>(json) {
        Ok(clauses) => clauses,
        Err(e) => {
            warn!(error = %e, "Clause JSON did not parse");
            vec![ClauseRecord::parsing_error(&outcome.text)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::generation::ModelVariant;

    fn ok(text: &str) -> GenerationOutcome {
        GenerationOutcome::success(text, ModelVariant::A, "flash")
    }

    #[test]
    fn test_fenced_clauses() {
        let outcome = ok(r#"Here you go:
```json
[
  {"clause_type": "Termination", "clause_text": "Either party may terminate with 30 days notice."},
  {"clause_type": "Governing Law", "clause_text": "This Agreement is governed by Delaware law."}
]
```"#);
        let clauses = parse_clauses(&outcome);

        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].clause_type, "Termination");
        assert_eq!(clauses[1].clause_type, "Governing Law");
    }

    #[test]
    fn test_malformed_json_yields_single_sentinel() {
        let raw = "```json\n[{\"clause_type\": \"Term\", \"clause_text\": ]\n```";
        let clauses = parse_clauses(&ok(raw));

        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].clause_type, "Parsing Error");
        assert!(clauses[0].clause_text.contains(raw));
    }

    #[test]
    fn test_wrong_shape_yields_sentinel() {
        let clauses = parse_clauses(&ok(r#"{"clauses": "none"}"#));
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].clause_type, "Parsing Error");
    }

    #[test]
    fn test_prose_without_json_yields_nothing() {
        assert!(parse_clauses(&ok("I could not find any clauses.")).is_empty());
    }

    #[test]
    fn test_generation_failure_yields_generation_sentinel() {
        let outcome = GenerationOutcome::failure(ModelVariant::A, "flash", "quota exceeded");
        let clauses = parse_clauses(&outcome);

        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].clause_type, "Generation Error");
        assert!(clauses[0].clause_text.starts_with("Error:"));
    }

    #[test]
    fn test_failure_with_json_error_body_is_generation_sentinel() {
        let outcome = GenerationOutcome::failure(
            ModelVariant::B,
            "pro",
            r#"Gemini API error (429 Too Many Requests): {"error": {"code": 429, "status": "RESOURCE_EXHAUSTED"}}"#,
        );
        let clauses = parse_clauses(&outcome);

        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].clause_type, "Generation Error");
        assert!(clauses[0].clause_text.contains("RESOURCE_EXHAUSTED"));
    }
}

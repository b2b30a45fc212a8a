//! Timeline types - chronological events recovered from a document.

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Summary used when the model's object has no usable `summary` string.
pub const NO_SUMMARY_PROVIDED: &str = "No summary provided.";

/// A single event. `date` is free-form: an exact date or a relative phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl TimelineEvent {
    pub fn new(
        date: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Why a timeline response could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimelineFailure {
    /// No JSON object or array was found in the model text
    #[error("no JSON found in model response")]
    NoJson,

    /// A candidate was found but is not valid JSON
    #[error("invalid JSON: {decode_error}")]
    Parse { decode_error: String },

    /// Valid JSON, but not an object
    #[error("timeline JSON is not an object")]
    NotObject,

    /// Object is missing a required key
    #[error("timeline JSON is missing '{0}'")]
    MissingKey(&'static str),
}

impl TimelineFailure {
    /// Fixed, user-facing explanation.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "Failed to parse timeline JSON from model response.",
            Self::NoJson | Self::NotObject | Self::MissingKey(_) => {
                "Model did not return the expected JSON structure for timeline."
            }
        }
    }

    /// Summary shown in place of the model's.
    pub fn placeholder_summary(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "Failed to generate timeline summary due to parsing error.",
            Self::NoJson | Self::NotObject | Self::MissingKey(_) => {
                "Could not generate timeline summary."
            }
        }
    }

    pub fn decode_error(&self) -> Option<&str> {
        match self {
            Self::Parse { decode_error } => Some(decode_error),
            _ => None,
        }
    }
}

/// Outcome of timeline extraction.
///
/// Serializes to the transport shape: `{timeline_summary, timeline_events}` on
/// success, `{error, raw, decode_error?, timeline_summary, timeline_events: []}`
/// on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineResult {
    Success {
        summary: String,
        events: Vec<TimelineEvent>,
    },
    Error {
        failure: TimelineFailure,
        /// The model text as returned, for auditing
        raw: String,
    },
}

impl TimelineResult {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Model summary, or the failure's placeholder.
    pub fn summary(&self) -> &str {
        match self {
            Self::Success { summary, .. } => summary,
            Self::Error { failure, .. } => failure.placeholder_summary(),
        }
    }

    /// Events in model order; always empty on failure.
    pub fn events(&self) -> &[TimelineEvent] {
        match self {
            Self::Success { events, .. } => events,
            Self::Error { .. } => &[],
        }
    }

    pub fn raw(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Error { raw, .. } => Some(raw),
        }
    }
}

#[derive(Serialize)]
struct SuccessWire<'a> {
    timeline_summary: &'a str,
    timeline_events: &'a [TimelineEvent],
}

#[derive(Serialize)]
struct ErrorWire<'a> {
    error: &'a str,
    raw: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    decode_error: Option<&'a str>,
    timeline_summary: &'a str,
    timeline_events: &'a [TimelineEvent],
}

impl Serialize for TimelineResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success { summary, events } => SuccessWire {
                timeline_summary: summary,
                timeline_events: events,
            }
            .serialize(serializer),
            Self::Error { failure, raw } => ErrorWire {
                error: failure.message(),
                raw,
                decode_error: failure.decode_error(),
                timeline_summary: failure.placeholder_summary(),
                timeline_events: &[],
            }
            .serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_wire_shape() {
        let result = TimelineResult::Success {
            summary: "S".to_string(),
            events: vec![TimelineEvent::new("2020", "T", "D")],
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "timeline_summary": "S",
                "timeline_events": [{"date": "2020", "title": "T", "description": "D"}]
            })
        );
    }

    #[test]
    fn test_error_wire_shape() {
        let result = TimelineResult::Error {
            failure: TimelineFailure::NoJson,
            raw: "just prose".to_string(),
        };
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(
            json["error"],
            "Model did not return the expected JSON structure for timeline."
        );
        assert_eq!(json["raw"], "just prose");
        assert_eq!(json["timeline_events"], json!([]));
        assert!(json.get("decode_error").is_none());
    }

    #[test]
    fn test_parse_failure_carries_decoder_message() {
        let result = TimelineResult::Error {
            failure: TimelineFailure::Parse {
                decode_error: "expected value at line 1 column 2".to_string(),
            },
            raw: "{x}".to_string(),
        };
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["decode_error"], "expected value at line 1 column 2");
        assert_eq!(
            json["timeline_summary"],
            "Failed to generate timeline summary due to parsing error."
        );
        assert!(result.events().is_empty());
    }

    #[test]
    fn test_failure_display() {
        let failure = TimelineFailure::Parse {
            decode_error: "expected value at line 1 column 2".to_string(),
        };
        assert_eq!(
            failure.to_string(),
            "invalid JSON: expected value at line 1 column 2"
        );
        assert_eq!(
            TimelineFailure::MissingKey("events").to_string(),
            "timeline JSON is missing 'events'"
        );
    }
}

//! Timeline response validation.
//!
//! `ModelCalled -> {NoJson | Parse | NotObject | MissingKey} -> Error`
//! or `ModelCalled -> valid -> Success`. Nothing is retried.

use serde_json::{Map, Value};
use tracing::warn;

use crate::pipeline::extract::extract_json;
use crate::types::timeline::{TimelineEvent, TimelineFailure, TimelineResult, NO_SUMMARY_PROVIDED};

/// Validate a timeline response and normalize it into a [`TimelineResult`].
///
/// A non-array `events` value is coerced to an empty list instead of
/// failing. Event order is kept as the model produced it.
pub fn parse_timeline(raw: &str) -> TimelineResult {
    match interpret(raw) {
        Ok((summary, events)) => TimelineResult::Success { summary, events },
        Err(failure) => {
            warn!(failure = %failure, raw_len = raw.len(), "Unusable timeline response");
            TimelineResult::Error {
                failure,
                raw: raw.to_string(),
            }
        }
    }
}

fn interpret(raw: &str) -> Result<(String, Vec<TimelineEvent>), TimelineFailure> {
    let json = extract_json(raw).ok_or(TimelineFailure::NoJson)?;

    let value: Value = serde_json::from_str(json).map_err(|e| TimelineFailure::Parse {
        decode_error: e.to_string(),
    })?;

    let Value::Object(mut object) = value else {
        return Err(TimelineFailure::NotObject);
    };

    let summary = object
        .remove("summary")
        .ok_or(TimelineFailure::MissingKey("summary"))?;
    let events = object
        .remove("events")
        .ok_or(TimelineFailure::MissingKey("events"))?;

    let summary = match summary {
        Value::String(summary) => summary,
        _ => NO_SUMMARY_PROVIDED.to_string(),
    };

    let events = match events {
        Value::Array(items) => items.into_iter().filter_map(event_from_value).collect(),
        _ => {
            warn!("Timeline 'events' is not a list, using an empty list");
            Vec::new()
        }
    };

    Ok((summary, events))
}

/// Lenient event conversion: scalars become strings, missing fields are empty.
fn event_from_value(value: Value) -> Option<TimelineEvent> {
    let Value::Object(mut fields) = value else {
        return None;
    };

    Some(TimelineEvent {
        date: take_text(&mut fields, "date"),
        title: take_text(&mut fields, "title"),
        description: take_text(&mut fields, "description"),
    })
}

fn take_text(fields: &mut Map<String, Value>, key: &str) -> String {
    match fields.remove(key) {
        Some(Value::String(text)) => text,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

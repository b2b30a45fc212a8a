//! Entity merging - statistical spans plus pattern-matched statute references.

use indexmap::IndexSet;
use lazy_static::lazy_static;
use regex::Regex;

use crate::traits::recognizer::RecognizedSpan;
use crate::types::entity::{Entity, EntityCategory};

lazy_static! {
    // [the] Title Case Words Act of YYYY; the article is outside the capture
    static ref LAW_REGEX: Regex = Regex::new(
        r"\b(?:[Tt]he\s+)?((?:[A-Z][A-Za-z'\-]*\s+)+Act\s+of\s+\d{4})\b"
    ).unwrap();
}

/// Find statute references of the form "... Act of YYYY".
pub fn find_law_references(text: &str) -> impl Iterator<Item = Entity> + '_ {
    LAW_REGEX
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| Entity::new(m.as_str(), EntityCategory::Law))
}

/// Merge statistical spans with pattern-matched LAW entities.
///
/// Spans outside the PERSON/ORG/GPE/DATE allow-list are discarded. The
/// result holds each (text, category) pair once, in first-seen order.
pub fn merge_entities<'a>(
    spans: impl IntoIterator<Item = &'a RecognizedSpan>,
    document_text: &str,
) -> Vec<Entity> {
    let mut unique: IndexSet<Entity> = IndexSet::new();

    for span in spans {
        if let Some(category) = EntityCategory::from_statistical_label(&span.label) {
            unique.insert(Entity::new(span.text.clone(), category));
        }
    }

    unique.extend(find_law_references(document_text));

    unique.into_iter().collect()
}

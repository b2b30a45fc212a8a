//! Statistical named-entity recognizer trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A span reported by a statistical recognizer, before category filtering.
///
/// `label` is the recognizer's raw category label (`PERSON`, `ORG`,
/// `NORP`, ...). Unknown labels are expected and filtered downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedSpan {
    pub text: String,
    pub label: String,
}

impl RecognizedSpan {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// Statistical entity recognizer: text in, labelled spans out.
#[async_trait]
pub trait EntityRecognizer: Send + Sync {
    async fn recognize(&self, text: &str) -> Result<Vec<RecognizedSpan>>;
}

//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the analysis library
//! without making real LLM or recognizer calls.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::error::{AnalysisError, Result};
use crate::pipeline::router::TrafficDraw;
use crate::traits::{
    experiment_log::ExperimentLog,
    generator::TextGenerator,
    recognizer::{EntityRecognizer, RecognizedSpan},
};
use crate::types::generation::ExperimentLogEntry;

/// Response used when no rule matches a prompt.
pub const DEFAULT_MOCK_RESPONSE: &str = "Mock response";

/// How the mock generator answers a matching prompt.
#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Fail(String),
}

/// Record of a call made to the mock generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorCall {
    pub prompt: String,
    pub model: String,
}

/// A mock text generator for testing.
///
/// Replies are chosen by the first rule whose needle occurs in the prompt,
/// so tests can target a sub-task by a phrase from its prompt template.
#[derive(Default)]
pub struct MockGenerator {
    rules: Vec<(String, MockReply)>,
    fallback: Option<MockReply>,
    calls: Arc<RwLock<Vec<GeneratorCall>>>,
}

impl MockGenerator {
    /// Create a mock that answers every prompt with [`DEFAULT_MOCK_RESPONSE`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fallback: Some(MockReply::Fail(message.into())),
            ..Default::default()
        }
    }

    /// Reply with `response` to prompts containing `needle`.
    pub fn with_response(mut self, needle: impl Into<String>, response: impl Into<String>) -> Self {
        self.rules.push((needle.into(), MockReply::Text(response.into())));
        self
    }

    /// Fail prompts containing `needle` with `message`.
    pub fn with_failure(mut self, needle: impl Into<String>, message: impl Into<String>) -> Self {
        self.rules.push((needle.into(), MockReply::Fail(message.into())));
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<GeneratorCall> {
        self.calls.read().unwrap().clone()
    }

    fn reply_for(&self, prompt: &str) -> MockReply {
        self.rules
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, reply)| reply.clone())
            .or_else(|| self.fallback.clone())
            .unwrap_or_else(|| MockReply::Text(DEFAULT_MOCK_RESPONSE.to_string()))
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str, model: &str) -> Result<String> {
        self.calls.write().unwrap().push(GeneratorCall {
            prompt: prompt.to_string(),
            model: model.to_string(),
        });

        match self.reply_for(prompt) {
            MockReply::Text(text) => Ok(text),
            MockReply::Fail(message) => Err(AnalysisError::Generation(message.into())),
        }
    }
}

/// A mock statistical recognizer returning predefined spans.
#[derive(Default)]
pub struct MockRecognizer {
    spans: Vec<RecognizedSpan>,
    failure: Option<String>,
}

impl MockRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recognizer that always fails.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Default::default()
        }
    }

    /// Add a span reported for every text.
    pub fn with_span(mut self, text: impl Into<String>, label: impl Into<String>) -> Self {
        self.spans.push(RecognizedSpan::new(text, label));
        self
    }
}

#[async_trait]
impl EntityRecognizer for MockRecognizer {
    async fn recognize(&self, _text: &str) -> Result<Vec<RecognizedSpan>> {
        match &self.failure {
            Some(message) => Err(AnalysisError::Recognizer(message.clone().into())),
            None => Ok(self.spans.clone()),
        }
    }
}

/// A draw that cycles through fixed values.
pub struct FixedDraw {
    values: Vec<u8>,
    next: AtomicUsize,
}

impl FixedDraw {
    /// Cycle through `values` (must be non-empty, each in `1..=100`).
    pub fn new(values: Vec<u8>) -> Self {
        assert!(!values.is_empty(), "FixedDraw needs at least one value");
        Self {
            values,
            next: AtomicUsize::new(0),
        }
    }

    /// Always return `value`.
    pub fn always(value: u8) -> Self {
        Self::new(vec![value])
    }
}

impl TrafficDraw for FixedDraw {
    fn draw(&self) -> u8 {
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        self.values[index % self.values.len()]
    }
}

/// An experiment log whose appends always fail.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingLog;

#[async_trait]
impl ExperimentLog for FailingLog {
    async fn append(&self, _entry: &ExperimentLogEntry) -> Result<()> {
        Err(AnalysisError::Log("experiment log unavailable".into()))
    }
}

//! Statistical entity recognizer implementations.
//!
//! - `HttpEntityRecognizer` - NER sidecar over HTTP
//! - `NoopRecognizer` - no statistical spans (pattern pass only)

pub mod http;

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::recognizer::{EntityRecognizer, RecognizedSpan};

pub use http::HttpEntityRecognizer;

/// Recognizer that reports nothing.
///
/// Used when no NER service is configured; statute references are still
/// found by the pattern pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRecognizer;

#[async_trait]
impl EntityRecognizer for NoopRecognizer {
    async fn recognize(&self, _text: &str) -> Result<Vec<RecognizedSpan>> {
        Ok(Vec::new())
    }
}

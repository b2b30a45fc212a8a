//! HTTP client for a named-entity recognition sidecar.
//!
//! The sidecar wraps a statistical NER model and exposes:
//!
//! ```text
//! POST {base_url}/ner  {"text": "..."}
//! -> {"entities": [{"text": "Acme Corp", "label": "ORG"}, ...]}
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::traits::recognizer::{EntityRecognizer, RecognizedSpan};

/// Recognizer backed by an NER sidecar.
///
/// # Example
///
/// ```rust,ignore
/// use analysis::HttpEntityRecognizer;
///
/// let recognizer = HttpEntityRecognizer::new("http://localhost:8090")?;
/// let spans = recognizer.recognize("Alice sued Acme in Boston.").await?;
/// ```
#[derive(Clone)]
pub struct HttpEntityRecognizer {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct NerRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct NerResponse {
    #[serde(default)]
    entities: Vec<RecognizedSpan>,
}

impl HttpEntityRecognizer {
    /// Create a recognizer for the sidecar at `base_url` (30s timeout).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AnalysisError::Config(format!("failed to build NER client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/ner", self.base_url)
    }
}

#[async_trait]
impl EntityRecognizer for HttpEntityRecognizer {
    async fn recognize(&self, text: &str) -> Result<Vec<RecognizedSpan>> {
        let response = self
            .client
            .post(self.endpoint())
            .json(&NerRequest { text })
            .send()
            .await
            .map_err(|e| AnalysisError::Recognizer(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Recognizer(
                format!("NER service returned {}: {}", status, body).into(),
            ));
        }

        let parsed: NerResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Recognizer(Box::new(e)))?;

        debug!(spans = parsed.entities.len(), "NER sidecar responded");
        Ok(parsed.entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let recognizer = HttpEntityRecognizer::new("http://localhost:8090/").unwrap();
        assert_eq!(recognizer.endpoint(), "http://localhost:8090/ner");
    }

    #[test]
    fn test_response_shape() {
        let parsed: NerResponse = serde_json::from_str(
            r#"{"entities": [{"text": "Acme Corp", "label": "ORG"}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.entities, vec![RecognizedSpan::new("Acme Corp", "ORG")]);

        let empty: NerResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.entities.is_empty());
    }
}

//! Generation types - requests, outcomes and experiment telemetry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One of the two interchangeable engine configurations in the experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelVariant {
    A,
    B,
}

impl ModelVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }
}

impl std::fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A prompt to route, with the caller it is made on behalf of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt_text: String,
    pub caller_id: String,
}

impl GenerationRequest {
    pub fn new(prompt_text: impl Into<String>, caller_id: impl Into<String>) -> Self {
        Self {
            prompt_text: prompt_text.into(),
            caller_id: caller_id.into(),
        }
    }
}

/// The result of one routed generation call.
///
/// Failures are carried as data: `succeeded` is the authoritative flag and
/// `text` holds either the model output or a human-readable diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationOutcome {
    /// Model output, or a diagnostic starting with `"Error:"` on failure
    pub text: String,

    /// Which experiment arm answered
    pub model_variant: ModelVariant,

    /// Model identifier of that arm
    pub model_name: String,

    /// Whether the engine call succeeded
    pub succeeded: bool,
}

impl GenerationOutcome {
    /// Successful outcome with model output.
    pub fn success(
        text: impl Into<String>,
        model_variant: ModelVariant,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            model_variant,
            model_name: model_name.into(),
            succeeded: true,
        }
    }

    /// Soft-failed outcome carrying a diagnostic message.
    pub fn failure(
        model_variant: ModelVariant,
        model_name: impl Into<String>,
        details: impl std::fmt::Display,
    ) -> Self {
        let model_name = model_name.into();
        Self {
            text: format!(
                "Error: Could not get a response from model {}. Details: {}",
                model_name, details
            ),
            model_variant,
            model_name,
            succeeded: false,
        }
    }

    /// Consume the outcome, keeping only the display text.
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Telemetry for one routed call while an experiment is running.
///
/// Never contains the prompt itself, only its fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentLogEntry {
    pub entry_id: Uuid,
    pub caller_id: String,
    pub timestamp: DateTime<Utc>,
    pub prompt_fingerprint: String,
    pub model_variant: ModelVariant,
    pub model_name: String,
    pub response_length: usize,
    pub succeeded: bool,
}

impl ExperimentLogEntry {
    /// Build an entry for `outcome`, stamped now.
    pub fn for_outcome(
        caller_id: impl Into<String>,
        prompt_fingerprint: impl Into<String>,
        outcome: &GenerationOutcome,
    ) -> Self {
        Self {
            entry_id: Uuid::now_v7(),
            caller_id: caller_id.into(),
            timestamp: Utc::now(),
            prompt_fingerprint: prompt_fingerprint.into(),
            model_variant: outcome.model_variant,
            model_name: outcome.model_name.clone(),
            response_length: outcome.text.chars().count(),
            succeeded: outcome.succeeded,
        }
    }
}

//! Configuration for model routing and A/B experimentation.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::types::generation::ModelVariant;

/// Default identifier for variant A.
pub const DEFAULT_MODEL_A: &str = "gemini-1.5-flash-latest";

/// Default identifier for variant B.
pub const DEFAULT_MODEL_B: &str = "gemini-1.5-pro-latest";

/// Configuration for the traffic-split experiment between two model variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Route a share of traffic to variant B and log every call.
    ///
    /// When false, variant A answers every request and nothing is logged.
    pub enabled: bool,

    /// Model identifier for variant A (the control).
    pub model_a: String,

    /// Model identifier for variant B (the candidate).
    pub model_b: String,

    /// Percentage of calls (0 to 100) routed to variant B when enabled.
    pub model_b_traffic_percentage: u8,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            model_a: DEFAULT_MODEL_A.to_string(),
            model_b: DEFAULT_MODEL_B.to_string(),
            model_b_traffic_percentage: 0,
        }
    }
}

impl ExperimentConfig {
    /// Create a config with experimentation disabled.
    pub fn new(model_a: impl Into<String>, model_b: impl Into<String>) -> Self {
        Self {
            model_a: model_a.into(),
            model_b: model_b.into(),
            ..Default::default()
        }
    }

    /// Enable experimentation with the given share of traffic for variant B.
    ///
    /// Fails if `percentage` is above 100.
    pub fn with_experiment(mut self, percentage: u8) -> Result<Self> {
        self.enabled = true;
        self.model_b_traffic_percentage = percentage;
        self.validate()?;
        Ok(self)
    }

    /// Check invariants that the type system does not enforce.
    pub fn validate(&self) -> Result<()> {
        if self.model_b_traffic_percentage > 100 {
            return Err(AnalysisError::Config(format!(
                "model B traffic percentage must be between 0 and 100, got {}",
                self.model_b_traffic_percentage
            )));
        }
        if self.model_a.trim().is_empty() || self.model_b.trim().is_empty() {
            return Err(AnalysisError::Config(
                "model variant identifiers cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Model identifier configured for `variant`.
    pub fn model_name(&self, variant: ModelVariant) -> &str {
        match variant {
            ModelVariant::A => &self.model_a,
            ModelVariant::B => &self.model_b,
        }
    }
}

//! Experiment log that emits entries as structured tracing events.
//!
//! Pair with a subscriber that ships the `experiment` target to a log
//! pipeline for offline A/B analysis.

use async_trait::async_trait;
use tracing::info;

use crate::error::Result;
use crate::traits::experiment_log::ExperimentLog;
use crate::types::generation::ExperimentLogEntry;

/// Emits each entry as an `info` event under the `experiment` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingExperimentLog;

impl TracingExperimentLog {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ExperimentLog for TracingExperimentLog {
    async fn append(&self, entry: &ExperimentLogEntry) -> Result<()> {
        info!(
            target: "experiment",
            entry_id = %entry.entry_id,
            caller_id = %entry.caller_id,
            timestamp = %entry.timestamp.to_rfc3339(),
            prompt_fingerprint = %entry.prompt_fingerprint,
            model_variant = %entry.model_variant,
            model_name = %entry.model_name,
            response_length = entry.response_length,
            succeeded = entry.succeeded,
            "A/B test event"
        );
        Ok(())
    }
}

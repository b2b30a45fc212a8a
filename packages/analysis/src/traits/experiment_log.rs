//! Append-only experiment telemetry store.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::generation::ExperimentLogEntry;

/// Write-only sink for A/B experiment events.
///
/// The core never reads entries back. Callers ignore append failures, so
/// implementations should report errors rather than retry internally.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExperimentLog: Send + Sync {
    async fn append(&self, entry: &ExperimentLogEntry) -> Result<()>;
}

//! In-memory experiment log for testing and development.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::error::Result;
use crate::traits::experiment_log::ExperimentLog;
use crate::types::generation::ExperimentLogEntry;

/// In-memory, append-only experiment log.
///
/// Useful for testing and development. Not suitable for production
/// as data is lost on restart.
#[derive(Default)]
pub struct MemoryExperimentLog {
    entries: RwLock<Vec<ExperimentLogEntry>>,
}

impl MemoryExperimentLog {
    /// Create a new empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all appended entries, in append order.
    pub fn entries(&self) -> Vec<ExperimentLogEntry> {
        self.entries.read().unwrap().clone()
    }

    /// Get the number of appended entries.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ExperimentLog for MemoryExperimentLog {
    async fn append(&self, entry: &ExperimentLogEntry) -> Result<()> {
        self.entries.write().unwrap().push(entry.clone());
        Ok(())
    }
}

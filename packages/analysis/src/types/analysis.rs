//! Document analysis and chat result types.

use serde::{Deserialize, Serialize};

use crate::types::entity::Entity;

/// Clause type used when the model's clause JSON cannot be parsed.
pub const PARSING_ERROR_CLAUSE: &str = "Parsing Error";

/// Clause type used when generation failed and no JSON was recovered.
pub const GENERATION_ERROR_CLAUSE: &str = "Generation Error";

/// A clause the model identified in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseRecord {
    pub clause_type: String,
    pub clause_text: String,
}

impl ClauseRecord {
    pub fn new(clause_type: impl Into<String>, clause_text: impl Into<String>) -> Self {
        Self {
            clause_type: clause_type.into(),
            clause_text: clause_text.into(),
        }
    }

    /// Sentinel for clause JSON that failed to parse; keeps the raw response.
    pub fn parsing_error(raw: &str) -> Self {
        Self::new(PARSING_ERROR_CLAUSE, format!("Invalid JSON. Raw: {}", raw))
    }

    /// Sentinel for a clause call whose generation soft-failed.
    pub fn generation_error(diagnostic: &str) -> Self {
        Self::new(GENERATION_ERROR_CLAUSE, diagnostic)
    }

    pub fn is_sentinel(&self) -> bool {
        self.clause_type == PARSING_ERROR_CLAUSE || self.clause_type == GENERATION_ERROR_CLAUSE
    }
}

/// Sub-tasks of document analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisTask {
    Summary,
    Clauses,
    Answer,
}

/// Assembled result of document analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    /// Free-text summary (or soft-fail diagnostic)
    pub summary: String,

    /// Clauses recovered from the model's JSON
    pub clauses: Vec<ClauseRecord>,

    /// Unique entities from the statistical and pattern passes
    pub entities: Vec<Entity>,

    /// Present if and only if a question was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,

    /// Sub-tasks whose generation call soft-failed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degraded: Vec<AnalysisTask>,
}

impl DocumentAnalysis {
    /// Whether every generation call succeeded.
    pub fn is_complete(&self) -> bool {
        self.degraded.is_empty()
    }
}

/// Response to a chat prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

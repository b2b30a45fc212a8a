//! Typed errors for the analysis library.
//!
//! Uses `thiserror` for library errors (not `anyhow`). Most failures inside
//! the pipeline never surface as errors: generation failures become soft-fail
//! outcomes and parse failures become fallback values. These variants cover
//! the collaborator seams and the few conditions callers must reject.

use thiserror::Error;

/// Errors that can occur in analysis operations and their collaborators.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Text-generation engine call failed
    #[error("generation error: {0}")]
    Generation(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Statistical entity recognizer failed
    #[error("entity recognizer error: {0}")]
    Recognizer(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Experiment log append failed
    #[error("experiment log error: {0}")]
    Log(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Required input was empty
    #[error("{field} cannot be empty")]
    EmptyInput { field: &'static str },

    /// Invalid configuration
    #[error("config error: {0}")]
    Config(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

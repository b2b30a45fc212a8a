//! Legal Document Analysis Core
//!
//! Orchestrates LLM calls for legal document analysis: summaries, clause
//! extraction, entity recognition, question answering, event timelines and
//! free-form chat.
//!
//! # Design Philosophy
//!
//! **"Always return something"**
//!
//! - Generation failures are data, not errors (soft-fail outcomes)
//! - Structured output is recovered from free-form text, then validated per call site
//! - Raw model text is kept next to every parse failure for auditing
//! - Collaborators (engine, recognizer, log store) are injected, never global
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use analysis::{AnalysisPipeline, ExperimentConfig, ModelRouter, MemoryExperimentLog};
//! use analysis::testing::{MockGenerator, MockRecognizer};
//!
//! let router = ModelRouter::new(
//!     Arc::new(MockGenerator::new()),
//!     Arc::new(MemoryExperimentLog::new()),
//!     ExperimentConfig::default(),
//! )?;
//! let pipeline = AnalysisPipeline::new(router, Arc::new(MockRecognizer::new()));
//!
//! let analysis = pipeline.analyze_document(text, Some("Who are the parties?"), "user-1").await?;
//! let timeline = pipeline.timeline(text, "user-1").await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Collaborator abstractions (TextGenerator, EntityRecognizer, ExperimentLog)
//! - [`types`] - Request-scoped value types
//! - [`pipeline`] - Router, extractor, entity merge and the analysis pipeline
//! - [`stores`] - Experiment log sinks
//! - [`recognizers`] - Statistical recognizer clients
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod pipeline;
pub mod recognizers;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "gemini")]
pub mod ai;

// Re-export core types at crate root
pub use error::{AnalysisError, Result};
pub use traits::{
    experiment_log::ExperimentLog,
    generator::TextGenerator,
    recognizer::{EntityRecognizer, RecognizedSpan},
};
pub use types::{
    analysis::{AnalysisTask, ChatReply, ClauseRecord, DocumentAnalysis},
    config::ExperimentConfig,
    entity::{Entity, EntityCategory},
    generation::{ExperimentLogEntry, GenerationOutcome, GenerationRequest, ModelVariant},
    timeline::{TimelineEvent, TimelineFailure, TimelineResult},
};

pub use pipeline::{
    extract_json, merge_entities, parse_clauses, parse_timeline, prompt_fingerprint,
    AnalysisPipeline, ModelRouter, SeededDraw, ThreadRngDraw, TrafficDraw,
};

pub use recognizers::{HttpEntityRecognizer, NoopRecognizer};
pub use stores::{MemoryExperimentLog, TracingExperimentLog};

#[cfg(feature = "gemini")]
pub use ai::GeminiClient;

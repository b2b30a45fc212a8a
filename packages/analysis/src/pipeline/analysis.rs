//! The AnalysisPipeline - main entry point for document analysis.
//!
//! Composes the router, the JSON extractor and the entity merge into the
//! user-facing operations. Generation failures never abort an operation;
//! only empty required input is rejected.

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{AnalysisError, Result};
use crate::pipeline::{
    clauses::parse_clauses,
    entities::merge_entities,
    prompts::{
        format_chat_prompt, format_clauses_prompt, format_question_prompt,
        format_summary_prompt, format_timeline_prompt,
    },
    router::ModelRouter,
    timeline::parse_timeline,
};
use crate::traits::recognizer::EntityRecognizer;
use crate::types::{
    analysis::{AnalysisTask, ChatReply, ClauseRecord, DocumentAnalysis},
    entity::Entity,
    generation::GenerationOutcome,
    timeline::TimelineResult,
};

/// Document analysis, chat and timeline operations over a [`ModelRouter`].
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = AnalysisPipeline::new(router, recognizer);
///
/// let analysis = pipeline.analyze_document(text, None, "user-1").await?;
/// assert!(analysis.answer.is_none());
/// ```
#[derive(Clone)]
pub struct AnalysisPipeline {
    router: ModelRouter,
    recognizer: Arc<dyn EntityRecognizer>,
}

impl AnalysisPipeline {
    /// Create a new pipeline.
    pub fn new(router: ModelRouter, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self { router, recognizer }
    }

    /// Get a reference to the router.
    pub fn router(&self) -> &ModelRouter {
        &self.router
    }

    /// Summary, clauses, entities and (if asked) an answer for one document.
    ///
    /// The sub-tasks run concurrently and independently; a failed generation
    /// shows up in its own field and in `degraded`, never in its siblings.
    /// Only an empty question counts as no question.
    pub async fn analyze_document(
        &self,
        text: &str,
        question: Option<&str>,
        caller_id: &str,
    ) -> Result<DocumentAnalysis> {
        require_non_empty(text, "document text")?;
        let question = question.filter(|q| !q.is_empty());

        info!(
            caller_id = %caller_id,
            text_len = text.len(),
            has_question = question.is_some(),
            "Analyzing document"
        );

        let summary_prompt = format_summary_prompt(text);
        let answer_task = async {
            match question {
                Some(q) => Some(self.router.route(&format_question_prompt(q, text), caller_id).await),
                None => None,
            }
        };

        let (summary, (clauses, clauses_outcome), entities, answer) = tokio::join!(
            self.router.route(&summary_prompt, caller_id),
            self.extract_clauses(text, caller_id),
            self.extract_entities(text),
            answer_task,
        );

        let mut degraded = Vec::new();
        if !summary.succeeded {
            degraded.push(AnalysisTask::Summary);
        }
        if !clauses_outcome.succeeded {
            degraded.push(AnalysisTask::Clauses);
        }
        if answer.as_ref().is_some_and(|a| !a.succeeded) {
            degraded.push(AnalysisTask::Answer);
        }
        if !degraded.is_empty() {
            warn!(caller_id = %caller_id, degraded = ?degraded, "Analysis returned partial results");
        }

        Ok(DocumentAnalysis {
            summary: summary.into_text(),
            clauses,
            entities,
            answer: answer.map(GenerationOutcome::into_text),
            degraded,
        })
    }

    /// Answer a general legal question.
    pub async fn chat(&self, prompt: &str, caller_id: &str) -> Result<ChatReply> {
        require_non_empty(prompt, "prompt")?;
        info!(caller_id = %caller_id, "Chat request");

        let outcome = self.router.route(&format_chat_prompt(prompt), caller_id).await;
        Ok(ChatReply {
            response: outcome.into_text(),
        })
    }

    /// Extract a summary and chronological events from a document.
    ///
    /// Unusable model output becomes [`TimelineResult::Error`] with the raw
    /// text attached; it is never returned as `Err`.
    pub async fn timeline(&self, text: &str, caller_id: &str) -> Result<TimelineResult> {
        require_non_empty(text, "document text")?;
        info!(caller_id = %caller_id, text_len = text.len(), "Timeline request");

        let outcome = self
            .router
            .route(&format_timeline_prompt(text), caller_id)
            .await;
        Ok(parse_timeline(&outcome.text))
    }

    /// Clause sub-task. Returns the outcome too so callers can see soft-fails.
    async fn extract_clauses(
        &self,
        text: &str,
        caller_id: &str,
    ) -> (Vec<ClauseRecord>, GenerationOutcome) {
        let outcome = self
            .router
            .route(&format_clauses_prompt(text), caller_id)
            .await;
        (parse_clauses(&outcome), outcome)
    }

    /// Entity sub-task. Recognizer failures degrade to the pattern pass only.
    async fn extract_entities(&self, text: &str) -> Vec<Entity> {
        let spans = match self.recognizer.recognize(text).await {
            Ok(spans) => spans,
            Err(e) => {
                warn!(error = %e, "Entity recognizer failed, using pattern matches only");
                Vec::new()
            }
        };
        merge_entities(&spans, text)
    }
}

fn require_non_empty(value: &str, field: &'static str) -> Result<()> {
    if value.is_empty() {
        return Err(AnalysisError::EmptyInput { field });
    }
    Ok(())
}

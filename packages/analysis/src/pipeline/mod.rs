//! Analysis pipeline - the core of the library.
//!
//! The pipeline orchestrates:
//! - Model selection and soft-fail generation (router)
//! - JSON recovery from free-form output (extract)
//! - Clause and timeline validation with fallbacks
//! - Entity merging (statistical + statute pattern)

pub mod analysis;
pub mod clauses;
pub mod entities;
pub mod extract;
pub mod prompts;
pub mod router;
pub mod timeline;

pub use analysis::AnalysisPipeline;
pub use clauses::parse_clauses;
pub use entities::{find_law_references, merge_entities};
pub use extract::extract_json;
pub use prompts::{
    format_chat_prompt, format_clauses_prompt, format_question_prompt, format_summary_prompt,
    format_timeline_prompt, prompt_fingerprint, CHAT_PROMPT, CLAUSES_PROMPT, QUESTION_PROMPT,
    SUMMARY_PROMPT, TIMELINE_PROMPT,
};
pub use router::{ModelRouter, SeededDraw, ThreadRngDraw, TrafficDraw};
pub use timeline::parse_timeline;

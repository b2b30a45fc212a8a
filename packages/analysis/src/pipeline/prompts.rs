//! LLM prompts for document analysis.
//!
//! Structured tasks ask for fenced JSON so the extractor has a
//! high-confidence block to recover.

use sha2::{Digest, Sha256};

/// Prompt for a free-text legal summary.
pub const SUMMARY_PROMPT: &str = r#"Generate a concise, professional legal summary of the following document.
Identify the type of document, the parties involved, their key obligations and rights,
important dates and deadlines, and any notable risks or unusual terms.
Write in plain prose suitable for a lawyer reviewing the file.

Document:
{document}"#;

/// Prompt for clause extraction (JSON array output).
pub const CLAUSES_PROMPT: &str = r#"Analyze the following legal document and extract key clauses. Provide the output as a JSON array where each object has a 'clause_type' and 'clause_text' field. Example:
```json
[
  {"clause_type": "Definitions", "clause_text": "..."}
]
```
Document:
{document}"#;

/// Prompt for document-grounded question answering.
pub const QUESTION_PROMPT: &str = r#"Based *only* on the document below, answer the question. If the document does not contain the answer, say so.
Question: '{question}'
---
{document}"#;

/// Framing for general legal chat.
pub const CHAT_PROMPT: &str = r#"You are an expert legal AI assistant. Answer the following user query based on general legal principles and knowledge. User query: "{prompt}""#;

/// Prompt for timeline extraction (JSON object output).
pub const TIMELINE_PROMPT: &str = r#"From the provided text, perform two tasks:
1. Generate a concise, 1-2 sentence summary of the overall timeline or sequence of events described.
2. Extract a chronological sequence of key events. Each event should include a 'date' (if explicitly mentioned or clearly implied),
   a 'title' (a brief description of the event), and a 'description' (more details about the event).
   If a specific date is not available, use a general time reference (e.g., "early period", "later that year").

Provide the output as a single JSON object with two keys:
- `summary`: A string containing the concise timeline summary.
- `events`: An array of event objects.

Example JSON structure:
```json
{
  "summary": "This document outlines the key developments of [topic] from [start date] to [end date], highlighting major milestones.",
  "events": [
    {
      "date": "YYYY-MM-DD",
      "title": "Brief event title",
      "description": "Detailed description of the event."
    }
  ]
}
```

If no events can be extracted, the 'events' array should be empty `[]`, and the 'summary' should state that no significant timeline could be extracted.

Document Text:
{document}"#;

/// Non-reversible fingerprint of a prompt for telemetry.
///
/// SHA-256 hex digest; the prompt itself is never stored.
pub fn prompt_fingerprint(prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prompt.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Format the summary prompt.
pub fn format_summary_prompt(document: &str) -> String {
    SUMMARY_PROMPT.replace("{document}", document)
}

/// Format the clause extraction prompt.
pub fn format_clauses_prompt(document: &str) -> String {
    CLAUSES_PROMPT.replace("{document}", document)
}

/// Format the question prompt.
///
/// The document is substituted last so placeholder-like text inside a
/// question is never expanded into document content.
pub fn format_question_prompt(question: &str, document: &str) -> String {
    let (head, tail) = QUESTION_PROMPT
        .split_once("{document}")
        .unwrap_or((QUESTION_PROMPT, ""));
    format!("{}{}{}", head.replace("{question}", question), document, tail)
}

/// Format the chat prompt.
pub fn format_chat_prompt(prompt: &str) -> String {
    CHAT_PROMPT.replace("{prompt}", prompt)
}

/// Format the timeline prompt.
pub fn format_timeline_prompt(document: &str) -> String {
    TIMELINE_PROMPT.replace("{document}", document)
}

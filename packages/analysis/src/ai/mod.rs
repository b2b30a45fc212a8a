//! Text-generation engine implementations.
//!
//! Enable with the `gemini` feature.

pub mod gemini;

pub use gemini::GeminiClient;

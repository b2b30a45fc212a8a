//! Text-generation engine trait.

use async_trait::async_trait;

use crate::error::Result;

/// An opaque text-generation engine: prompt in, text out, or failure.
///
/// Implementations wrap a specific provider. The `model` argument is the
/// identifier of the configured variant (e.g. `gemini-1.5-flash-latest`),
/// so one engine instance serves both experiment arms.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt` using `model`.
    async fn generate(&self, prompt: &str, model: &str) -> Result<String>;
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for std::sync::Arc<T> {
    async fn generate(&self, prompt: &str, model: &str) -> Result<String> {
        (**self).generate(prompt, model).await
    }
}

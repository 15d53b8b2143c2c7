pub mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;

use crate::error::SolveError;

/// Anything that turns a prompt into generated text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, SolveError>;
}

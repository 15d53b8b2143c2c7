//! Solver Client: applies the math-expert prompt and forwards it to a
//! [`TextGenerator`]. The answer comes back untouched.

use std::sync::Arc;
use tracing::info;

use crate::ai::{GeminiClient, TextGenerator};
use crate::config::Config;
use crate::error::SolveError;

pub const PROMPT_TEMPLATE: &str = "You are a helpful math expert. Solve or explain this:\n";

pub fn build_prompt(question: &str) -> String {
    format!("{}{}", PROMPT_TEMPLATE, question)
}

#[derive(Clone)]
pub struct Solver {
    generator: Arc<dyn TextGenerator>,
}

impl Solver {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Solver backed by Gemini, configured from `config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(GeminiClient::new(config)))
    }

    /// One outbound call per invocation. No retry, no caching.
    pub async fn solve(&self, question: &str) -> Result<String, SolveError> {
        info!(question_chars = question.chars().count(), "solving");
        let answer = self.generator.generate(&build_prompt(question)).await?;
        info!(answer_chars = answer.chars().count(), "solved");
        Ok(answer)
    }
}

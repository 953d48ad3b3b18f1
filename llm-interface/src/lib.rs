pub mod gemini;
pub mod summary;

pub use gemini::GeminiProvider;
pub use summary::{build_prompt, parse_summary, SentimentSummarizer};

use async_trait::async_trait;
use pulse_core::SummaryError;

/// A hosted model that turns a plain-text prompt into plain text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, SummaryError>;
}

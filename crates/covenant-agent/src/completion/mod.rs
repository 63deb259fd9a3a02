//! Summary providers.
//!
//! - [`ExtractiveSummarizer`]: offline, deterministic, always available.
//! - [`OllamaCompletion`]: local Ollama server, used when configured and reachable.
//! - [`OpenAiCompletion`]: OpenAI-compatible chat API, used when configured and reachable.

pub mod extractive;
pub mod ollama;
pub mod openai;

pub use extractive::ExtractiveSummarizer;
pub use ollama::OllamaCompletion;
pub use openai::OpenAiCompletion;

use std::sync::Arc;

use covenant_core::config::{CompletionConfig, CompletionProviderKind};
use covenant_core::traits::ICompletionProvider;
use tracing::{info, warn};

/// Create the configured summarizer, falling back to the extractive one when
/// the remote backend isn't reachable.
pub fn create_completion_provider(config: &CompletionConfig) -> Arc<dyn ICompletionProvider> {
    let extractive = || Arc::new(ExtractiveSummarizer::new(config.max_summary_sentences));
    match config.provider {
        CompletionProviderKind::Ollama => {
            let provider = OllamaCompletion::new(
                config.model.clone(),
                config.base_url.clone(),
                config.timeout_secs,
            );
            if provider.health_check() {
                info!(provider = "ollama", model = %config.model, "completion provider connected");
                Arc::new(provider)
            } else {
                warn!("Ollama unavailable, falling back to extractive summarizer");
                extractive()
            }
        }
        CompletionProviderKind::OpenAi => {
            let provider = OpenAiCompletion::new(
                config.model.clone(),
                config.base_url.clone(),
                config.api_key.clone(),
                config.timeout_secs,
            );
            if provider.health_check() {
                info!(provider = "openai", model = %config.model, "completion provider connected");
                Arc::new(provider)
            } else {
                warn!("OpenAI unavailable, falling back to extractive summarizer");
                extractive()
            }
        }
        CompletionProviderKind::Extractive => {
            info!(
                provider = "extractive",
                sentences = config.max_summary_sentences,
                "using extractive summarizer"
            );
            extractive()
        }
    }
}

//! Provider registry.
//!
//! Priority order:
//! 1. The configured remote provider (Ollama or OpenAI-compatible), when reachable
//! 2. Hashing (always available)

pub mod hashing;
pub mod ollama_provider;
pub mod openai_provider;

pub use hashing::HashingEmbedder;
pub use ollama_provider::OllamaProvider;
pub use openai_provider::OpenAiEmbedder;

use covenant_core::config::{EmbeddingConfig, EmbeddingProviderKind};
use covenant_core::traits::IEmbeddingProvider;
use tracing::{info, warn};

/// Create the configured provider, falling back to hashing when it isn't reachable.
pub fn create_provider(config: &EmbeddingConfig) -> Box<dyn IEmbeddingProvider> {
    match config.provider {
        EmbeddingProviderKind::Ollama => {
            let provider = OllamaProvider::new(
                config.model.clone(),
                config.dimensions,
                config.base_url.clone(),
            );
            if provider.health_check() {
                info!(provider = "ollama", model = %config.model, "embedding provider connected");
                Box::new(provider)
            } else {
                warn!("Ollama unavailable, falling back to hashing embedder");
                Box::new(HashingEmbedder::new(config.dimensions))
            }
        }
        EmbeddingProviderKind::OpenAi => {
            let provider = OpenAiEmbedder::new(
                config.model.clone(),
                config.dimensions,
                config.base_url.clone(),
                config.api_key.clone(),
            );
            if provider.health_check() {
                info!(provider = "openai", model = %config.model, "embedding provider connected");
                Box::new(provider)
            } else {
                warn!("OpenAI embeddings unavailable, falling back to hashing embedder");
                Box::new(HashingEmbedder::new(config.dimensions))
            }
        }
        EmbeddingProviderKind::Hashing => {
            info!(provider = "hashing", dims = config.dimensions, "using hashing embedder");
            Box::new(HashingEmbedder::new(config.dimensions))
        }
    }
}

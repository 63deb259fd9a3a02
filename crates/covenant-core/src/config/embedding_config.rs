use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Which embedding backend to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProviderKind {
    /// Offline feature-hashing embedder. Always available.
    Hashing,
    /// Local Ollama server.
    Ollama,
    /// OpenAI or any server speaking its `/v1` HTTP API.
    #[serde(rename = "openai")]
    OpenAi,
}

impl FromStr for EmbeddingProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hashing" => Ok(Self::Hashing),
            "ollama" => Ok(Self::Ollama),
            "openai" => Ok(Self::OpenAi),
            other => Err(format!("unknown embedding provider '{other}'")),
        }
    }
}

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProviderKind,
    /// Model name for remote providers.
    pub model: String,
    /// Base URL for remote providers. `None` uses the provider's default.
    pub base_url: Option<String>,
    /// Bearer token for the OpenAI-compatible provider.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Embedding dimensions.
    pub dimensions: usize,
    /// In-memory cache max entries.
    pub cache_size: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderKind::Hashing,
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            base_url: None,
            api_key: None,
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            cache_size: defaults::DEFAULT_EMBEDDING_CACHE_SIZE,
        }
    }
}

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Which summarization backend to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionProviderKind {
    /// Offline extractive summarizer. Always available.
    Extractive,
    /// Local Ollama server.
    Ollama,
    /// OpenAI or any server speaking its `/v1` HTTP API.
    #[serde(rename = "openai")]
    OpenAi,
}

impl FromStr for CompletionProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "extractive" => Ok(Self::Extractive),
            "ollama" => Ok(Self::Ollama),
            "openai" => Ok(Self::OpenAi),
            other => Err(format!("unknown completion provider '{other}'")),
        }
    }
}

/// Completion (summary) provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    pub provider: CompletionProviderKind,
    pub model: String,
    pub base_url: Option<String>,
    /// Bearer token for the OpenAI-compatible provider.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Sentences kept by the extractive summarizer.
    pub max_summary_sentences: usize,
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            provider: CompletionProviderKind::Extractive,
            model: defaults::DEFAULT_COMPLETION_MODEL.to_string(),
            base_url: None,
            api_key: None,
            max_summary_sentences: defaults::DEFAULT_SUMMARY_SENTENCES,
            timeout_secs: defaults::DEFAULT_COMPLETION_TIMEOUT_SECS,
        }
    }
}

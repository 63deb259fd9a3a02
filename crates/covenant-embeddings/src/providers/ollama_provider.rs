//! Ollama local embedding provider.
//!
//! Talks to `/api/embed` on a local Ollama instance. Unavailable until a
//! health check succeeds.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use covenant_core::config::defaults::DEFAULT_OLLAMA_BASE_URL;
use covenant_core::errors::{CovenantResult, EmbeddingError};
use covenant_core::traits::IEmbeddingProvider;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const PROVIDER_NAME: &str = "ollama";

/// Ollama embedding provider.
pub struct OllamaProvider {
    base_url: String,
    model: String,
    dimensions: usize,
    available: AtomicBool,
}

#[derive(Serialize)]
struct OllamaEmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct OllamaEmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl OllamaProvider {
    /// `base_url` defaults to `http://localhost:11434` if `None`.
    pub fn new(model: String, dimensions: usize, base_url: Option<String>) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_OLLAMA_BASE_URL.to_string()),
            model,
            dimensions,
            available: AtomicBool::new(false),
        }
    }

    fn runtime(&self) -> CovenantResult<tokio::runtime::Runtime> {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| self.failure(format!("runtime error: {e}")))
    }

    fn failure(&self, reason: String) -> covenant_core::CovenantError {
        EmbeddingError::ProviderFailed {
            provider: PROVIDER_NAME.to_string(),
            reason,
        }
        .into()
    }

    /// Check whether the Ollama server is reachable, updating availability.
    pub fn health_check(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        let Ok(rt) = self.runtime() else {
            return false;
        };

        let result = rt.block_on(async {
            reqwest::Client::new()
                .get(&url)
                .timeout(Duration::from_secs(5))
                .send()
                .await
        });

        let healthy = match result {
            Ok(resp) if resp.status().is_success() => {
                debug!(model = %self.model, "Ollama health check passed");
                true
            }
            Ok(resp) => {
                warn!(status = %resp.status(), "Ollama health check failed");
                false
            }
            Err(e) => {
                warn!(error = %e, "Ollama unreachable");
                false
            }
        };
        self.available.store(healthy, Ordering::Relaxed);
        healthy
    }

    fn request_embeddings(&self, texts: &[String]) -> CovenantResult<Vec<Vec<f32>>> {
        if !self.is_available() {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: PROVIDER_NAME.to_string(),
            }
            .into());
        }

        let url = format!("{}/api/embed", self.base_url);
        let request = OllamaEmbedRequest {
            model: &self.model,
            input: texts,
        };

        let rt = self.runtime()?;
        let response: OllamaEmbedResponse = rt.block_on(async {
            let response = reqwest::Client::new()
                .post(&url)
                .json(&request)
                .send()
                .await
                .map_err(|e| self.failure(format!("HTTP error: {e}")))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(self.failure(format!("returned {status}: {body}")));
            }

            response
                .json()
                .await
                .map_err(|e| self.failure(format!("JSON parse error: {e}")))
        })?;

        if response.embeddings.len() != texts.len() {
            return Err(self.failure(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                response.embeddings.len()
            )));
        }
        Ok(response.embeddings)
    }
}

impl IEmbeddingProvider for OllamaProvider {
    fn embed(&self, text: &str) -> CovenantResult<Vec<f32>> {
        let input = [text.to_string()];
        let mut results = self.request_embeddings(&input)?;
        results
            .pop()
            .ok_or_else(|| self.failure("empty response".to_string()))
    }

    fn embed_batch(&self, texts: &[String]) -> CovenantResult<Vec<Vec<f32>>> {
        self.request_embeddings(texts)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_until_health_check() {
        let p = OllamaProvider::new("nomic-embed-text".into(), 768, None);
        assert!(!p.is_available());
        assert_eq!(p.dimensions(), 768);
    }

    #[test]
    fn embed_without_health_check_reports_unavailable() {
        let p = OllamaProvider::new("nomic-embed-text".into(), 768, None);
        let err = p.embed("text").unwrap_err();
        assert!(err.to_string().contains("unavailable"));
    }
}

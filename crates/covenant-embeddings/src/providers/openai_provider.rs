//! OpenAI-compatible embedding provider.
//!
//! Posts to `{base_url}/embeddings` with bearer auth; `base_url` includes the
//! `/v1` segment so self-hosted servers speaking the same API work unchanged.
//! Unavailable until a health check against `{base_url}/models` succeeds.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use covenant_core::config::defaults::DEFAULT_OPENAI_BASE_URL;
use covenant_core::errors::{CovenantResult, EmbeddingError};
use covenant_core::traits::IEmbeddingProvider;
use covenant_core::CovenantError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const PROVIDER_NAME: &str = "openai";

/// OpenAI `/v1/embeddings` provider.
pub struct OpenAiEmbedder {
    base_url: String,
    api_key: Option<String>,
    model: String,
    dimensions: usize,
    available: AtomicBool,
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

impl OpenAiEmbedder {
    /// `base_url` defaults to `https://api.openai.com/v1` if `None`.
    pub fn new(
        model: String,
        dimensions: usize,
        base_url: Option<String>,
        api_key: Option<String>,
    ) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
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

    fn failure(&self, reason: String) -> CovenantError {
        EmbeddingError::ProviderFailed {
            provider: PROVIDER_NAME.to_string(),
            reason,
        }
        .into()
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key.trim()),
            None => request,
        }
    }

    /// Check that the API answers with the configured key, updating availability.
    /// Without a key nothing is sent and the provider stays unavailable.
    pub fn health_check(&self) -> bool {
        if self.api_key.is_none() {
            warn!("OpenAI embedding provider has no API key");
            self.available.store(false, Ordering::Relaxed);
            return false;
        }
        let url = format!("{}/models", self.base_url);
        let Ok(rt) = self.runtime() else {
            return false;
        };

        let result = rt.block_on(async {
            self.authorized(reqwest::Client::new().get(&url))
                .timeout(Duration::from_secs(5))
                .send()
                .await
        });

        let healthy = match result {
            Ok(resp) if resp.status().is_success() => {
                debug!(model = %self.model, "OpenAI embedding health check passed");
                true
            }
            Ok(resp) => {
                warn!(status = %resp.status(), "OpenAI embedding health check failed");
                false
            }
            Err(e) => {
                warn!(error = %e, "OpenAI endpoint unreachable");
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

        let url = format!("{}/embeddings", self.base_url);
        let request = EmbeddingsRequest {
            model: &self.model,
            input: texts,
        };

        let rt = self.runtime()?;
        let response: EmbeddingsResponse = rt.block_on(async {
            let response = self
                .authorized(reqwest::Client::new().post(&url))
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

        self.ordered(response, texts.len())
    }

    /// Embeddings in input order; the API tags each one with its input index.
    fn ordered(&self, response: EmbeddingsResponse, expected: usize) -> CovenantResult<Vec<Vec<f32>>> {
        let mut data = response.data;
        if data.len() != expected {
            return Err(self.failure(format!(
                "expected {expected} embeddings, got {}",
                data.len()
            )));
        }
        data.sort_by_key(|d| d.index);
        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}

impl IEmbeddingProvider for OpenAiEmbedder {
    fn embed(&self, text: &str) -> CovenantResult<Vec<f32>> {
        let input = [text.to_string()];
        let mut results = self.request_embeddings(&input)?;
        results
            .pop()
            .ok_or_else(|| self.failure("empty response".to_string()))
    }

    fn embed_batch(&self, texts: &[String]) -> CovenantResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
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

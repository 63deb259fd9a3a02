//! Ollama completion provider.
//!
//! Calls `/api/generate` with streaming disabled. Unavailable until a health
//! check succeeds.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use covenant_core::config::defaults::DEFAULT_OLLAMA_BASE_URL;
use covenant_core::errors::{CompletionError, CovenantResult};
use covenant_core::traits::ICompletionProvider;
use covenant_core::CovenantError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const PROVIDER_NAME: &str = "ollama";

pub struct OllamaCompletion {
    base_url: String,
    model: String,
    timeout: Duration,
    available: AtomicBool,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaCompletion {
    /// `base_url` defaults to `http://localhost:11434` if `None`.
    pub fn new(model: String, base_url: Option<String>, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_OLLAMA_BASE_URL.to_string()),
            model,
            timeout: Duration::from_secs(timeout_secs.max(1)),
            available: AtomicBool::new(false),
        }
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }

    fn runtime(&self) -> CovenantResult<tokio::runtime::Runtime> {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| self.failure(format!("runtime error: {e}")))
    }

    fn failure(&self, reason: String) -> CovenantError {
        CompletionError::ProviderFailed {
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
                debug!(model = %self.model, "Ollama completion health check passed");
                true
            }
            Ok(resp) => {
                warn!(status = %resp.status(), "Ollama completion health check failed");
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
}

pub(crate) fn build_prompt(text: &str, context: &str) -> String {
    let mut prompt = String::from(
        "Summarize the following contract in a few sentences. \
         Name the parties, the subject matter and the main obligations.\n\n",
    );
    if !context.trim().is_empty() {
        prompt.push_str("Reference material:\n");
        prompt.push_str(context.trim());
        prompt.push_str("\n\n");
    }
    prompt.push_str("Contract:\n");
    prompt.push_str(text);
    prompt
}

impl ICompletionProvider for OllamaCompletion {
    fn complete_summary(&self, text: &str, context: &str) -> CovenantResult<String> {
        if !self.is_available() {
            return Err(CompletionError::ProviderUnavailable {
                provider: PROVIDER_NAME.to_string(),
            }
            .into());
        }

        let url = format!("{}/api/generate", self.base_url);
        let prompt = build_prompt(text, context);
        let request = GenerateRequest {
            model: &self.model,
            prompt: &prompt,
            stream: false,
        };

        let rt = self.runtime()?;
        let response: GenerateResponse = rt.block_on(async {
            let response = reqwest::Client::new()
                .post(&url)
                .timeout(self.timeout)
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

        Ok(response.response.trim().to_string())
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }
}

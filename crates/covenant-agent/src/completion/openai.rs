//! OpenAI-compatible completion provider.
//!
//! Calls `{base_url}/chat/completions` with bearer auth. `base_url` includes
//! the `/v1` segment. Unavailable until a health check succeeds.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use covenant_core::config::defaults::DEFAULT_OPENAI_BASE_URL;
use covenant_core::errors::{CompletionError, CovenantResult};
use covenant_core::traits::ICompletionProvider;
use covenant_core::CovenantError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::ollama::build_prompt;

const PROVIDER_NAME: &str = "openai";
const SYSTEM_PROMPT: &str = "You are a contract review assistant. Answer with a plain-text summary.";

pub struct OpenAiCompletion {
    base_url: String,
    api_key: Option<String>,
    model: String,
    timeout: Duration,
    available: AtomicBool,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiCompletion {
    /// `base_url` defaults to `https://api.openai.com/v1` if `None`.
    pub fn new(
        model: String,
        base_url: Option<String>,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
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

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key.trim()),
            None => request,
        }
    }

    /// Check that `{base_url}/models` answers with the configured key,
    /// updating availability. Without a key nothing is sent.
    pub fn health_check(&self) -> bool {
        if self.api_key.is_none() {
            warn!("OpenAI completion provider has no API key");
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
                debug!(model = %self.model, "OpenAI completion health check passed");
                true
            }
            Ok(resp) => {
                warn!(status = %resp.status(), "OpenAI completion health check failed");
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

    fn first_reply(&self, response: ChatResponse) -> CovenantResult<String> {
        response
            .choices
            .into_iter()
            .find_map(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| self.failure("response carried no message content".to_string()))
    }
}

impl ICompletionProvider for OpenAiCompletion {
    fn complete_summary(&self, text: &str, context: &str) -> CovenantResult<String> {
        if !self.is_available() {
            return Err(CompletionError::ProviderUnavailable {
                provider: PROVIDER_NAME.to_string(),
            }
            .into());
        }

        let url = format!("{}/chat/completions", self.base_url);
        let prompt = build_prompt(text, context);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
        };

        let rt = self.runtime()?;
        let response: ChatResponse = rt.block_on(async {
            let response = self
                .authorized(reqwest::Client::new().post(&url))
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

        self.first_reply(response)
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }
}

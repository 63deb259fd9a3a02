//! Top-level Covenant configuration with layered resolution.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{
    CompletionConfig, EmbeddingConfig, ObservabilityConfig, PipelineConfig, RetrievalConfig,
    RulesConfig, ScoringConfig,
};
use crate::constants::{CONFIG_FILENAME, ENV_PREFIX, OPENAI_API_KEY_VAR};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`COVENANT_*`)
/// 2. Project config (`covenant.toml` in the given root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CovenantConfig {
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub pipeline: PipelineConfig,
    pub scoring: ScoringConfig,
    pub completion: CompletionConfig,
    pub observability: ObservabilityConfig,
    pub rules: RulesConfig,
}

impl CovenantConfig {
    /// Load configuration with layered resolution, reading overrides from the
    /// process environment.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        Self::load_with_env(root, |key| std::env::var(key).ok())
    }

    /// Load configuration with an explicit environment lookup.
    pub fn load_with_env<F>(root: &Path, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = root.join(CONFIG_FILENAME);
        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file. Unknown keys are ignored; missing keys keep defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `COVENANT_*` overrides. Unset variables leave the value untouched.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |suffix: &str| lookup(&format!("{ENV_PREFIX}{suffix}"));

        if let Some(v) = get("EMBEDDING_PROVIDER") {
            self.embedding.provider = parse_env("EMBEDDING_PROVIDER", &v)?;
        }
        if let Some(v) = get("EMBEDDING_MODEL") {
            self.embedding.model = v;
        }
        if let Some(v) = get("EMBEDDING_BASE_URL") {
            self.embedding.base_url = Some(v);
        }
        if let Some(v) = get("EMBEDDING_API_KEY").or_else(|| lookup(OPENAI_API_KEY_VAR)) {
            self.embedding.api_key = Some(v);
        }
        if let Some(v) = get("EMBEDDING_DIMENSIONS") {
            self.embedding.dimensions = parse_env("EMBEDDING_DIMENSIONS", &v)?;
        }
        if let Some(v) = get("RETRIEVAL_TOP_K") {
            self.retrieval.top_k = parse_env("RETRIEVAL_TOP_K", &v)?;
        }
        if let Some(v) = get("RETRIEVAL_COMPLIANCE_THRESHOLD") {
            self.retrieval.compliance_threshold = parse_env("RETRIEVAL_COMPLIANCE_THRESHOLD", &v)?;
        }
        if let Some(v) = get("RETRIEVAL_RISK_THRESHOLD") {
            self.retrieval.risk_threshold = parse_env("RETRIEVAL_RISK_THRESHOLD", &v)?;
        }
        if let Some(v) = get("PIPELINE_STAGE_DEADLINE_MS") {
            self.pipeline.stage_deadline_ms = Some(parse_env("PIPELINE_STAGE_DEADLINE_MS", &v)?);
        }
        if let Some(v) = get("COMPLETION_PROVIDER") {
            self.completion.provider = parse_env("COMPLETION_PROVIDER", &v)?;
        }
        if let Some(v) = get("COMPLETION_MODEL") {
            self.completion.model = v;
        }
        if let Some(v) = get("COMPLETION_BASE_URL") {
            self.completion.base_url = Some(v);
        }
        if let Some(v) = get("COMPLETION_API_KEY").or_else(|| lookup(OPENAI_API_KEY_VAR)) {
            self.completion.api_key = Some(v);
        }
        if let Some(v) = get("LOG_LEVEL") {
            self.observability.log_level = v;
        }
        if let Some(v) = get("RULES_PATH") {
            self.rules.path = Some(v);
        }
        Ok(())
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.embedding.dimensions == 0 {
            return Err(invalid("embedding.dimensions", "must be greater than 0"));
        }
        if self.retrieval.top_k == 0 {
            return Err(invalid("retrieval.top_k", "must be at least 1"));
        }
        if !self.retrieval.compliance_threshold.is_finite() {
            return Err(invalid("retrieval.compliance_threshold", "must be finite"));
        }
        if !self.retrieval.risk_threshold.is_finite() {
            return Err(invalid("retrieval.risk_threshold", "must be finite"));
        }
        if self.retrieval.chunk_size == 0 {
            return Err(invalid("retrieval.chunk_size", "must be greater than 0"));
        }
        if self.retrieval.chunk_overlap >= self.retrieval.chunk_size {
            return Err(invalid(
                "retrieval.chunk_overlap",
                "must be smaller than retrieval.chunk_size",
            ));
        }
        if self.pipeline.parse_chunk_size == 0 {
            return Err(invalid("pipeline.parse_chunk_size", "must be greater than 0"));
        }
        if self.pipeline.parse_chunk_overlap >= self.pipeline.parse_chunk_size {
            return Err(invalid(
                "pipeline.parse_chunk_overlap",
                "must be smaller than pipeline.parse_chunk_size",
            ));
        }
        if self.pipeline.stage_deadline_ms == Some(0) {
            return Err(invalid("pipeline.stage_deadline_ms", "must be greater than 0"));
        }
        let scoring = &self.scoring;
        if scoring.min_score == 0 || scoring.min_score > scoring.base_score {
            return Err(invalid(
                "scoring.min_score",
                "must be between 1 and scoring.base_score",
            ));
        }
        if scoring.max_penalty > scoring.base_score {
            return Err(invalid(
                "scoring.max_penalty",
                "must not exceed scoring.base_score",
            ));
        }
        if self.completion.max_summary_sentences == 0 {
            return Err(invalid(
                "completion.max_summary_sentences",
                "must be at least 1",
            ));
        }
        if self.observability.run_log_capacity == 0 {
            return Err(invalid(
                "observability.run_log_capacity",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn parse_env<T>(suffix: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::ValidationFailed {
        field: format!("{ENV_PREFIX}{suffix}"),
        message: e.to_string(),
    })
}

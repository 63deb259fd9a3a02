//! Error handling for Covenant.
//! One error enum per subsystem, `thiserror` only, aggregated into [`CovenantError`].

mod completion_error;
mod config_error;
mod embedding_error;
mod extraction_error;
mod index_error;
mod pipeline_error;
mod rule_error;

pub use completion_error::CompletionError;
pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use extraction_error::ExtractionError;
pub use index_error::IndexError;
pub use pipeline_error::PipelineError;
pub use rule_error::RuleError;

/// Top-level error for every Covenant operation.
#[derive(Debug, thiserror::Error)]
pub enum CovenantError {
    #[error("index error: {0}")]
    IndexError(#[from] IndexError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("completion error: {0}")]
    CompletionError(#[from] CompletionError),

    #[error("extraction error: {0}")]
    ExtractionError(#[from] ExtractionError),

    #[error("pipeline error: {0}")]
    PipelineError(#[from] PipelineError),

    #[error("rule error: {0}")]
    RuleError(#[from] RuleError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("concurrency error: {0}")]
    ConcurrencyError(String),
}

impl CovenantError {
    /// The stage id if this error is a wrapped stage failure.
    pub fn failed_stage(&self) -> Option<&str> {
        match self {
            Self::PipelineError(PipelineError::StageFailed { stage_id, .. })
            | Self::PipelineError(PipelineError::DeadlineExceeded { stage_id, .. }) => {
                Some(stage_id)
            }
            _ => None,
        }
    }
}

/// Convenience alias used across the workspace.
pub type CovenantResult<T> = Result<T, CovenantError>;

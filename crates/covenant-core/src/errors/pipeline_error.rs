use super::CovenantError;

/// Pipeline execution errors.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("stage {stage_id} failed: {cause}")]
    StageFailed {
        stage_id: String,
        #[source]
        cause: Box<CovenantError>,
    },

    #[error("stage {stage_id} exceeded its deadline: {elapsed_ms}ms > {deadline_ms}ms")]
    DeadlineExceeded {
        stage_id: String,
        elapsed_ms: u64,
        deadline_ms: u64,
    },
}

impl PipelineError {
    /// Wrap a stage's error, identifying the stage.
    pub fn stage_failed(stage_id: impl Into<String>, cause: CovenantError) -> Self {
        Self::StageFailed {
            stage_id: stage_id.into(),
            cause: Box::new(cause),
        }
    }
}

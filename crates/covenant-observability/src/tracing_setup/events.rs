//! Structured log events for the review lifecycle.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log the start of a pipeline stage.
pub fn stage_started(run_id: &str, stage_id: &str) {
    tracing::debug!(
        event = "stage_started",
        run_id = %run_id,
        stage_id = %stage_id,
        "stage started"
    );
}

/// Log a successfully completed stage.
pub fn stage_completed(run_id: &str, stage_id: &str, duration_ms: u64) {
    tracing::info!(
        event = "stage_completed",
        run_id = %run_id,
        stage_id = %stage_id,
        duration_ms = duration_ms,
        "stage completed"
    );
}

/// Log a failed stage.
pub fn stage_failed(run_id: &str, stage_id: &str, error: &str) {
    tracing::warn!(
        event = "stage_failed",
        run_id = %run_id,
        stage_id = %stage_id,
        error = %error,
        "stage failed"
    );
}

/// Log a stage skipped by configuration.
pub fn stage_skipped(run_id: &str, stage_id: &str) {
    tracing::info!(
        event = "stage_skipped",
        run_id = %run_id,
        stage_id = %stage_id,
        "stage skipped"
    );
}

/// Log the end of a run.
pub fn run_completed(run_id: &str, success: bool, duration_ms: u64, score: Option<u8>) {
    tracing::info!(
        event = "run_completed",
        run_id = %run_id,
        success = success,
        duration_ms = duration_ms,
        score = ?score,
        "review run completed"
    );
}

/// Log a finished batch analysis.
pub fn batch_completed(size: usize, succeeded: usize, duration_ms: u64) {
    tracing::info!(
        event = "batch_completed",
        size = size,
        succeeded = succeeded,
        duration_ms = duration_ms,
        "batch analysis completed"
    );
}

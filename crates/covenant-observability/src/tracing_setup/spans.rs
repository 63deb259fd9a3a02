//! Span definitions per operation: review run, stage, batch.

/// Create a span covering one review run.
#[macro_export]
macro_rules! review_span {
    ($run_id:expr) => {
        tracing::info_span!("covenant.review", run_id = %$run_id)
    };
}

/// Create a span covering one pipeline stage.
#[macro_export]
macro_rules! stage_span {
    ($run_id:expr, $stage_id:expr) => {
        tracing::info_span!("covenant.stage", run_id = %$run_id, stage_id = %$stage_id)
    };
}

/// Create a span covering a batch of analyses.
#[macro_export]
macro_rules! batch_span {
    ($size:expr) => {
        tracing::info_span!("covenant.batch", size = $size)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const REVIEW: &str = "covenant.review";
    pub const STAGE: &str = "covenant.stage";
    pub const BATCH: &str = "covenant.batch";
}

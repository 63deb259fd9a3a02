use serde::{Deserialize, Serialize};

use super::defaults;

/// Pipeline execution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Characters of contract text handed to the summarizer.
    pub summary_input_chars: usize,
    /// Optional per-stage deadline. Checked after each stage returns.
    pub stage_deadline_ms: Option<u64>,
    /// Stage ids recorded as skipped instead of executed.
    pub disabled_stages: Vec<String>,
    /// Chunk size used by the parse stage to report document chunking.
    pub parse_chunk_size: usize,
    pub parse_chunk_overlap: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            summary_input_chars: defaults::DEFAULT_SUMMARY_INPUT_CHARS,
            stage_deadline_ms: None,
            disabled_stages: Vec::new(),
            parse_chunk_size: defaults::DEFAULT_PARSE_CHUNK_SIZE,
            parse_chunk_overlap: defaults::DEFAULT_PARSE_CHUNK_OVERLAP,
        }
    }
}

use serde::{Deserialize, Serialize};

use super::defaults;

/// Knowledge retrieval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Number of nearest neighbours fetched before category filtering.
    pub top_k: usize,
    /// Minimum score (exclusive) for compliance guidance.
    pub compliance_threshold: f32,
    /// Minimum score (exclusive) for risk guidance.
    pub risk_threshold: f32,
    /// Marker prepended to every compliance guidance string.
    pub guidance_prefix: String,
    /// Max characters per knowledge chunk.
    pub chunk_size: usize,
    /// Characters shared by consecutive knowledge chunks.
    pub chunk_overlap: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: defaults::DEFAULT_TOP_K,
            compliance_threshold: defaults::DEFAULT_COMPLIANCE_THRESHOLD,
            risk_threshold: defaults::DEFAULT_RISK_THRESHOLD,
            guidance_prefix: defaults::DEFAULT_GUIDANCE_PREFIX.to_string(),
            chunk_size: defaults::DEFAULT_KNOWLEDGE_CHUNK_SIZE,
            chunk_overlap: defaults::DEFAULT_KNOWLEDGE_CHUNK_OVERLAP,
        }
    }
}

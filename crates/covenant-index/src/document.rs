use covenant_core::models::Metadata;
use serde::{Deserialize, Serialize};

/// One stored chunk. Immutable once inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedDocument {
    pub id: String,
    pub text_chunk: String,
    pub embedding: Vec<f32>,
    pub metadata: Metadata,
}

impl EmbeddedDocument {
    /// Inner product with `query`. Callers guarantee equal lengths.
    pub fn score(&self, query: &[f32]) -> f32 {
        self.embedding
            .iter()
            .zip(query)
            .map(|(a, b)| a * b)
            .sum()
    }
}

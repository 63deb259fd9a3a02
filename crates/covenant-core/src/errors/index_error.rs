/// Vector index errors.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("embedding must have at least one dimension")]
    EmptyEmbedding,

    #[error("batch length mismatch: {chunks} chunks, {embeddings} embeddings, {metadatas} metadata maps")]
    LengthMismatch {
        chunks: usize,
        embeddings: usize,
        metadatas: usize,
    },

    #[error("corrupt snapshot: {reason}")]
    CorruptSnapshot { reason: String },
}

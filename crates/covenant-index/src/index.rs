//! VectorIndex — exact top-k inner-product search.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use covenant_core::errors::{CovenantError, CovenantResult, IndexError};
use covenant_core::models::{Metadata, SearchResult};
use tracing::{debug, info};

use crate::document::EmbeddedDocument;
use crate::snapshot::{self, IndexContents};

/// Thread-safe in-memory vector index.
///
/// The embedding dimension is fixed by the first document added. Documents
/// are never updated or removed; `restore` replaces the whole collection.
#[derive(Debug, Default)]
pub struct VectorIndex {
    inner: RwLock<IndexContents>,
}

impl VectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a batch of chunks. Returns the generated ids in input order.
    ///
    /// The whole batch is validated before anything is inserted: on error the
    /// index is unchanged.
    pub fn add(
        &self,
        chunks: Vec<String>,
        embeddings: Vec<Vec<f32>>,
        metadatas: Vec<Metadata>,
    ) -> CovenantResult<Vec<String>> {
        if chunks.len() != embeddings.len() || chunks.len() != metadatas.len() {
            return Err(IndexError::LengthMismatch {
                chunks: chunks.len(),
                embeddings: embeddings.len(),
                metadatas: metadatas.len(),
            }
            .into());
        }

        let mut inner = self.write()?;
        let dimension = match inner.dimension.or_else(|| embeddings.first().map(Vec::len)) {
            Some(dim) => dim,
            None => return Ok(Vec::new()),
        };
        for embedding in &embeddings {
            if embedding.is_empty() {
                return Err(IndexError::EmptyEmbedding.into());
            }
            if embedding.len() != dimension {
                return Err(IndexError::DimensionMismatch {
                    expected: dimension,
                    actual: embedding.len(),
                }
                .into());
            }
        }

        inner.dimension = Some(dimension);
        let mut ids = Vec::with_capacity(chunks.len());
        for ((text_chunk, embedding), metadata) in chunks.into_iter().zip(embeddings).zip(metadatas) {
            let id = uuid::Uuid::new_v4().to_string();
            ids.push(id.clone());
            inner.documents.push(EmbeddedDocument {
                id,
                text_chunk,
                embedding,
                metadata,
            });
        }
        debug!(added = ids.len(), total = inner.documents.len(), "documents indexed");
        Ok(ids)
    }

    /// Top-`k` documents by descending inner product with `query`.
    ///
    /// Equal scores keep insertion order. An empty index or `k == 0` yields no
    /// results.
    pub fn search(&self, query: &[f32], k: usize) -> CovenantResult<Vec<SearchResult>> {
        let inner = self.read()?;
        let Some(dimension) = inner.dimension else {
            return Ok(Vec::new());
        };
        if k == 0 {
            return Ok(Vec::new());
        }
        if query.len() != dimension {
            return Err(IndexError::DimensionMismatch {
                expected: dimension,
                actual: query.len(),
            }
            .into());
        }

        let mut scored: Vec<(usize, f32)> = inner
            .documents
            .iter()
            .enumerate()
            .map(|(i, doc)| (i, doc.score(query)))
            .collect();
        // Stable sort keeps insertion order among equal scores.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(i, score)| {
                let doc = &inner.documents[i];
                SearchResult {
                    content: doc.text_chunk.clone(),
                    metadata: doc.metadata.clone(),
                    score,
                }
            })
            .collect())
    }

    /// Serialize the full index into an opaque byte blob.
    pub fn snapshot(&self) -> CovenantResult<Vec<u8>> {
        let inner = self.read()?;
        snapshot::encode(&inner)
    }

    /// Replace the index contents with a previously taken snapshot.
    ///
    /// The blob is fully decoded and validated before the swap; any failure
    /// is `CorruptSnapshot` and leaves the current contents in place.
    pub fn restore(&self, bytes: &[u8]) -> CovenantResult<()> {
        let contents = snapshot::decode(bytes)?;
        let documents = contents.documents.len();
        *self.write()? = contents;
        info!(event = "snapshot_restored", documents, "vector index restored");
        Ok(())
    }

    pub fn len(&self) -> CovenantResult<usize> {
        Ok(self.read()?.documents.len())
    }

    pub fn is_empty(&self) -> CovenantResult<bool> {
        Ok(self.read()?.documents.is_empty())
    }

    /// The fixed embedding dimension, once the first document is in.
    pub fn dimension(&self) -> CovenantResult<Option<usize>> {
        Ok(self.read()?.dimension)
    }

    fn read(&self) -> CovenantResult<RwLockReadGuard<'_, IndexContents>> {
        self.inner
            .read()
            .map_err(|e| CovenantError::ConcurrencyError(format!("index lock poisoned: {e}")))
    }

    fn write(&self) -> CovenantResult<RwLockWriteGuard<'_, IndexContents>> {
        self.inner
            .write()
            .map_err(|e| CovenantError::ConcurrencyError(format!("index lock poisoned: {e}")))
    }
}

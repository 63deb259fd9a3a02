//! KnowledgeStore — embedded legal knowledge with category-filtered search.

use std::sync::Arc;

use covenant_core::config::RetrievalConfig;
use covenant_core::errors::CovenantResult;
use covenant_core::models::{KnowledgeCategory, KnowledgeEntry, RiskGuidance, SearchResult};
use covenant_core::traits::IEmbeddingProvider;
use covenant_index::VectorIndex;
use tracing::{debug, info};

use crate::corpus::legal_corpus;
use crate::splitter::TextSplitter;

/// Vector-backed knowledge store.
///
/// Built once per process and shared by `Arc`. Every method takes `&self`;
/// the underlying index serialises insertions against searches.
pub struct KnowledgeStore {
    index: VectorIndex,
    embedder: Arc<dyn IEmbeddingProvider>,
    splitter: TextSplitter,
    config: RetrievalConfig,
}

impl KnowledgeStore {
    /// A store seeded with the built-in legal corpus.
    pub fn new(embedder: Arc<dyn IEmbeddingProvider>, config: RetrievalConfig) -> CovenantResult<Self> {
        Self::with_entries(embedder, config, &legal_corpus())
    }

    /// A store seeded with `entries` instead of the built-in corpus.
    pub fn with_entries(
        embedder: Arc<dyn IEmbeddingProvider>,
        config: RetrievalConfig,
        entries: &[KnowledgeEntry],
    ) -> CovenantResult<Self> {
        let store = Self {
            index: VectorIndex::new(),
            splitter: TextSplitter::new(config.chunk_size, config.chunk_overlap),
            embedder,
            config,
        };
        let chunks = store.add_entries(entries)?;
        info!(
            event = "knowledge_seeded",
            entries = entries.len(),
            chunks,
            provider = store.embedder.name(),
            "knowledge store seeded"
        );
        Ok(store)
    }

    /// Chunk, embed and index `entries`. Returns the number of chunks added.
    pub fn add_entries(&self, entries: &[KnowledgeEntry]) -> CovenantResult<usize> {
        let mut chunks = Vec::new();
        let mut metadatas = Vec::new();
        for entry in entries {
            let metadata = entry.metadata();
            for chunk in self.splitter.split(&entry.content) {
                chunks.push(chunk);
                metadatas.push(metadata.clone());
            }
        }
        if chunks.is_empty() {
            return Ok(0);
        }

        let embeddings = self.embedder.embed_batch(&chunks)?;
        let ids = self.index.add(chunks, embeddings, metadatas)?;
        debug!(chunks = ids.len(), "knowledge entries indexed");
        Ok(ids.len())
    }

    /// Top-k neighbours of `query`, optionally restricted to one category.
    ///
    /// The category filter runs after the top-k cut, so filtered searches can
    /// return fewer than k results, including none.
    pub fn search_relevant(
        &self,
        query: &str,
        category: Option<KnowledgeCategory>,
    ) -> CovenantResult<Vec<SearchResult>> {
        let embedding = self.embedder.embed(query)?;
        let mut results = self.index.search(&embedding, self.config.top_k)?;
        if let Some(category) = category {
            results.retain(|r| r.category() == Some(category));
        }
        Ok(results)
    }

    /// Structure guidance scoring above the compliance threshold, each
    /// prefixed with the configured marker.
    pub fn compliance_guidance(&self, text: &str) -> CovenantResult<Vec<String>> {
        Ok(self
            .search_relevant(text, Some(KnowledgeCategory::Structure))?
            .into_iter()
            .filter(|r| r.score > self.config.compliance_threshold)
            .map(|r| format!("{}{}", self.config.guidance_prefix, r.content))
            .collect())
    }

    /// Risk advisories scoring above the risk threshold.
    pub fn risk_guidance(&self, text: &str) -> CovenantResult<Vec<RiskGuidance>> {
        Ok(self
            .search_relevant(text, Some(KnowledgeCategory::Risk))?
            .into_iter()
            .filter(|r| r.score > self.config.risk_threshold)
            .map(|r| RiskGuidance {
                topic: r.topic().unwrap_or_default().to_string(),
                guidance: r.content,
                category: KnowledgeCategory::Risk,
                relevance: r.score,
            })
            .collect())
    }

    pub fn snapshot(&self) -> CovenantResult<Vec<u8>> {
        self.index.snapshot()
    }

    /// Replace the indexed knowledge with a snapshot taken from a store using
    /// the same embedding provider.
    pub fn restore(&self, bytes: &[u8]) -> CovenantResult<()> {
        self.index.restore(bytes)
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> CovenantResult<usize> {
        self.index.len()
    }

    pub fn is_empty(&self) -> CovenantResult<bool> {
        self.index.is_empty()
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub fn provider_name(&self) -> &str {
        self.embedder.name()
    }
}

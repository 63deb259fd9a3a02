//! # covenant-knowledge
//!
//! Retrieval of legal knowledge used to enrich compliance and risk findings.
//!
//! Entries are chunked with [`TextSplitter`], embedded through an
//! `IEmbeddingProvider`, and stored in a [`covenant_index::VectorIndex`].
//! Queries fetch the top-k neighbours and then post-filter on the entry's
//! category, so a filtered search can legitimately return nothing.

pub mod corpus;
pub mod splitter;
pub mod store;

pub use corpus::legal_corpus;
pub use splitter::TextSplitter;
pub use store::KnowledgeStore;

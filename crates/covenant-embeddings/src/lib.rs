//! # covenant-embeddings
//!
//! Embedding generation for the knowledge store.
//!
//! ```text
//! EmbeddingEngine
//! ├── one provider, pinned at construction (first available wins)
//! │   ├── OllamaProvider (local server)
//! │   ├── OpenAiEmbedder (OpenAI-compatible /v1/embeddings)
//! │   └── HashingEmbedder (offline, always available)
//! └── EmbeddingCache (moka, keyed by blake3 of the text)
//! ```

pub mod cache;
pub mod engine;
pub mod providers;

pub use cache::EmbeddingCache;
pub use engine::EmbeddingEngine;
pub use providers::{HashingEmbedder, OllamaProvider, OpenAiEmbedder};

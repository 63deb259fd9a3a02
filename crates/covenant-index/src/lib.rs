//! # covenant-index
//!
//! In-memory vector similarity index for embedded knowledge snippets.
//!
//! Search is exact brute force over the inner product, which is fine for the
//! few hundred chunks a knowledge corpus holds. The whole collection lives
//! behind one `RwLock`: searches share it, insertions and restores take it
//! exclusively.

pub mod document;
pub mod index;
pub mod snapshot;

pub use document::EmbeddedDocument;
pub use index::VectorIndex;

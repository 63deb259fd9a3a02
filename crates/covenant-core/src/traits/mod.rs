//! Collaborator contracts. Implementations live in other crates.

mod completion;
mod embedding;
mod extractor;

pub use completion::ICompletionProvider;
pub use embedding::IEmbeddingProvider;
pub use extractor::ITextExtractor;

//! # covenant-agent
//!
//! The caller-facing surface of the review engine.
//!
//! ```text
//! ContractReviewer
//! ├── ITextExtractor        (PlainTextExtractor)
//! ├── PipelineEngine        (six standard stages)
//! │   ├── KnowledgeStore    (EmbeddingEngine + VectorIndex)
//! │   ├── RuleEngine / ScoreAggregator
//! │   └── ICompletionProvider (ExtractiveSummarizer | OllamaCompletion | OpenAiCompletion)
//! └── RunLog                (latency, score and success of past runs)
//! ```

pub mod completion;
pub mod extraction;
pub mod reviewer;

pub use completion::{
    create_completion_provider, ExtractiveSummarizer, OllamaCompletion, OpenAiCompletion,
};
pub use extraction::PlainTextExtractor;
pub use reviewer::{ContractReviewer, TracedAnalysis};

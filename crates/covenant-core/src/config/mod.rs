//! Configuration for every Covenant subsystem.

mod completion_config;
mod covenant_config;
pub mod defaults;
mod embedding_config;
mod observability_config;
mod pipeline_config;
mod retrieval_config;
mod rules_config;
mod scoring_config;

pub use completion_config::{CompletionConfig, CompletionProviderKind};
pub use covenant_config::CovenantConfig;
pub use embedding_config::{EmbeddingConfig, EmbeddingProviderKind};
pub use observability_config::ObservabilityConfig;
pub use pipeline_config::PipelineConfig;
pub use retrieval_config::RetrievalConfig;
pub use rules_config::RulesConfig;
pub use scoring_config::ScoringConfig;

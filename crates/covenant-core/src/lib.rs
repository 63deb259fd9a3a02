//! # covenant-core
//!
//! Foundation crate for the Covenant contract review engine.
//! Defines the shared models, collaborator traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::CovenantConfig;
pub use errors::{CovenantError, CovenantResult};
pub use models::{
    AnalysisResult, ComplianceFinding, KnowledgeCategory, Metadata, ReviewState, RiskGuidance,
    RiskItem, SearchResult, Severity,
};

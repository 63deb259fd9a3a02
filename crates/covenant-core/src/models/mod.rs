//! Shared data model threaded through the review pipeline.

mod analysis_result;
mod compliance;
mod knowledge;
mod review_state;
mod risk;
mod rule_spec;
mod severity;

use std::collections::BTreeMap;

pub use analysis_result::AnalysisResult;
pub use compliance::ComplianceFinding;
pub use knowledge::{KnowledgeCategory, KnowledgeEntry, RiskGuidance, SearchResult};
pub use review_state::ReviewState;
pub use risk::RiskItem;
pub use rule_spec::{ComplianceRule, RiskPattern};
pub use severity::Severity;

/// String metadata attached to indexed documents. Ordered so that snapshots
/// and exported traces are stable.
pub type Metadata = BTreeMap<String, String>;

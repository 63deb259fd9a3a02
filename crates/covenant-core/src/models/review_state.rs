use serde::{Deserialize, Serialize};

use super::{ComplianceFinding, RiskGuidance, RiskItem, SearchResult};

/// The mutable record threaded through the pipeline stages.
///
/// Created fresh per analysis and owned by exactly one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
    pub text: String,
    pub knowledge_context: Vec<SearchResult>,
    pub compliance: Vec<ComplianceFinding>,
    pub compliance_guidance: Vec<String>,
    pub risks: Vec<RiskItem>,
    pub risk_guidance: Vec<RiskGuidance>,
    pub summary: String,
    pub score: u8,
}

impl ReviewState {
    /// A fresh state holding only the contract text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Number of compliance gaps found so far.
    pub fn compliance_gaps(&self) -> usize {
        self.compliance.iter().filter(|c| c.is_gap()).count()
    }
}

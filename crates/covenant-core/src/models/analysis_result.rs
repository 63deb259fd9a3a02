use serde::{Deserialize, Serialize};

use super::{ComplianceFinding, ReviewState, RiskGuidance, RiskItem};

/// Verdict returned to callers after a successful run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub risks: Vec<RiskItem>,
    pub compliance: Vec<ComplianceFinding>,
    pub compliance_guidance: Vec<String>,
    pub risk_guidance: Vec<RiskGuidance>,
    pub score: u8,
}

impl From<ReviewState> for AnalysisResult {
    fn from(state: ReviewState) -> Self {
        Self {
            summary: state.summary,
            risks: state.risks,
            compliance: state.compliance,
            compliance_guidance: state.compliance_guidance,
            risk_guidance: state.risk_guidance,
            score: state.score,
        }
    }
}

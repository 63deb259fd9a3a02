use serde::{Deserialize, Serialize};

use super::Severity;
use crate::constants::UNLOCATED_CLAUSE;

/// A risk identified in the contract text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RiskItem {
    pub clause: String,
    pub issue: String,
    pub severity: Severity,
}

impl RiskItem {
    /// A keyword-matched risk with no located clause.
    pub fn unlocated(issue: impl Into<String>, severity: Severity) -> Self {
        Self {
            clause: UNLOCATED_CLAUSE.to_string(),
            issue: issue.into(),
            severity,
        }
    }
}

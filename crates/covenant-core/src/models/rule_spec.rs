use serde::{Deserialize, Serialize};

use super::Severity;

/// Keyword-driven compliance check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceRule {
    pub name: String,
    pub keywords: Vec<String>,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

/// Keyword-driven risk pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskPattern {
    pub name: String,
    pub keywords: Vec<String>,
    pub severity: Severity,
}

//! RuleEngine — keyword compliance checks and risk patterns.

use std::sync::Arc;

use covenant_core::models::{ComplianceFinding, RiskItem};
use tracing::debug;

use crate::rule_set::RuleSet;

/// Stateless evaluator over a shared, immutable [`RuleSet`].
///
/// Matching is a case-sensitive substring test; a rule fires when any of
/// its keywords occurs anywhere in the text.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: Arc<RuleSet>,
}

impl RuleEngine {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// One finding per required check, in declared order.
    pub fn check_compliance(&self, text: &str) -> Vec<ComplianceFinding> {
        let findings: Vec<_> = self
            .rules
            .compliance_checks
            .iter()
            .filter(|check| check.required)
            .map(|check| {
                if matches_any(text, &check.keywords) {
                    ComplianceFinding::present(&check.name)
                } else {
                    ComplianceFinding::missing(&check.name)
                }
            })
            .collect();
        debug!(
            checks = findings.len(),
            gaps = findings.iter().filter(|f| f.is_gap()).count(),
            "compliance checked"
        );
        findings
    }

    /// One unlocated risk per matching pattern, in declared order.
    pub fn identify_risks(&self, text: &str) -> Vec<RiskItem> {
        let risks: Vec<_> = self
            .rules
            .risk_patterns
            .iter()
            .filter(|pattern| matches_any(text, &pattern.keywords))
            .map(|pattern| RiskItem::unlocated(&pattern.name, pattern.severity))
            .collect();
        debug!(risks = risks.len(), "risk patterns evaluated");
        risks
    }
}

fn matches_any(text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| text.contains(k.as_str()))
}

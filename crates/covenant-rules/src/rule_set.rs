//! Declarative review rules, loaded from TOML.
//!
//! ```toml
//! [[compliance_checks]]
//! name = "Parties"
//! keywords = ["Party A", "Party B"]
//! required = true
//!
//! [[risk_patterns]]
//! name = "Automatic renewal"
//! keywords = ["automatically renew"]
//! severity = "medium"
//! ```

use std::collections::HashSet;
use std::path::Path;

use covenant_core::config::RulesConfig;
use covenant_core::errors::{ConfigError, CovenantResult, RuleError};
use covenant_core::models::{ComplianceRule, RiskPattern};
use serde::{Deserialize, Serialize};
use tracing::info;

const BUILTIN_RULES: &str = include_str!("../rules/review_rules.toml");
const BUILTIN_SOURCE: &str = "<builtin>";
const INLINE_SOURCE: &str = "<inline>";

/// Compliance checks and risk patterns, in declared order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub compliance_checks: Vec<ComplianceRule>,
    #[serde(default)]
    pub risk_patterns: Vec<RiskPattern>,
}

impl RuleSet {
    /// Parse and validate rules from a TOML string.
    pub fn from_toml(toml_str: &str) -> CovenantResult<Self> {
        Self::parse(toml_str, INLINE_SOURCE)
    }

    /// Read, parse and validate a rules file.
    pub fn load(path: &Path) -> CovenantResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let rules = Self::parse(&content, &path.display().to_string())?;
        info!(
            path = %path.display(),
            compliance_checks = rules.compliance_checks.len(),
            risk_patterns = rules.risk_patterns.len(),
            "review rules loaded"
        );
        Ok(rules)
    }

    /// The rule set bundled with the crate.
    pub fn builtin() -> CovenantResult<Self> {
        Self::parse(BUILTIN_RULES, BUILTIN_SOURCE)
    }

    /// The configured rules file, or the bundled rules when none is set.
    pub fn from_config(config: &RulesConfig) -> CovenantResult<Self> {
        match &config.path {
            Some(path) => Self::load(Path::new(path)),
            None => Self::builtin(),
        }
    }

    fn parse(toml_str: &str, source: &str) -> CovenantResult<Self> {
        let rules: RuleSet = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: source.to_string(),
            message: e.to_string(),
        })?;
        rules.validate()?;
        Ok(rules)
    }

    /// Reject blank names, rules without keywords, blank keywords and
    /// duplicate names within a section.
    pub fn validate(&self) -> Result<(), RuleError> {
        let mut seen = HashSet::new();
        for rule in &self.compliance_checks {
            check_rule(&rule.name, &rule.keywords)?;
            if !seen.insert(rule.name.as_str()) {
                return Err(RuleError::DuplicateRule {
                    name: rule.name.clone(),
                });
            }
        }
        seen.clear();
        for pattern in &self.risk_patterns {
            check_rule(&pattern.name, &pattern.keywords)?;
            if !seen.insert(pattern.name.as_str()) {
                return Err(RuleError::DuplicateRule {
                    name: pattern.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Number of required compliance checks.
    pub fn required_checks(&self) -> usize {
        self.compliance_checks.iter().filter(|c| c.required).count()
    }
}

fn check_rule(name: &str, keywords: &[String]) -> Result<(), RuleError> {
    let invalid = |reason: &str| RuleError::InvalidRule {
        name: name.to_string(),
        reason: reason.to_string(),
    };
    if name.trim().is_empty() {
        return Err(invalid("name is blank"));
    }
    if keywords.is_empty() {
        return Err(invalid("no keywords"));
    }
    if keywords.iter().any(|k| k.trim().is_empty()) {
        return Err(invalid("blank keyword"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use covenant_core::models::Severity;

    #[test]
    fn builtin_rules_are_valid() {
        let rules = RuleSet::builtin().unwrap();
        assert!(rules.required_checks() >= 5);
        assert!(rules
            .risk_patterns
            .iter()
            .any(|p| p.severity == Severity::High));
    }

    #[test]
    fn required_defaults_to_true() {
        let rules = RuleSet::from_toml(
            r#"
            [[compliance_checks]]
            name = "Price"
            keywords = ["price"]
            "#,
        )
        .unwrap();
        assert!(rules.compliance_checks[0].required);
        assert!(rules.risk_patterns.is_empty());
    }

    #[test]
    fn blank_keyword_is_rejected() {
        let rules = RuleSet {
            compliance_checks: vec![ComplianceRule {
                name: "Price".into(),
                keywords: vec!["price".into(), "  ".into()],
                required: true,
            }],
            risk_patterns: vec![],
        };
        assert!(matches!(
            rules.validate(),
            Err(RuleError::InvalidRule { .. })
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let pattern = RiskPattern {
            name: "Renewal".into(),
            keywords: vec!["renew".into()],
            severity: Severity::Low,
        };
        let rules = RuleSet {
            compliance_checks: vec![],
            risk_patterns: vec![pattern.clone(), pattern],
        };
        assert!(matches!(
            rules.validate(),
            Err(RuleError::DuplicateRule { name }) if name == "Renewal"
        ));
    }

    #[test]
    fn same_name_in_both_sections_is_allowed() {
        let rules = RuleSet {
            compliance_checks: vec![ComplianceRule {
                name: "Confidentiality".into(),
                keywords: vec!["confidential".into()],
                required: false,
            }],
            risk_patterns: vec![RiskPattern {
                name: "Confidentiality".into(),
                keywords: vec!["no confidentiality".into()],
                severity: Severity::Medium,
            }],
        };
        assert!(rules.validate().is_ok());
    }
}

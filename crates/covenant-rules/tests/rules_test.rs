//! Rule loading and evaluation against the shared fixture contracts.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use covenant_core::config::RulesConfig;
use covenant_core::errors::{ConfigError, CovenantError, RuleError};
use covenant_core::models::{ComplianceFinding, Severity};
use covenant_rules::{score, RuleEngine, RuleSet};
use test_fixtures::{BARE_TEXT, CLEAN_CONTRACT, RISKY_CONTRACT, RULES_TOML};

fn engine() -> RuleEngine {
    RuleEngine::new(Arc::new(RuleSet::from_toml(RULES_TOML).unwrap()))
}

#[test]
fn clean_contract_passes_every_check() {
    let engine = engine();
    let compliance = engine.check_compliance(CLEAN_CONTRACT);
    assert_eq!(compliance.len(), 3);
    assert!(compliance.iter().all(|c| !c.is_gap()));
    let risks = engine.identify_risks(CLEAN_CONTRACT);
    assert!(risks.is_empty());
    assert_eq!(score(&risks, &compliance), 10);
}

#[test]
fn risky_contract_scores_two() {
    let engine = engine();
    let compliance = engine.check_compliance(RISKY_CONTRACT);
    assert_eq!(
        compliance,
        vec![
            ComplianceFinding::present("Parties"),
            ComplianceFinding::missing("Price"),
            ComplianceFinding::missing("Dispute resolution"),
        ]
    );
    let risks = engine.identify_risks(RISKY_CONTRACT);
    let severities: Vec<_> = risks.iter().map(|r| r.severity).collect();
    assert_eq!(severities, vec![Severity::High, Severity::High, Severity::Medium]);
    assert_eq!(score(&risks, &compliance), 2);
}

#[test]
fn bare_text_misses_every_required_check() {
    let compliance = engine().check_compliance(BARE_TEXT);
    assert_eq!(compliance.iter().filter(|c| c.is_gap()).count(), 3);
    assert_eq!(score(&[], &compliance), 4);
}

#[test]
fn findings_serialize_as_strings() {
    let compliance = engine().check_compliance(RISKY_CONTRACT);
    let json = serde_json::to_string(&compliance).unwrap();
    assert_eq!(
        json,
        r#"["Parties present","missing Price","missing Dispute resolution"]"#
    );
}

#[test]
fn load_reads_rules_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(RULES_TOML.as_bytes()).unwrap();
    let rules = RuleSet::load(file.path()).unwrap();
    assert_eq!(rules.compliance_checks.len(), 4);
    assert_eq!(rules.risk_patterns.len(), 4);

    let configured = RuleSet::from_config(&RulesConfig {
        path: Some(file.path().display().to_string()),
    })
    .unwrap();
    assert_eq!(configured, rules);
}

#[test]
fn missing_file_is_reported() {
    let err = RuleSet::load(Path::new("/nonexistent/review_rules.toml")).unwrap_err();
    assert!(matches!(
        err,
        CovenantError::ConfigError(ConfigError::FileNotFound { .. })
    ));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = RuleSet::from_toml("[[compliance_checks]]\nname = ").unwrap_err();
    assert!(matches!(
        err,
        CovenantError::ConfigError(ConfigError::ParseError { .. })
    ));
}

#[test]
fn unknown_severity_is_a_parse_error() {
    let err = RuleSet::from_toml(
        r#"
        [[risk_patterns]]
        name = "Odd"
        keywords = ["odd"]
        severity = "catastrophic"
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, CovenantError::ConfigError(ConfigError::ParseError { .. })));
}

#[test]
fn rule_without_keywords_fails_validation() {
    let err = RuleSet::from_toml(
        r#"
        [[compliance_checks]]
        name = "Price"
        keywords = []
        "#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CovenantError::RuleError(RuleError::InvalidRule { .. })
    ));
}

#[test]
fn default_config_uses_builtin_rules() {
    let rules = RuleSet::from_config(&RulesConfig::default()).unwrap();
    assert_eq!(rules, RuleSet::builtin().unwrap());
}

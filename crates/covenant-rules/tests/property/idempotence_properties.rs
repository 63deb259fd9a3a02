//! Repeated evaluation on one engine and one aggregator gives the same answer.
//!
//! Texts are stitched from a keyword pool and arbitrary filler so that rules
//! both hit and miss.

use std::sync::Arc;

use proptest::prelude::*;

use covenant_core::models::{ComplianceFinding, ComplianceRule, RiskItem, RiskPattern, Severity};
use covenant_rules::{RuleEngine, RuleSet, ScoreAggregator};

const POOL: [&str; 8] = [
    "Party A",
    "Party B",
    "liquidated damages",
    "terminate",
    "confidential",
    "arbitration",
    "automatically renew",
    "unlimited liability",
];

fn severity() -> impl Strategy<Value = Severity> {
    prop_oneof![Just(Severity::Low), Just(Severity::Medium), Just(Severity::High)]
}

fn keyword() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop::sample::select(POOL.to_vec()).prop_map(str::to_string),
        1 => "[a-zA-Z ]{1,12}",
    ]
}

fn keywords() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(keyword(), 0..4)
}

fn rule_set() -> impl Strategy<Value = RuleSet> {
    let checks = prop::collection::vec((keywords(), any::<bool>()), 0..6).prop_map(|rules| {
        rules
            .into_iter()
            .enumerate()
            .map(|(i, (keywords, required))| ComplianceRule {
                name: format!("check-{i}"),
                keywords,
                required,
            })
            .collect()
    });
    let patterns = prop::collection::vec((keywords(), severity()), 0..6).prop_map(|rules| {
        rules
            .into_iter()
            .enumerate()
            .map(|(i, (keywords, severity))| RiskPattern {
                name: format!("pattern-{i}"),
                keywords,
                severity,
            })
            .collect()
    });
    (checks, patterns).prop_map(|(compliance_checks, risk_patterns)| RuleSet {
        compliance_checks,
        risk_patterns,
    })
}

fn contract_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            prop::sample::select(POOL.to_vec()).prop_map(str::to_string),
            any::<String>(),
        ],
        0..10,
    )
    .prop_map(|parts| parts.join(" "))
}

fn risks() -> impl Strategy<Value = Vec<RiskItem>> {
    prop::collection::vec(
        ("[a-z ]{0,16}", severity()).prop_map(|(issue, s)| RiskItem::unlocated(issue, s)),
        0..12,
    )
}

fn compliance() -> impl Strategy<Value = Vec<ComplianceFinding>> {
    prop::collection::vec(
        ("[a-z ]{0,16}", any::<bool>()).prop_map(|(name, present)| {
            if present {
                ComplianceFinding::present(name)
            } else {
                ComplianceFinding::missing(name)
            }
        }),
        0..8,
    )
}

proptest! {
    #[test]
    fn rule_evaluation_is_idempotent(rules in rule_set(), text in contract_text()) {
        let engine = RuleEngine::new(Arc::new(rules));

        let compliance_first = engine.check_compliance(&text);
        let compliance_second = engine.check_compliance(&text);
        prop_assert_eq!(compliance_first, compliance_second);

        let risks_first = engine.identify_risks(&text);
        let risks_second = engine.identify_risks(&text);
        prop_assert_eq!(risks_first, risks_second);
    }

    #[test]
    fn scoring_is_idempotent(risks in risks(), compliance in compliance()) {
        let aggregator = ScoreAggregator::default();
        let first = aggregator.score(&risks, &compliance);
        prop_assert_eq!(first, aggregator.score(&risks, &compliance));
    }

    #[test]
    fn full_evaluation_is_idempotent(rules in rule_set(), text in contract_text()) {
        let engine = RuleEngine::new(Arc::new(rules));
        let aggregator = ScoreAggregator::default();

        let evaluate = || {
            let compliance = engine.check_compliance(&text);
            let risks = engine.identify_risks(&text);
            let score = aggregator.score(&risks, &compliance);
            (compliance, risks, score)
        };

        prop_assert_eq!(evaluate(), evaluate());
    }
}

//! Property tests for the risk score.

use proptest::prelude::*;

use covenant_core::models::{ComplianceFinding, RiskItem, Severity};
use covenant_rules::score;

fn severity() -> impl Strategy<Value = Severity> {
    prop_oneof![Just(Severity::Low), Just(Severity::Medium), Just(Severity::High)]
}

fn risks() -> impl Strategy<Value = Vec<RiskItem>> {
    prop::collection::vec(severity().prop_map(|s| RiskItem::unlocated("risk", s)), 0..12)
}

fn compliance() -> impl Strategy<Value = Vec<ComplianceFinding>> {
    prop::collection::vec(
        any::<bool>().prop_map(|present| {
            if present {
                ComplianceFinding::present("check")
            } else {
                ComplianceFinding::missing("check")
            }
        }),
        0..8,
    )
}

proptest! {
    #[test]
    fn score_is_within_bounds(risks in risks(), compliance in compliance()) {
        let s = score(&risks, &compliance);
        prop_assert!((1..=10).contains(&s));
        prop_assert!(s >= 2, "penalty is capped at 8");
    }

    #[test]
    fn adding_a_risk_never_raises_the_score(
        risks in risks(),
        compliance in compliance(),
        extra in severity(),
    ) {
        let before = score(&risks, &compliance);
        let mut more = risks.clone();
        more.push(RiskItem::unlocated("extra", extra));
        prop_assert!(score(&more, &compliance) <= before);
    }

    #[test]
    fn adding_a_gap_never_raises_the_score(risks in risks(), compliance in compliance()) {
        let before = score(&risks, &compliance);
        let mut more = compliance.clone();
        more.push(ComplianceFinding::missing("gap"));
        prop_assert!(score(&risks, &more) <= before);
    }

    #[test]
    fn present_findings_and_low_risks_cost_nothing(n_low in 0usize..10, n_present in 0usize..10) {
        let risks = vec![RiskItem::unlocated("low", Severity::Low); n_low];
        let compliance = vec![ComplianceFinding::present("ok"); n_present];
        prop_assert_eq!(score(&risks, &compliance), 10);
    }
}

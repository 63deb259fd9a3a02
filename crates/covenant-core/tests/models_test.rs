use covenant_core::models::*;

#[test]
fn compliance_finding_string_forms() {
    assert_eq!(ComplianceFinding::present("Parties").to_string(), "Parties present");
    assert_eq!(ComplianceFinding::missing("Parties").to_string(), "missing Parties");
}

#[test]
fn compliance_finding_parses_its_string_form() {
    assert_eq!(
        "missing Dispute resolution".parse::<ComplianceFinding>().unwrap(),
        ComplianceFinding::missing("Dispute resolution")
    );
    assert_eq!(
        "Price present".parse::<ComplianceFinding>().unwrap(),
        ComplianceFinding::present("Price")
    );
    assert!("something else".parse::<ComplianceFinding>().is_err());
}

#[test]
fn compliance_finding_serializes_as_plain_string() {
    let findings = vec![
        ComplianceFinding::missing("A"),
        ComplianceFinding::present("B"),
    ];
    let json = serde_json::to_string(&findings).unwrap();
    assert_eq!(json, r#"["missing A","B present"]"#);

    let back: Vec<ComplianceFinding> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, findings);
}

#[test]
fn only_missing_findings_are_gaps() {
    assert!(ComplianceFinding::missing("A").is_gap());
    assert!(!ComplianceFinding::present("A").is_gap());
}

#[test]
fn severity_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Severity::High).unwrap(), r#""high""#);
    assert_eq!("Medium".parse::<Severity>().unwrap(), Severity::Medium);
    assert!("critical".parse::<Severity>().is_err());
}

#[test]
fn unlocated_risk_uses_marker_clause() {
    let risk = RiskItem::unlocated("Unilateral termination", Severity::High);
    assert_eq!(risk.clause, "unlocated");
    assert_eq!(risk.severity, Severity::High);
}

#[test]
fn knowledge_entry_metadata_carries_category() {
    let entry = KnowledgeEntry::new(
        "Liquidated damages must be reasonable.",
        "advisory",
        KnowledgeCategory::Risk,
        "breach liability",
    );
    let hit = SearchResult {
        content: entry.content.clone(),
        metadata: entry.metadata(),
        score: 0.9,
    };
    assert_eq!(hit.category(), Some(KnowledgeCategory::Risk));
    assert_eq!(hit.topic(), Some("breach liability"));
    assert_eq!(hit.metadata.get("type").map(String::as_str), Some("advisory"));
}

#[test]
fn review_state_starts_empty() {
    let state = ReviewState::new("contract text");
    assert_eq!(state.text, "contract text");
    assert!(state.compliance.is_empty());
    assert!(state.risks.is_empty());
    assert_eq!(state.score, 0);
    assert_eq!(state.compliance_gaps(), 0);
}

#[test]
fn analysis_result_takes_fields_from_state() {
    let mut state = ReviewState::new("text");
    state.summary = "short".into();
    state.score = 7;
    state.compliance = vec![ComplianceFinding::missing("Term")];
    let result = AnalysisResult::from(state);
    assert_eq!(result.summary, "short");
    assert_eq!(result.score, 7);
    assert_eq!(result.compliance.len(), 1);
}

#[test]
fn rule_spec_required_defaults_to_true() {
    let rule: ComplianceRule =
        serde_json::from_str(r#"{"name":"Parties","keywords":["Party"]}"#).unwrap();
    assert!(rule.required);
}

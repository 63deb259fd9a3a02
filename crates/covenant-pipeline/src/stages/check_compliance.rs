use std::sync::Arc;

use covenant_core::errors::CovenantResult;
use covenant_core::models::ReviewState;
use covenant_knowledge::KnowledgeStore;
use covenant_rules::RuleEngine;

use super::{Stage, CHECK_COMPLIANCE};
use crate::context::StageContext;

/// Runs the compliance rules and attaches structure guidance.
pub struct CheckComplianceStage {
    rules: RuleEngine,
    knowledge: Arc<KnowledgeStore>,
}

impl CheckComplianceStage {
    pub fn new(rules: RuleEngine, knowledge: Arc<KnowledgeStore>) -> Self {
        Self { rules, knowledge }
    }
}

impl Stage for CheckComplianceStage {
    fn id(&self) -> &str {
        CHECK_COMPLIANCE
    }

    fn display_name(&self) -> &str {
        "Check compliance"
    }

    fn execute(&self, state: &mut ReviewState, ctx: &mut StageContext) -> CovenantResult<()> {
        ctx.input(format!(
            "{} required checks",
            self.rules.rules().required_checks()
        ));

        state.compliance = self.rules.check_compliance(&state.text);
        ctx.progress("compliance rules evaluated", 0.5);
        state.compliance_guidance = self.knowledge.compliance_guidance(&state.text)?;
        ctx.progress("structure guidance retrieved", 1.0);

        let gaps = state.compliance_gaps();
        ctx.metric("findings", state.compliance.len() as f64, "findings");
        ctx.metric("gaps", gaps as f64, "findings");
        ctx.metric("guidance", state.compliance_guidance.len() as f64, "snippets");
        ctx.output(format!(
            "{} findings, {gaps} gaps, {} guidance",
            state.compliance.len(),
            state.compliance_guidance.len()
        ));
        Ok(())
    }
}

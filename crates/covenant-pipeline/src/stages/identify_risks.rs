use std::sync::Arc;

use covenant_core::errors::CovenantResult;
use covenant_core::models::{ReviewState, Severity};
use covenant_knowledge::KnowledgeStore;
use covenant_rules::RuleEngine;

use super::{Stage, IDENTIFY_RISKS};
use crate::context::StageContext;

/// Runs the risk patterns and attaches risk guidance.
pub struct IdentifyRisksStage {
    rules: RuleEngine,
    knowledge: Arc<KnowledgeStore>,
}

impl IdentifyRisksStage {
    pub fn new(rules: RuleEngine, knowledge: Arc<KnowledgeStore>) -> Self {
        Self { rules, knowledge }
    }
}

impl Stage for IdentifyRisksStage {
    fn id(&self) -> &str {
        IDENTIFY_RISKS
    }

    fn display_name(&self) -> &str {
        "Identify risks"
    }

    fn execute(&self, state: &mut ReviewState, ctx: &mut StageContext) -> CovenantResult<()> {
        ctx.input(format!(
            "{} risk patterns",
            self.rules.rules().risk_patterns.len()
        ));

        state.risks = self.rules.identify_risks(&state.text);
        ctx.progress("risk patterns evaluated", 0.5);
        state.risk_guidance = self.knowledge.risk_guidance(&state.text)?;
        ctx.progress("risk guidance retrieved", 1.0);

        for severity in Severity::ALL {
            let n = state.risks.iter().filter(|r| r.severity == severity).count();
            ctx.metric(format!("{severity}_risks"), n as f64, "risks");
        }
        ctx.output(format!(
            "{} risks, {} guidance",
            state.risks.len(),
            state.risk_guidance.len()
        ));
        Ok(())
    }
}

use covenant_core::errors::CovenantResult;
use covenant_core::models::ReviewState;
use covenant_rules::ScoreAggregator;

use super::{Stage, CALCULATE_SCORE};
use crate::context::StageContext;

/// Folds risks and compliance gaps into the final score.
pub struct CalculateScoreStage {
    scorer: ScoreAggregator,
}

impl CalculateScoreStage {
    pub fn new(scorer: ScoreAggregator) -> Self {
        Self { scorer }
    }
}

impl Stage for CalculateScoreStage {
    fn id(&self) -> &str {
        CALCULATE_SCORE
    }

    fn display_name(&self) -> &str {
        "Calculate risk score"
    }

    fn execute(&self, state: &mut ReviewState, ctx: &mut StageContext) -> CovenantResult<()> {
        ctx.input(format!(
            "{} risks, {} compliance gaps",
            state.risks.len(),
            state.compliance_gaps()
        ));

        let penalty = self.scorer.penalty(&state.risks, &state.compliance);
        state.score = self.scorer.score(&state.risks, &state.compliance);

        ctx.metric("penalty", f64::from(penalty), "points");
        ctx.metric("score", f64::from(state.score), "points");
        ctx.output(format!("score {}/{}", state.score, self.scorer.weights().base_score));
        Ok(())
    }
}

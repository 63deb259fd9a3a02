use std::sync::Arc;

use covenant_core::errors::CovenantResult;
use covenant_core::models::ReviewState;
use covenant_knowledge::KnowledgeStore;

use super::{Stage, RETRIEVE_KNOWLEDGE};
use crate::context::StageContext;

/// Fetches the nearest knowledge snippets for the whole contract.
pub struct RetrieveKnowledgeStage {
    knowledge: Arc<KnowledgeStore>,
}

impl RetrieveKnowledgeStage {
    pub fn new(knowledge: Arc<KnowledgeStore>) -> Self {
        Self { knowledge }
    }
}

impl Stage for RetrieveKnowledgeStage {
    fn id(&self) -> &str {
        RETRIEVE_KNOWLEDGE
    }

    fn display_name(&self) -> &str {
        "Retrieve legal knowledge"
    }

    fn execute(&self, state: &mut ReviewState, ctx: &mut StageContext) -> CovenantResult<()> {
        ctx.input(format!(
            "query of {} chars, top_k {}",
            state.text.chars().count(),
            self.knowledge.config().top_k
        ));

        state.knowledge_context = self.knowledge.search_relevant(&state.text, None)?;

        let hits = state.knowledge_context.len();
        ctx.metric("hits", hits as f64, "snippets");
        match state.knowledge_context.first() {
            Some(best) => {
                ctx.metric("top_score", f64::from(best.score), "inner product");
                ctx.output(format!("{hits} snippets, top score {:.3}", best.score));
            }
            None => ctx.output("no knowledge snippets"),
        }
        Ok(())
    }
}

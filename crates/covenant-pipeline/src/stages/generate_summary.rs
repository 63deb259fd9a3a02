use std::sync::Arc;

use covenant_core::errors::CovenantResult;
use covenant_core::models::ReviewState;
use covenant_core::traits::ICompletionProvider;

use super::{Stage, GENERATE_SUMMARY};
use crate::context::StageContext;

/// Summarises the head of the contract, grounded in retrieved knowledge.
pub struct GenerateSummaryStage {
    summarizer: Arc<dyn ICompletionProvider>,
    input_chars: usize,
}

impl GenerateSummaryStage {
    pub fn new(summarizer: Arc<dyn ICompletionProvider>, input_chars: usize) -> Self {
        Self {
            summarizer,
            input_chars,
        }
    }
}

impl Stage for GenerateSummaryStage {
    fn id(&self) -> &str {
        GENERATE_SUMMARY
    }

    fn display_name(&self) -> &str {
        "Generate summary"
    }

    fn execute(&self, state: &mut ReviewState, ctx: &mut StageContext) -> CovenantResult<()> {
        let head: String = state.text.chars().take(self.input_chars).collect();
        let context = state
            .knowledge_context
            .iter()
            .map(|r| r.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        ctx.input(format!(
            "{} chars of text, {} context snippets, provider {}",
            head.chars().count(),
            state.knowledge_context.len(),
            self.summarizer.name()
        ));

        state.summary = self.summarizer.complete_summary(&head, &context)?;

        if state.summary.trim().is_empty() {
            ctx.warn("summarizer returned an empty summary");
        }
        ctx.metric("summary_chars", state.summary.chars().count() as f64, "chars");
        ctx.output(format!("{} chars", state.summary.chars().count()));
        Ok(())
    }
}

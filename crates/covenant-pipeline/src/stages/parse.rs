use covenant_core::errors::CovenantResult;
use covenant_core::models::ReviewState;
use covenant_knowledge::TextSplitter;

use super::{Stage, PARSE};
use crate::context::StageContext;

/// Normalises line endings, trims trailing whitespace per line, and reports
/// document shape metrics.
pub struct ParseStage {
    splitter: TextSplitter,
}

impl ParseStage {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            splitter: TextSplitter::new(chunk_size, chunk_overlap),
        }
    }
}

fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

impl Stage for ParseStage {
    fn id(&self) -> &str {
        PARSE
    }

    fn display_name(&self) -> &str {
        "Parse document"
    }

    fn execute(&self, state: &mut ReviewState, ctx: &mut StageContext) -> CovenantResult<()> {
        ctx.input(format!("{} chars", state.text.chars().count()));

        state.text = normalize(&state.text);
        ctx.progress("normalised line endings", 0.5);

        if state.text.trim().is_empty() {
            ctx.warn("contract text is empty");
        }
        let chars = state.text.chars().count();
        let lines = state.text.lines().count();
        let chunks = self.splitter.split(&state.text).len();
        ctx.progress("measured document", 1.0);

        ctx.metric("chars", chars as f64, "chars");
        ctx.metric("lines", lines as f64, "lines");
        ctx.metric("chunks", chunks as f64, "chunks");
        ctx.output(format!("{lines} lines, {chunks} chunks"));
        Ok(())
    }
}

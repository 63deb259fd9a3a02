use crate::errors::CovenantResult;

/// Chat-completion style summarizer.
pub trait ICompletionProvider: Send + Sync {
    /// Summarize `text`, optionally grounded in retrieved `context`.
    fn complete_summary(&self, text: &str, context: &str) -> CovenantResult<String>;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}

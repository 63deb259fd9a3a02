use std::path::Path;

use crate::errors::CovenantResult;

/// Format-agnostic text extraction.
pub trait ITextExtractor: Send + Sync {
    /// Extract plain text from the document at `path`.
    fn extract_text(&self, path: &Path) -> CovenantResult<String>;

    /// Lowercase file extensions (without dot) this extractor accepts.
    fn supported_extensions(&self) -> &[&str];
}

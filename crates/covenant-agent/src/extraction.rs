//! Plain-text document extraction.

use std::path::Path;

use covenant_core::errors::{CovenantResult, ExtractionError};
use covenant_core::traits::ITextExtractor;
use tracing::debug;

/// Formats recognised by name but not decodable in this build.
const RECOGNISED_BINARY_FORMATS: [&str; 2] = ["pdf", "docx"];

/// Reads UTF-8 `.txt` files. `.pdf` and `.docx` are reported as unsupported.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl ITextExtractor for PlainTextExtractor {
    fn extract_text(&self, path: &Path) -> CovenantResult<String> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if !self.supported_extensions().contains(&extension.as_str()) {
            if RECOGNISED_BINARY_FORMATS.contains(&extension.as_str()) {
                debug!(path = %path.display(), format = %extension, "recognised format has no decoder");
            }
            return Err(ExtractionError::UnsupportedFormat { extension }.into());
        }

        std::fs::read_to_string(path).map_err(|e| {
            ExtractionError::ExtractionFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["txt"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covenant_core::CovenantError;

    #[test]
    fn pdf_is_unsupported() {
        let err = PlainTextExtractor::new()
            .extract_text(Path::new("contract.PDF"))
            .unwrap_err();
        assert!(matches!(
            err,
            CovenantError::ExtractionError(ExtractionError::UnsupportedFormat { ref extension })
                if extension == "pdf"
        ));
    }

    #[test]
    fn missing_extension_is_unsupported() {
        assert!(PlainTextExtractor::new()
            .extract_text(Path::new("contract"))
            .is_err());
    }

    #[test]
    fn missing_file_fails_extraction() {
        let err = PlainTextExtractor::new()
            .extract_text(Path::new("/nonexistent/dir/contract.txt"))
            .unwrap_err();
        assert!(matches!(
            err,
            CovenantError::ExtractionError(ExtractionError::ExtractionFailed { .. })
        ));
    }
}

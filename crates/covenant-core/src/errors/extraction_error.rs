/// Text extraction errors.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("unsupported format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("extraction failed for {path}: {reason}")]
    ExtractionFailed { path: String, reason: String },
}

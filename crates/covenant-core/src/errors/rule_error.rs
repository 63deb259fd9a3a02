/// Rule set validation errors.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("invalid rule {name:?}: {reason}")]
    InvalidRule { name: String, reason: String },

    #[error("duplicate rule name: {name}")]
    DuplicateRule { name: String },
}

/// Chat-completion provider errors.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("provider {provider} failed: {reason}")]
    ProviderFailed { provider: String, reason: String },

    #[error("provider unavailable: {provider}")]
    ProviderUnavailable { provider: String },
}

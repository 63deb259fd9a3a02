//! EmbeddingEngine — one pinned provider plus cache.
//!
//! Implements `IEmbeddingProvider` so it can be handed to the knowledge store
//! like any single provider. The provider is chosen once, at construction;
//! every vector the engine ever returns comes from that provider, so seeded
//! entries and later queries share one embedding space. Query-time failures
//! are returned to the caller unchanged.

use covenant_core::config::EmbeddingConfig;
use covenant_core::errors::{CovenantResult, EmbeddingError};
use covenant_core::traits::IEmbeddingProvider;
use tracing::{debug, info, warn};

use crate::cache::EmbeddingCache;
use crate::providers;

/// The main embedding engine.
pub struct EmbeddingEngine {
    provider: Box<dyn IEmbeddingProvider>,
    cache: EmbeddingCache,
    dimensions: usize,
}

impl EmbeddingEngine {
    /// Create an engine from configuration.
    ///
    /// Provider selection (including the offline fallback when a remote
    /// backend is unreachable) happens in [`providers::create_provider`].
    pub fn new(config: &EmbeddingConfig) -> Self {
        let engine = Self::with_provider(providers::create_provider(config), config.cache_size);
        info!(
            provider = engine.provider_name(),
            dims = engine.dimensions,
            "EmbeddingEngine initialized"
        );
        engine
    }

    /// Create an engine pinned to `provider`.
    pub fn with_provider(provider: Box<dyn IEmbeddingProvider>, cache_size: u64) -> Self {
        let dimensions = provider.dimensions();
        Self {
            provider,
            cache: EmbeddingCache::new(cache_size),
            dimensions,
        }
    }

    /// Pin the first available provider among `candidates`.
    ///
    /// Availability is checked here and never again; a provider that goes
    /// offline later surfaces as an error from [`IEmbeddingProvider::embed`].
    pub fn select(
        candidates: Vec<Box<dyn IEmbeddingProvider>>,
        cache_size: u64,
    ) -> CovenantResult<Self> {
        let mut skipped = Vec::new();
        for provider in candidates {
            if provider.is_available() {
                if !skipped.is_empty() {
                    warn!(
                        event = "provider_fallback",
                        provider = provider.name(),
                        skipped = %skipped.join(","),
                        "preferred embedding provider unavailable"
                    );
                }
                return Ok(Self::with_provider(provider, cache_size));
            }
            skipped.push(provider.name().to_string());
        }

        Err(EmbeddingError::ProviderUnavailable {
            provider: if skipped.is_empty() {
                "no providers configured".to_string()
            } else {
                skipped.join(",")
            },
        }
        .into())
    }

    /// Name of the pinned provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn cache(&self) -> &EmbeddingCache {
        &self.cache
    }

    fn embed_uncached(&self, text: &str) -> CovenantResult<Vec<f32>> {
        let vec = self.provider.embed(text)?;
        if vec.len() != self.dimensions {
            return Err(EmbeddingError::ProviderFailed {
                provider: self.provider.name().to_string(),
                reason: format!(
                    "returned {} dimensions, expected {}",
                    vec.len(),
                    self.dimensions
                ),
            }
            .into());
        }
        Ok(vec)
    }
}

impl IEmbeddingProvider for EmbeddingEngine {
    fn embed(&self, text: &str) -> CovenantResult<Vec<f32>> {
        let key = EmbeddingCache::key_for(text);
        if let Some(vec) = self.cache.get(&key) {
            debug!(hash = %key, "embedding cache hit");
            return Ok(vec);
        }

        let vec = self.embed_uncached(text)?;
        self.cache.insert(key, vec.clone());
        Ok(vec)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        self.provider.name()
    }

    fn is_available(&self) -> bool {
        self.provider.is_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::HashingEmbedder;

    fn hashing_engine() -> EmbeddingEngine {
        EmbeddingEngine::new(&EmbeddingConfig {
            dimensions: 64,
            ..Default::default()
        })
    }

    #[test]
    fn default_config_uses_hashing() {
        let engine = hashing_engine();
        assert_eq!(engine.provider_name(), "hashing");
        assert_eq!(engine.dimensions(), 64);
    }

    #[test]
    fn embed_returns_configured_dims() {
        let engine = hashing_engine();
        assert_eq!(engine.embed("contract").unwrap().len(), 64);
    }

    #[test]
    fn repeated_embed_hits_cache() {
        let engine = hashing_engine();
        let a = engine.embed("indemnification").unwrap();
        let b = engine.embed("indemnification").unwrap();
        assert_eq!(a, b);
        assert!(engine.cache().get(&EmbeddingCache::key_for("indemnification")).is_some());
    }

    #[test]
    fn select_with_no_candidates_fails() {
        assert!(EmbeddingEngine::select(Vec::new(), 16).is_err());
    }

    #[test]
    fn select_pins_first_candidate() {
        let candidates: Vec<Box<dyn IEmbeddingProvider>> =
            vec![Box::new(HashingEmbedder::new(8)), Box::new(HashingEmbedder::new(16))];
        let engine = EmbeddingEngine::select(candidates, 16).unwrap();
        assert_eq!(engine.dimensions(), 8);
        assert_eq!(engine.embed("x").unwrap().len(), 8);
    }
}

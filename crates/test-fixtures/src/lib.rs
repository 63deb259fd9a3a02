//! Shared test fixtures for the Covenant workspace.
//!
//! Provides deterministic embedding and completion providers with precisely
//! controllable similarity scores, failing collaborators for error-path tests,
//! and sample contracts and rules.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use covenant_core::errors::{CompletionError, CovenantResult, EmbeddingError};
use covenant_core::models::{KnowledgeCategory, KnowledgeEntry};
use covenant_core::traits::{ICompletionProvider, IEmbeddingProvider};

/// Embeds text as a normalised sum of one-hot axes, one per vocabulary term
/// the text contains (case-insensitive substring match).
///
/// Two texts sharing exactly one vocabulary term and nothing else score 1.0,
/// which makes threshold behaviour easy to pin down in tests.
pub struct AxisEmbedder {
    vocabulary: Vec<String>,
}

impl AxisEmbedder {
    pub fn new<S: AsRef<str>>(vocabulary: &[S]) -> Self {
        Self {
            vocabulary: vocabulary
                .iter()
                .map(|t| t.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Embedder over the vocabulary used by [`knowledge_entries`].
    pub fn legal() -> Self {
        Self::new(&LEGAL_VOCABULARY)
    }
}

/// Terms recognised by [`AxisEmbedder::legal`].
pub const LEGAL_VOCABULARY: [&str; 6] = [
    "binding",
    "elements",
    "damages",
    "termination",
    "arbitration",
    "confidential",
];

impl IEmbeddingProvider for AxisEmbedder {
    fn embed(&self, text: &str) -> CovenantResult<Vec<f32>> {
        let lower = text.to_lowercase();
        let mut v: Vec<f32> = self
            .vocabulary
            .iter()
            .map(|term| if lower.contains(term.as_str()) { 1.0 } else { 0.0 })
            .collect();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut v {
                *x /= norm;
            }
        }
        Ok(v)
    }

    fn dimensions(&self) -> usize {
        self.vocabulary.len()
    }

    fn name(&self) -> &str {
        "axis-test"
    }
}

/// Hash-based embedder: deterministic but semantically meaningless.
pub struct HashEmbedder {
    pub dims: usize,
}

impl IEmbeddingProvider for HashEmbedder {
    fn embed(&self, text: &str) -> CovenantResult<Vec<f32>> {
        let hash = blake3::hash(text.as_bytes());
        let bytes = hash.as_bytes();
        Ok((0..self.dims)
            .map(|i| (bytes[i % 32] as f32 / 255.0) * 2.0 - 1.0)
            .collect())
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    fn name(&self) -> &str {
        "hash-test"
    }
}

/// Axis embedder that can be taken offline mid-test through its [`OutageSwitch`].
pub struct OutageEmbedder {
    inner: AxisEmbedder,
    offline: Arc<AtomicBool>,
}

/// Handle that takes an [`OutageEmbedder`] offline.
#[derive(Clone)]
pub struct OutageSwitch(Arc<AtomicBool>);

impl OutageSwitch {
    pub fn trip(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl OutageEmbedder {
    /// Legal-vocabulary axis embedder plus the switch that breaks it.
    pub fn legal() -> (Self, OutageSwitch) {
        let offline = Arc::new(AtomicBool::new(false));
        let embedder = Self {
            inner: AxisEmbedder::legal(),
            offline: Arc::clone(&offline),
        };
        (embedder, OutageSwitch(offline))
    }
}

impl IEmbeddingProvider for OutageEmbedder {
    fn embed(&self, text: &str) -> CovenantResult<Vec<f32>> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(EmbeddingError::ProviderFailed {
                provider: "outage-test".to_string(),
                reason: "connection refused".to_string(),
            }
            .into());
        }
        self.inner.embed(text)
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        "outage-test"
    }
}

/// Embedder that reports itself unavailable and never embeds.
pub struct OfflineEmbedder;

impl IEmbeddingProvider for OfflineEmbedder {
    fn embed(&self, _text: &str) -> CovenantResult<Vec<f32>> {
        Err(EmbeddingError::ProviderUnavailable {
            provider: "offline-test".to_string(),
        }
        .into())
    }

    fn dimensions(&self) -> usize {
        LEGAL_VOCABULARY.len()
    }

    fn name(&self) -> &str {
        "offline-test"
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Embedder that always fails.
pub struct FailingEmbedder;

impl IEmbeddingProvider for FailingEmbedder {
    fn embed(&self, _text: &str) -> CovenantResult<Vec<f32>> {
        Err(EmbeddingError::ProviderFailed {
            provider: "failing-test".to_string(),
            reason: "embedding backend offline".to_string(),
        }
        .into())
    }

    fn dimensions(&self) -> usize {
        LEGAL_VOCABULARY.len()
    }

    fn name(&self) -> &str {
        "failing-test"
    }
}

/// Summarizer returning a fixed prefix plus the first line of the text.
/// Counts calls so tests can assert a stage did or did not run.
#[derive(Default)]
pub struct FirstLineSummarizer {
    calls: AtomicUsize,
}

impl FirstLineSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ICompletionProvider for FirstLineSummarizer {
    fn complete_summary(&self, text: &str, context: &str) -> CovenantResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let first = text.lines().next().unwrap_or_default().trim();
        let refs = context.lines().filter(|l| !l.trim().is_empty()).count();
        Ok(format!("Summary: {first} ({refs} references)"))
    }

    fn name(&self) -> &str {
        "first-line-test"
    }
}

/// Summarizer that always fails.
pub struct FailingSummarizer;

impl ICompletionProvider for FailingSummarizer {
    fn complete_summary(&self, _text: &str, _context: &str) -> CovenantResult<String> {
        Err(CompletionError::ProviderFailed {
            provider: "failing-test".to_string(),
            reason: "model timed out".to_string(),
        }
        .into())
    }

    fn name(&self) -> &str {
        "failing-test"
    }
}

/// Knowledge entries aligned with [`AxisEmbedder::legal`]: each entry
/// contains exactly one vocabulary term.
pub fn knowledge_entries() -> Vec<KnowledgeEntry> {
    vec![
        KnowledgeEntry::new(
            "A lawfully formed contract is binding on the parties.",
            "statute",
            KnowledgeCategory::Validity,
            "contract validity",
        ),
        KnowledgeEntry::new(
            "A contract should state its essential elements: parties, subject, price and term.",
            "checklist",
            KnowledgeCategory::Structure,
            "contract structure",
        ),
        KnowledgeEntry::new(
            "Liquidated damages should not greatly exceed the actual loss.",
            "advisory",
            KnowledgeCategory::Risk,
            "breach liability",
        ),
        KnowledgeEntry::new(
            "Unilateral termination rights must have clear and reasonable conditions.",
            "advisory",
            KnowledgeCategory::Risk,
            "termination",
        ),
        KnowledgeEntry::new(
            "An arbitration clause should name the institution and its rules.",
            "clause",
            KnowledgeCategory::Dispute,
            "dispute resolution",
        ),
    ]
}

/// Rules used across test suites.
pub const RULES_TOML: &str = r#"
[[compliance_checks]]
name = "Parties"
keywords = ["Party A", "Party B", "between"]
required = true

[[compliance_checks]]
name = "Price"
keywords = ["price", "fee", "USD"]
required = true

[[compliance_checks]]
name = "Dispute resolution"
keywords = ["arbitration", "court"]
required = true

[[compliance_checks]]
name = "Confidentiality"
keywords = ["confidential"]
required = false

[[risk_patterns]]
name = "Unilateral termination"
keywords = ["terminate at any time", "sole discretion"]
severity = "high"

[[risk_patterns]]
name = "Excessive liquidated damages"
keywords = ["liquidated damages"]
severity = "high"

[[risk_patterns]]
name = "Automatic renewal"
keywords = ["automatically renew"]
severity = "medium"

[[risk_patterns]]
name = "Notice by email"
keywords = ["by email"]
severity = "low"
"#;

/// Contract satisfying every required rule in [`RULES_TOML`] with no risks.
pub const CLEAN_CONTRACT: &str = "Service Agreement between Party A and Party B.\n\
The total price is 10,000 USD payable within 30 days.\n\
Disputes shall be settled by arbitration in Singapore.\n";

/// Contract missing the price and dispute clauses, with two high risks and
/// one medium risk.
pub const RISKY_CONTRACT: &str = "Supply Agreement between Party A and Party B.\n\
Party A may terminate at any time at its sole discretion.\n\
Party B shall pay liquidated damages of 200% of the order value.\n\
This agreement will automatically renew each year.\n";

/// Text matching no rule at all.
pub const BARE_TEXT: &str = "Lorem ipsum dolor sit amet.";

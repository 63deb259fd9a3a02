//! ScoreAggregator — folds risks and compliance gaps into a 1..=10 score.
//!
//! ```text
//! risk_weight = high_weight * highs + medium_weight * mediums + low_weight * lows
//! penalty     = min(risk_weight + gap_weight * gaps, max_penalty)
//! score       = max(base_score - penalty, min_score)
//! ```

use covenant_core::errors::{ConfigError, CovenantError, CovenantResult};
use covenant_core::models::{ComplianceFinding, RiskItem, Severity};

/// Score weights. Defaults: high 3, medium 2, low 0, gap 2, penalty cap 8,
/// base 10, floor 1.
pub use covenant_core::config::ScoringConfig as ScoreWeights;

/// Score with the default weights.
pub fn score(risks: &[RiskItem], compliance: &[ComplianceFinding]) -> u8 {
    ScoreAggregator::default().score(risks, compliance)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreAggregator {
    weights: ScoreWeights,
}

impl ScoreAggregator {
    /// Weights must keep every score within `[min_score, base_score]`, with
    /// `1 <= min_score` and `base_score <= 255`.
    pub fn new(weights: ScoreWeights) -> CovenantResult<Self> {
        if weights.min_score == 0 || weights.min_score > weights.base_score {
            return Err(invalid("scoring.min_score", "must be between 1 and scoring.base_score"));
        }
        if weights.base_score > u32::from(u8::MAX) {
            return Err(invalid("scoring.base_score", "must not exceed 255"));
        }
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    pub fn risk_weight(&self, risks: &[RiskItem]) -> u32 {
        risks
            .iter()
            .map(|r| match r.severity {
                Severity::High => self.weights.high_weight,
                Severity::Medium => self.weights.medium_weight,
                Severity::Low => self.weights.low_weight,
            })
            .fold(0u32, u32::saturating_add)
    }

    pub fn penalty(&self, risks: &[RiskItem], compliance: &[ComplianceFinding]) -> u32 {
        let gaps = u32::try_from(compliance.iter().filter(|c| c.is_gap()).count()).unwrap_or(u32::MAX);
        self.risk_weight(risks)
            .saturating_add(self.weights.gap_weight.saturating_mul(gaps))
            .min(self.weights.max_penalty)
    }

    pub fn score(&self, risks: &[RiskItem], compliance: &[ComplianceFinding]) -> u8 {
        let raw = self
            .weights
            .base_score
            .saturating_sub(self.penalty(risks, compliance))
            .max(self.weights.min_score);
        u8::try_from(raw).unwrap_or(u8::MAX)
    }
}

fn invalid(field: &str, message: &str) -> CovenantError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
    .into()
}

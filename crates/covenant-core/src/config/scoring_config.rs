use serde::{Deserialize, Serialize};

use super::defaults;

/// Risk score weights.
///
/// `score = max(base - min(weighted risks + gap_weight * gaps, max_penalty), min)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub base_score: u32,
    pub min_score: u32,
    pub high_weight: u32,
    pub medium_weight: u32,
    pub low_weight: u32,
    pub gap_weight: u32,
    pub max_penalty: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: defaults::DEFAULT_BASE_SCORE,
            min_score: defaults::DEFAULT_MIN_SCORE,
            high_weight: defaults::DEFAULT_HIGH_WEIGHT,
            medium_weight: defaults::DEFAULT_MEDIUM_WEIGHT,
            low_weight: defaults::DEFAULT_LOW_WEIGHT,
            gap_weight: defaults::DEFAULT_GAP_WEIGHT,
            max_penalty: defaults::DEFAULT_MAX_PENALTY,
        }
    }
}

//! # covenant-rules
//!
//! Deterministic contract checks driven by a declarative [`RuleSet`]:
//!
//! - [`RuleEngine`] runs compliance checks and risk patterns over raw text.
//! - [`ScoreAggregator`] folds risks and compliance gaps into a 1..=10 score.
//!
//! Rules are loaded once, validated, and shared read-only behind an `Arc`.

pub mod engine;
pub mod rule_set;
pub mod scoring;

pub use engine::RuleEngine;
pub use rule_set::RuleSet;
pub use scoring::{score, ScoreAggregator, ScoreWeights};

//! Stage trait + the six standard review stages.

mod calculate_score;
mod check_compliance;
mod generate_summary;
mod identify_risks;
mod parse;
mod retrieve_knowledge;

use std::sync::Arc;

use covenant_core::config::PipelineConfig;
use covenant_core::errors::CovenantResult;
use covenant_core::models::ReviewState;
use covenant_core::traits::ICompletionProvider;
use covenant_knowledge::KnowledgeStore;
use covenant_rules::{RuleEngine, ScoreAggregator};

pub use calculate_score::CalculateScoreStage;
pub use check_compliance::CheckComplianceStage;
pub use generate_summary::GenerateSummaryStage;
pub use identify_risks::IdentifyRisksStage;
pub use parse::ParseStage;
pub use retrieve_knowledge::RetrieveKnowledgeStage;

use crate::context::StageContext;

pub const PARSE: &str = "parse";
pub const RETRIEVE_KNOWLEDGE: &str = "retrieve_knowledge";
pub const CHECK_COMPLIANCE: &str = "check_compliance";
pub const IDENTIFY_RISKS: &str = "identify_risks";
pub const GENERATE_SUMMARY: &str = "generate_summary";
pub const CALCULATE_SCORE: &str = "calculate_score";

/// Standard stage ids in execution order.
pub const STANDARD_ORDER: [&str; 6] = [
    PARSE,
    RETRIEVE_KNOWLEDGE,
    CHECK_COMPLIANCE,
    IDENTIFY_RISKS,
    GENERATE_SUMMARY,
    CALCULATE_SCORE,
];

/// One step of the review pipeline.
///
/// A stage reads and writes the shared [`ReviewState`] and describes what it
/// did through the [`StageContext`]. Returning an error stops the run.
pub trait Stage: Send + Sync {
    /// Stable identifier, e.g. "check_compliance".
    fn id(&self) -> &str;

    /// Human-readable name for traces.
    fn display_name(&self) -> &str;

    fn execute(&self, state: &mut ReviewState, ctx: &mut StageContext) -> CovenantResult<()>;
}

/// Shared, read-only collaborators of the standard stages.
#[derive(Clone)]
pub struct ReviewServices {
    pub knowledge: Arc<KnowledgeStore>,
    pub rules: RuleEngine,
    pub scorer: ScoreAggregator,
    pub summarizer: Arc<dyn ICompletionProvider>,
}

/// The six standard stages, in order.
pub fn standard_stages(services: &ReviewServices, config: &PipelineConfig) -> Vec<Box<dyn Stage>> {
    vec![
        Box::new(ParseStage::new(config.parse_chunk_size, config.parse_chunk_overlap)),
        Box::new(RetrieveKnowledgeStage::new(Arc::clone(&services.knowledge))),
        Box::new(CheckComplianceStage::new(
            services.rules.clone(),
            Arc::clone(&services.knowledge),
        )),
        Box::new(IdentifyRisksStage::new(
            services.rules.clone(),
            Arc::clone(&services.knowledge),
        )),
        Box::new(GenerateSummaryStage::new(
            Arc::clone(&services.summarizer),
            config.summary_input_chars,
        )),
        Box::new(CalculateScoreStage::new(services.scorer)),
    ]
}

//! Shared builders for pipeline integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use covenant_core::config::{PipelineConfig, RetrievalConfig};
use covenant_core::errors::{CovenantResult, RuleError};
use covenant_core::models::ReviewState;
use covenant_core::traits::ICompletionProvider;
use covenant_knowledge::KnowledgeStore;
use covenant_pipeline::{PipelineEngine, ReviewServices, Stage, StageContext};
use covenant_rules::{RuleEngine, RuleSet, ScoreAggregator};
use test_fixtures::{knowledge_entries, AxisEmbedder, FirstLineSummarizer, RULES_TOML};

pub fn services_with(summarizer: Arc<dyn ICompletionProvider>) -> ReviewServices {
    let knowledge = KnowledgeStore::with_entries(
        Arc::new(AxisEmbedder::legal()),
        RetrievalConfig::default(),
        &knowledge_entries(),
    )
    .unwrap();
    ReviewServices {
        knowledge: Arc::new(knowledge),
        rules: RuleEngine::new(Arc::new(RuleSet::from_toml(RULES_TOML).unwrap())),
        scorer: ScoreAggregator::default(),
        summarizer,
    }
}

pub fn standard_engine() -> PipelineEngine {
    PipelineEngine::standard(
        services_with(Arc::new(FirstLineSummarizer::new())),
        PipelineConfig::default(),
    )
}

/// Appends its id to the summary and counts executions.
pub struct CountingStage {
    pub id: &'static str,
    pub runs: Arc<AtomicUsize>,
}

impl Stage for CountingStage {
    fn id(&self) -> &str {
        self.id
    }

    fn display_name(&self) -> &str {
        self.id
    }

    fn execute(&self, state: &mut ReviewState, ctx: &mut StageContext) -> CovenantResult<()> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        state.summary.push_str(self.id);
        ctx.progress("halfway", 0.5);
        ctx.output(self.id);
        Ok(())
    }
}

pub struct FailingStage;

impl Stage for FailingStage {
    fn id(&self) -> &str {
        "explode"
    }

    fn display_name(&self) -> &str {
        "Always fails"
    }

    fn execute(&self, _state: &mut ReviewState, ctx: &mut StageContext) -> CovenantResult<()> {
        ctx.input("anything");
        Err(RuleError::InvalidRule {
            name: "broken".into(),
            reason: "stage exploded".into(),
        }
        .into())
    }
}

pub struct SlowStage(pub Duration);

impl Stage for SlowStage {
    fn id(&self) -> &str {
        "slow"
    }

    fn display_name(&self) -> &str {
        "Slow stage"
    }

    fn execute(&self, _state: &mut ReviewState, _ctx: &mut StageContext) -> CovenantResult<()> {
        std::thread::sleep(self.0);
        Ok(())
    }
}

pub fn counting(id: &'static str, runs: &Arc<AtomicUsize>) -> Box<dyn Stage> {
    Box::new(CountingStage {
        id,
        runs: Arc::clone(runs),
    })
}

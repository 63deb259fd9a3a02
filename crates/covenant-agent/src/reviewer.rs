//! ContractReviewer — builds the pipeline from configuration and runs it.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use covenant_core::constants::VERSION;
use covenant_core::errors::{CovenantError, CovenantResult};
use covenant_core::models::{AnalysisResult, ReviewState};
use covenant_core::traits::{IEmbeddingProvider, ITextExtractor};
use covenant_core::CovenantConfig;
use covenant_embeddings::EmbeddingEngine;
use covenant_knowledge::KnowledgeStore;
use covenant_observability::batch_span;
use covenant_observability::tracing_setup::events;
use covenant_observability::{RunLog, RunLogEntry};
use covenant_pipeline::{PipelineEngine, ReviewServices, ReviewStream, RunTrace};
use covenant_rules::{RuleEngine, RuleSet, ScoreAggregator};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::completion::create_completion_provider;
use crate::extraction::PlainTextExtractor;

/// Outcome of one run together with its trace. The trace is kept for failed
/// runs too.
#[derive(Debug)]
pub struct TracedAnalysis {
    pub outcome: CovenantResult<AnalysisResult>,
    pub trace: RunTrace,
}

/// Entry point for contract review.
///
/// Safe to share across threads: every run owns its own state and trace.
pub struct ContractReviewer {
    engine: PipelineEngine,
    extractor: Box<dyn ITextExtractor>,
    run_log: Mutex<RunLog>,
}

impl ContractReviewer {
    /// Build every collaborator from a validated configuration.
    pub fn new(config: &CovenantConfig) -> CovenantResult<Self> {
        config.validate()?;

        let embedder: Arc<dyn IEmbeddingProvider> =
            Arc::new(EmbeddingEngine::new(&config.embedding));
        let knowledge = KnowledgeStore::new(embedder, config.retrieval.clone())?;
        let rules = RuleSet::from_config(&config.rules)?;

        let services = ReviewServices {
            knowledge: Arc::new(knowledge),
            rules: RuleEngine::new(Arc::new(rules)),
            scorer: ScoreAggregator::new(config.scoring)?,
            summarizer: create_completion_provider(&config.completion),
        };
        let engine = PipelineEngine::standard(services, config.pipeline.clone());
        info!(
            version = VERSION,
            stages = engine.stage_ids().len(),
            "contract reviewer ready"
        );

        Ok(Self::from_parts(
            engine,
            Box::new(PlainTextExtractor::new()),
            config.observability.run_log_capacity,
        ))
    }

    pub fn from_parts(
        engine: PipelineEngine,
        extractor: Box<dyn ITextExtractor>,
        run_log_capacity: usize,
    ) -> Self {
        Self {
            engine,
            extractor,
            run_log: Mutex::new(RunLog::with_capacity(run_log_capacity)),
        }
    }

    pub fn engine(&self) -> &PipelineEngine {
        &self.engine
    }

    /// Run the full review and return the verdict.
    pub fn analyze(&self, text: &str) -> CovenantResult<AnalysisResult> {
        self.analyze_with_trace(text).outcome
    }

    pub fn analyze_with_trace(&self, text: &str) -> TracedAnalysis {
        let mut trace = self.engine.new_trace();
        let started = Instant::now();
        let outcome = self
            .engine
            .run(ReviewState::new(text), &mut trace)
            .map(AnalysisResult::from);
        self.record(trace.run_id(), started.elapsed(), &outcome);
        TracedAnalysis { outcome, trace }
    }

    /// Incremental execution. Streamed runs are not added to the run log.
    pub fn analyze_stream(&self, text: &str) -> ReviewStream<'_> {
        self.engine.stream(ReviewState::new(text))
    }

    /// Extract the document's text, then review it.
    pub fn analyze_file(&self, path: &Path) -> CovenantResult<AnalysisResult> {
        let text = self.extractor.extract_text(path)?;
        self.analyze(&text)
    }

    /// Review independent texts in parallel. Results keep input order.
    pub fn analyze_batch(&self, texts: &[String]) -> Vec<CovenantResult<AnalysisResult>> {
        let span = batch_span!(texts.len());
        let _guard = span.enter();
        let started = Instant::now();

        let results: Vec<_> = texts.par_iter().map(|text| self.analyze(text)).collect();

        let succeeded = results.iter().filter(|r| r.is_ok()).count();
        events::batch_completed(texts.len(), succeeded, duration_ms(started.elapsed()));
        results
    }

    /// Snapshot of past runs' latency, score and outcome.
    pub fn run_log(&self) -> CovenantResult<RunLog> {
        self.run_log
            .lock()
            .map(|log| log.clone())
            .map_err(|e| CovenantError::ConcurrencyError(format!("run log lock poisoned: {e}")))
    }

    fn record(&self, run_id: &str, latency: Duration, outcome: &CovenantResult<AnalysisResult>) {
        let entry = match outcome {
            Ok(result) => RunLogEntry::succeeded(run_id, latency, result.score),
            Err(e) => RunLogEntry::failed(run_id, latency, e.failed_stage().map(str::to_string)),
        };
        match self.run_log.lock() {
            Ok(mut log) => log.record(entry),
            Err(e) => warn!(run_id, error = %e, "run log lock poisoned, run not recorded"),
        }
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

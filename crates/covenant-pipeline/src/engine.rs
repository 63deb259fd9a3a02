//! PipelineEngine — ordered stage execution with per-stage tracing.

use std::time::Instant;

use covenant_core::config::PipelineConfig;
use covenant_core::constants::PROCESS_NAME;
use covenant_core::errors::{CovenantResult, PipelineError};
use covenant_core::models::ReviewState;
use covenant_observability::tracing_setup::events;
use covenant_observability::{review_span, stage_span};

use crate::context::StageContext;
use crate::stages::{standard_stages, ReviewServices, Stage};
use crate::stream::ReviewStream;
use crate::trace::RunTrace;

/// Executes stages strictly in order over one [`ReviewState`].
///
/// The engine holds no per-run state: any number of runs may share it.
pub struct PipelineEngine {
    stages: Vec<Box<dyn Stage>>,
    config: PipelineConfig,
}

impl PipelineEngine {
    /// The six standard review stages.
    pub fn standard(services: ReviewServices, config: PipelineConfig) -> Self {
        let stages = standard_stages(&services, &config);
        Self::with_stages(stages, config)
    }

    /// A custom ordered stage list.
    pub fn with_stages(stages: Vec<Box<dyn Stage>>, config: PipelineConfig) -> Self {
        Self { stages, config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn stage_ids(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.id()).collect()
    }

    pub(crate) fn stages(&self) -> &[Box<dyn Stage>] {
        &self.stages
    }

    /// A fresh trace for a run of this engine.
    pub fn new_trace(&self) -> RunTrace {
        RunTrace::new(PROCESS_NAME)
    }

    pub(crate) fn is_disabled(&self, stage_id: &str) -> bool {
        self.config.disabled_stages.iter().any(|d| d == stage_id)
    }

    /// Run every stage to completion.
    ///
    /// On a stage failure no later stage runs and the error names the stage;
    /// `trace` keeps every event up to and including the failed one.
    pub fn run(&self, mut state: ReviewState, trace: &mut RunTrace) -> CovenantResult<ReviewState> {
        let run_id = trace.run_id().to_string();
        let span = review_span!(run_id);
        let _guard = span.enter();
        let started = Instant::now();

        for stage in &self.stages {
            if self.is_disabled(stage.id()) {
                self.skip_stage(stage.as_ref(), trace);
                continue;
            }
            let idx = trace.begin_stage(stage.id(), stage.display_name());
            if let Err(e) = self.execute_stage(stage.as_ref(), idx, &mut state, trace) {
                trace.finish();
                events::run_completed(&run_id, false, elapsed_ms(started), None);
                return Err(e);
            }
        }

        trace.finish();
        events::run_completed(&run_id, true, elapsed_ms(started), Some(state.score));
        Ok(state)
    }

    /// Pull-driven execution. No stage runs until the stream is polled.
    pub fn stream(&self, state: ReviewState) -> ReviewStream<'_> {
        ReviewStream::new(self, state, self.new_trace())
    }

    pub(crate) fn skip_stage(&self, stage: &dyn Stage, trace: &mut RunTrace) {
        trace.skip_stage(stage.id(), stage.display_name());
        events::stage_skipped(trace.run_id(), stage.id());
    }

    /// Execute one started stage and record its terminal transition.
    pub(crate) fn execute_stage(
        &self,
        stage: &dyn Stage,
        idx: usize,
        state: &mut ReviewState,
        trace: &mut RunTrace,
    ) -> CovenantResult<()> {
        let span = stage_span!(trace.run_id(), stage.id());
        let _guard = span.enter();
        events::stage_started(trace.run_id(), stage.id());
        trace.mark_in_progress(idx);

        let mut ctx = StageContext::new();
        let started = Instant::now();
        let result = stage.execute(state, &mut ctx);
        let duration_ms = elapsed_ms(started);
        let report = ctx.into_report();

        let error = match (result, self.config.stage_deadline_ms) {
            (Err(cause), _) => PipelineError::stage_failed(stage.id(), cause),
            (Ok(()), Some(deadline_ms)) if duration_ms > deadline_ms => {
                PipelineError::DeadlineExceeded {
                    stage_id: stage.id().to_string(),
                    elapsed_ms: duration_ms,
                    deadline_ms,
                }
            }
            (Ok(()), _) => {
                trace.complete_stage(idx, duration_ms, report);
                events::stage_completed(trace.run_id(), stage.id(), duration_ms);
                return Ok(());
            }
        };

        let message = match &error {
            PipelineError::StageFailed { cause, .. } => cause.to_string(),
            other => other.to_string(),
        };
        events::stage_failed(trace.run_id(), stage.id(), &message);
        trace.fail_stage(idx, duration_ms, report, message);
        Err(error.into())
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

//! ReviewStream — incremental, pull-driven pipeline execution.
//!
//! Event order for a successful run:
//!
//! ```text
//! (step_started, progress*, completed | skipped) × stages, result
//! ```
//!
//! A failing stage ends the stream with exactly one `error` event. The stream
//! is finite and not restartable; dropping it abandons the run. Every poll runs
//! inside the run's `covenant.review` span, as a blocking run does.

use std::collections::VecDeque;
use std::time::Instant;

use covenant_core::errors::CovenantError;
use covenant_core::models::ReviewState;
use covenant_observability::review_span;
use covenant_observability::tracing_setup::events;
use serde::{Deserialize, Serialize};
use tracing::Span;

use crate::engine::PipelineEngine;
use crate::trace::{RunTrace, TraceSummary};

/// One incremental pipeline event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StageEvent {
    StepStarted {
        stage_id: String,
        display_name: String,
        /// Zero-based position in the stage list.
        index: usize,
        total: usize,
    },
    Progress {
        stage_id: String,
        message: String,
        fraction: f32,
    },
    Completed {
        stage_id: String,
        duration_ms: u64,
        output_summary: Option<String>,
    },
    Skipped {
        stage_id: String,
    },
    Error {
        stage_id: String,
        message: String,
    },
    Result {
        state: Box<ReviewState>,
        summary: TraceSummary,
    },
}

impl StageEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StepStarted { .. } => "step_started",
            Self::Progress { .. } => "progress",
            Self::Completed { .. } => "completed",
            Self::Skipped { .. } => "skipped",
            Self::Error { .. } => "error",
            Self::Result { .. } => "result",
        }
    }

    /// `result` and `error` end the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Error { .. } | Self::Result { .. })
    }

    pub fn stage_id(&self) -> Option<&str> {
        match self {
            Self::StepStarted { stage_id, .. }
            | Self::Progress { stage_id, .. }
            | Self::Completed { stage_id, .. }
            | Self::Skipped { stage_id }
            | Self::Error { stage_id, .. } => Some(stage_id),
            Self::Result { .. } => None,
        }
    }
}

enum Phase {
    /// Next poll starts (or skips) stage `next`.
    Begin,
    /// Next poll executes the stage whose trace event is at this position.
    Execute(usize),
    Done,
}

/// Iterator over the events of one run.
pub struct ReviewStream<'a> {
    engine: &'a PipelineEngine,
    state: Option<ReviewState>,
    trace: RunTrace,
    next: usize,
    phase: Phase,
    pending: VecDeque<StageEvent>,
    failure: Option<CovenantError>,
    started: Instant,
    span: Span,
}

impl<'a> ReviewStream<'a> {
    pub(crate) fn new(engine: &'a PipelineEngine, state: ReviewState, trace: RunTrace) -> Self {
        let span = review_span!(trace.run_id());
        Self {
            engine,
            state: Some(state),
            trace,
            next: 0,
            phase: Phase::Begin,
            pending: VecDeque::new(),
            failure: None,
            started: Instant::now(),
            span,
        }
    }

    /// The trace so far.
    pub fn trace(&self) -> &RunTrace {
        &self.trace
    }

    pub fn into_trace(self) -> RunTrace {
        self.trace
    }

    /// The error that ended the run, once the `error` event was yielded.
    pub fn failure(&self) -> Option<&CovenantError> {
        self.failure.as_ref()
    }

    fn begin(&mut self) -> Option<StageEvent> {
        let engine = self.engine;
        let stages = engine.stages();
        let Some(stage) = stages.get(self.next) else {
            return Some(self.finish());
        };

        if engine.is_disabled(stage.id()) {
            engine.skip_stage(stage.as_ref(), &mut self.trace);
            self.next += 1;
            return Some(StageEvent::Skipped {
                stage_id: stage.id().to_string(),
            });
        }

        let idx = self.trace.begin_stage(stage.id(), stage.display_name());
        self.phase = Phase::Execute(idx);
        Some(StageEvent::StepStarted {
            stage_id: stage.id().to_string(),
            display_name: stage.display_name().to_string(),
            index: self.next,
            total: stages.len(),
        })
    }

    fn execute(&mut self, idx: usize) {
        let engine = self.engine;
        let stage = &engine.stages()[self.next];
        let state = self.state.get_or_insert_with(ReviewState::default);

        match engine.execute_stage(stage.as_ref(), idx, state, &mut self.trace) {
            Ok(()) => {
                let event = &self.trace.events()[idx];
                for note in &event.progress {
                    self.pending.push_back(StageEvent::Progress {
                        stage_id: stage.id().to_string(),
                        message: note.message.clone(),
                        fraction: note.fraction,
                    });
                }
                self.pending.push_back(StageEvent::Completed {
                    stage_id: stage.id().to_string(),
                    duration_ms: event.duration_ms.unwrap_or(0),
                    output_summary: event.output_summary.clone(),
                });
                self.next += 1;
                self.phase = Phase::Begin;
            }
            Err(e) => {
                let message = self.trace.events()[idx]
                    .error
                    .clone()
                    .unwrap_or_else(|| e.to_string());
                self.pending.push_back(StageEvent::Error {
                    stage_id: stage.id().to_string(),
                    message,
                });
                self.trace.finish();
                events::run_completed(self.trace.run_id(), false, self.elapsed_ms(), None);
                self.failure = Some(e);
                self.state = None;
                self.phase = Phase::Done;
            }
        }
    }

    fn finish(&mut self) -> StageEvent {
        self.trace.finish();
        self.phase = Phase::Done;
        let state = self.state.take().unwrap_or_default();
        events::run_completed(self.trace.run_id(), true, self.elapsed_ms(), Some(state.score));
        StageEvent::Result {
            state: Box::new(state),
            summary: self.trace.summary(),
        }
    }

    fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

impl Iterator for ReviewStream<'_> {
    type Item = StageEvent;

    fn next(&mut self) -> Option<StageEvent> {
        let span = self.span.clone();
        let _guard = span.enter();
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            match self.phase {
                Phase::Done => return None,
                Phase::Begin => return self.begin(),
                Phase::Execute(idx) => self.execute(idx),
            }
        }
    }
}

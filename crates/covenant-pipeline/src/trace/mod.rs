//! RunTrace — per-run record of stage transitions.
//!
//! A trace is owned by exactly one run. Each stage appends one
//! [`StageTraceEvent`] when it starts; afterwards only its terminal
//! transition (status, end time, duration, report, error) is written.

mod render;

use chrono::{DateTime, Utc};
use covenant_core::constants::PROCESS_NAME;
use covenant_core::errors::CovenantResult;
use serde::{Deserialize, Serialize};

use crate::context::StageReport;

/// Lifecycle of one stage within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Started,
    InProgress,
    Completed,
    Failed,
    Skipped,
}

impl StageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        }
    }

    /// Whether the stage has reached a final status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Skipped)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressNote {
    pub message: String,
    /// Completion fraction in `[0, 1]`.
    pub fraction: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub value: f64,
    pub unit: String,
}

/// Instrumentation record for one stage of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTraceEvent {
    pub stage_id: String,
    pub display_name: String,
    pub status: StageStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_ms: Option<u64>,
    pub input_summary: Option<String>,
    pub output_summary: Option<String>,
    pub progress: Vec<ProgressNote>,
    pub metrics: Vec<Metric>,
    pub warnings: Vec<String>,
    pub error: Option<String>,
}

impl StageTraceEvent {
    fn started(stage_id: &str, display_name: &str) -> Self {
        Self {
            stage_id: stage_id.to_string(),
            display_name: display_name.to_string(),
            status: StageStatus::Started,
            start_time: Utc::now(),
            end_time: None,
            duration_ms: None,
            input_summary: None,
            output_summary: None,
            progress: Vec::new(),
            metrics: Vec::new(),
            warnings: Vec::new(),
            error: None,
        }
    }

    fn close(&mut self, status: StageStatus, duration_ms: u64, report: StageReport) {
        self.status = status;
        self.end_time = Some(Utc::now());
        self.duration_ms = Some(duration_ms);
        self.input_summary = report.input_summary;
        self.output_summary = report.output_summary;
        self.progress = report.progress;
        self.metrics = report.metrics;
        self.warnings = report.warnings;
    }
}

/// Aggregate view of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceSummary {
    pub run_id: String,
    pub process_name: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub total_duration_ms: u64,
    pub total_steps: usize,
    pub completed_steps: usize,
    pub failed_steps: usize,
    pub skipped_steps: usize,
    /// `completed_steps / total_steps`, 0.0 for an empty trace.
    pub success_rate: f64,
    /// Ids of stages that actually executed, in order.
    pub stages_executed: Vec<String>,
}

#[derive(Serialize)]
struct TraceExport<'a> {
    summary: TraceSummary,
    events: &'a [StageTraceEvent],
}

/// Ordered stage events of a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunTrace {
    run_id: String,
    process_name: String,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    events: Vec<StageTraceEvent>,
}

impl Default for RunTrace {
    fn default() -> Self {
        Self::new(PROCESS_NAME)
    }
}

impl RunTrace {
    /// A fresh trace with a random run id, started now.
    pub fn new(process_name: impl Into<String>) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            process_name: process_name.into(),
            started_at: Utc::now(),
            finished_at: None,
            events: Vec::new(),
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn process_name(&self) -> &str {
        &self.process_name
    }

    pub fn events(&self) -> &[StageTraceEvent] {
        &self.events
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Append a `started` event and return its position.
    pub fn begin_stage(&mut self, stage_id: &str, display_name: &str) -> usize {
        self.events.push(StageTraceEvent::started(stage_id, display_name));
        self.events.len() - 1
    }

    /// Mark a started stage as executing.
    pub fn mark_in_progress(&mut self, idx: usize) {
        if let Some(event) = self.events.get_mut(idx) {
            if event.status == StageStatus::Started {
                event.status = StageStatus::InProgress;
            }
        }
    }

    pub fn complete_stage(&mut self, idx: usize, duration_ms: u64, report: StageReport) {
        if let Some(event) = self.open_event(idx) {
            event.close(StageStatus::Completed, duration_ms, report);
        }
    }

    pub fn fail_stage(&mut self, idx: usize, duration_ms: u64, report: StageReport, error: String) {
        if let Some(event) = self.open_event(idx) {
            event.close(StageStatus::Failed, duration_ms, report);
            event.error = Some(error);
        }
    }

    /// Append a stage that was not executed.
    pub fn skip_stage(&mut self, stage_id: &str, display_name: &str) {
        let mut event = StageTraceEvent::started(stage_id, display_name);
        event.close(StageStatus::Skipped, 0, StageReport::default());
        self.events.push(event);
    }

    /// Record the end of the run. Later calls keep the first end time.
    pub fn finish(&mut self) {
        if self.finished_at.is_none() {
            self.finished_at = Some(Utc::now());
        }
    }

    pub fn summary(&self) -> TraceSummary {
        let count = |status: StageStatus| self.events.iter().filter(|e| e.status == status).count();
        let total_steps = self.events.len();
        let completed_steps = count(StageStatus::Completed);
        let end = self.finished_at.unwrap_or_else(Utc::now);

        TraceSummary {
            run_id: self.run_id.clone(),
            process_name: self.process_name.clone(),
            started_at: self.started_at,
            finished_at: self.finished_at,
            total_duration_ms: u64::try_from((end - self.started_at).num_milliseconds()).unwrap_or(0),
            total_steps,
            completed_steps,
            failed_steps: count(StageStatus::Failed),
            skipped_steps: count(StageStatus::Skipped),
            success_rate: if total_steps == 0 {
                0.0
            } else {
                completed_steps as f64 / total_steps as f64
            },
            stages_executed: self
                .events
                .iter()
                .filter(|e| !matches!(e.status, StageStatus::Skipped))
                .map(|e| e.stage_id.clone())
                .collect(),
        }
    }

    /// Pretty JSON of the summary followed by every event.
    pub fn export_json(&self) -> CovenantResult<String> {
        let export = TraceExport {
            summary: self.summary(),
            events: &self.events,
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }

    /// Human-readable step-by-step report.
    pub fn render_text(&self) -> String {
        render::render_text(self)
    }

    /// Self-contained HTML version of [`RunTrace::render_text`].
    pub fn render_html(&self) -> String {
        render::render_html(self)
    }

    fn open_event(&mut self, idx: usize) -> Option<&mut StageTraceEvent> {
        self.events
            .get_mut(idx)
            .filter(|event| !event.status.is_terminal())
    }
}

//! Per-stage instrumentation collected while a stage executes.

use crate::trace::{Metric, ProgressNote};

/// What a stage reported about itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    pub input_summary: Option<String>,
    pub output_summary: Option<String>,
    pub progress: Vec<ProgressNote>,
    pub metrics: Vec<Metric>,
    pub warnings: Vec<String>,
}

/// Handed to every stage. Stages describe their input and output and may add
/// progress notes, metrics and warnings; the engine copies all of it into the
/// stage's trace event.
#[derive(Debug, Default)]
pub struct StageContext {
    report: StageReport,
}

impl StageContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&mut self, summary: impl Into<String>) {
        self.report.input_summary = Some(summary.into());
    }

    pub fn output(&mut self, summary: impl Into<String>) {
        self.report.output_summary = Some(summary.into());
    }

    /// Record a progress note. `fraction` is clamped to `[0, 1]`.
    pub fn progress(&mut self, message: impl Into<String>, fraction: f32) {
        self.report.progress.push(ProgressNote {
            message: message.into(),
            fraction: fraction.clamp(0.0, 1.0),
        });
    }

    pub fn metric(&mut self, name: impl Into<String>, value: f64, unit: impl Into<String>) {
        self.report.metrics.push(Metric {
            name: name.into(),
            value,
            unit: unit.into(),
        });
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(warning = %message, "stage warning");
        self.report.warnings.push(message);
    }

    pub fn into_report(self) -> StageReport {
        self.report
    }
}

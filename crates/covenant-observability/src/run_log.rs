//! Run performance logging: run id, latency, score, outcome.

use std::time::Duration;

use covenant_core::config::defaults::DEFAULT_RUN_LOG_CAPACITY;
use serde::{Deserialize, Serialize};

/// A single run log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunLogEntry {
    pub run_id: String,
    pub latency: Duration,
    /// Final score, `None` for failed runs.
    pub score: Option<u8>,
    pub failed_stage: Option<String>,
    pub timestamp_epoch_ms: i64,
}

impl RunLogEntry {
    /// A successful run, timestamped now.
    pub fn succeeded(run_id: impl Into<String>, latency: Duration, score: u8) -> Self {
        Self {
            run_id: run_id.into(),
            latency,
            score: Some(score),
            failed_stage: None,
            timestamp_epoch_ms: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// A failed run, timestamped now.
    pub fn failed(run_id: impl Into<String>, latency: Duration, failed_stage: Option<String>) -> Self {
        Self {
            run_id: run_id.into(),
            latency,
            score: None,
            failed_stage,
            timestamp_epoch_ms: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.score.is_some()
    }
}

/// Append-only run log, bounded to the most recent `max_entries`.
#[derive(Debug, Clone)]
pub struct RunLog {
    entries: Vec<RunLogEntry>,
    max_entries: usize,
}

impl Default for RunLog {
    fn default() -> Self {
        Self::new()
    }
}

impl RunLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_RUN_LOG_CAPACITY)
    }

    /// Create with a custom capacity.
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Record a run.
    pub fn record(&mut self, entry: RunLogEntry) {
        tracing::debug!(
            event = "run_logged",
            run_id = %entry.run_id,
            latency_ms = entry.latency.as_millis() as u64,
            score = ?entry.score,
            failed_stage = ?entry.failed_stage,
            "run logged"
        );

        self.entries.push(entry);
        if self.entries.len() > self.max_entries {
            self.entries.drain(..self.entries.len() - self.max_entries);
        }
    }

    pub fn entries(&self) -> &[RunLogEntry] {
        &self.entries
    }

    /// Total number of retained runs.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Average latency across retained runs.
    pub fn avg_latency(&self) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.entries.iter().map(|e| e.latency).sum();
        total / self.entries.len() as u32
    }

    /// Latency at the given percentile (0.0–1.0).
    pub fn latency_percentile(&self, p: f64) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let mut latencies: Vec<Duration> = self.entries.iter().map(|e| e.latency).collect();
        latencies.sort();
        let p = p.clamp(0.0, 1.0);
        let idx = ((p * (latencies.len() - 1) as f64).round() as usize).min(latencies.len() - 1);
        latencies[idx]
    }

    /// Fraction of retained runs that succeeded; 0.0 when empty.
    pub fn success_rate(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let ok = self.entries.iter().filter(|e| e.is_success()).count();
        ok as f64 / self.entries.len() as f64
    }

    /// Mean score of successful runs.
    pub fn avg_score(&self) -> Option<f64> {
        let scores: Vec<f64> = self
            .entries
            .iter()
            .filter_map(|e| e.score.map(f64::from))
            .collect();
        if scores.is_empty() {
            return None;
        }
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn empty_log_statistics() {
        let log = RunLog::new();
        assert_eq!(log.count(), 0);
        assert_eq!(log.avg_latency(), Duration::ZERO);
        assert_eq!(log.latency_percentile(0.95), Duration::ZERO);
        assert_eq!(log.success_rate(), 0.0);
        assert_eq!(log.avg_score(), None);
    }

    #[test]
    fn records_latency_and_outcome() {
        let mut log = RunLog::new();
        log.record(RunLogEntry::succeeded("a", ms(10), 10));
        log.record(RunLogEntry::succeeded("b", ms(30), 6));
        log.record(RunLogEntry::failed("c", ms(20), Some("generate_summary".into())));

        assert_eq!(log.count(), 3);
        assert_eq!(log.avg_latency(), ms(20));
        assert_eq!(log.latency_percentile(0.0), ms(10));
        assert_eq!(log.latency_percentile(1.0), ms(30));
        assert!((log.success_rate() - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(log.avg_score(), Some(8.0));
    }

    #[test]
    fn capacity_keeps_most_recent() {
        let mut log = RunLog::with_capacity(2);
        for i in 0..5 {
            log.record(RunLogEntry::succeeded(format!("run-{i}"), ms(i), 10));
        }
        let ids: Vec<_> = log.entries().iter().map(|e| e.run_id.as_str()).collect();
        assert_eq!(ids, ["run-3", "run-4"]);
    }
}

//! # covenant-pipeline
//!
//! Threads a [`ReviewState`](covenant_core::ReviewState) through an ordered
//! list of stages and records what each stage did.
//!
//! ```text
//! parse → retrieve_knowledge → check_compliance → identify_risks
//!       → generate_summary → calculate_score
//! ```
//!
//! Two execution modes share one stage executor:
//! - [`PipelineEngine::run`] blocks until the run finishes or a stage fails.
//! - [`PipelineEngine::stream`] returns a pull-driven [`ReviewStream`] that
//!   yields [`StageEvent`]s as stages start, report progress and finish.
//!
//! Every run appends one [`StageTraceEvent`] per stage to its [`RunTrace`].

pub mod context;
pub mod engine;
pub mod stages;
pub mod stream;
pub mod trace;

pub use context::{StageContext, StageReport};
pub use engine::PipelineEngine;
pub use stages::{ReviewServices, Stage};
pub use stream::{ReviewStream, StageEvent};
pub use trace::{Metric, ProgressNote, RunTrace, StageStatus, StageTraceEvent, TraceSummary};

//! Trace reports: plain text for terminals, self-contained HTML for browsers.

use std::fmt::Write;

use super::{RunTrace, StageStatus};

const RULE_WIDTH: usize = 60;

const INLINE_CSS: &str = "\
body { font-family: -apple-system, 'Segoe UI', sans-serif; margin: 2rem; color: #222; }
.summary { padding: 0.75rem 1rem; border-radius: 6px; background: #f3f4f6; margin-bottom: 1rem; }
.step { border-left: 4px solid #9ca3af; padding: 0.5rem 1rem; margin: 0.75rem 0; background: #fafafa; }
.status-completed { border-color: #16a34a; }
.status-failed { border-color: #dc2626; }
.status-skipped { border-color: #9ca3af; color: #6b7280; }
.status-started, .status-in_progress { border-color: #d97706; }
.meta { color: #6b7280; font-size: 0.9rem; }
.error { color: #dc2626; }
.warning { color: #d97706; }
";

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn status_entity(status: StageStatus) -> &'static str {
    match status {
        StageStatus::Completed => "&#x2713;",
        StageStatus::Failed => "&#x2717;",
        StageStatus::Skipped => "&#x2298;",
        StageStatus::Started | StageStatus::InProgress => "&#x2026;",
    }
}

fn status_symbol(status: StageStatus) -> &'static str {
    match status {
        StageStatus::Completed => "✓",
        StageStatus::Failed => "✗",
        StageStatus::Skipped => "⊘",
        StageStatus::Started | StageStatus::InProgress => "…",
    }
}

pub(super) fn render_text(trace: &RunTrace) -> String {
    let summary = trace.summary();
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Review trace: {} ({})", summary.process_name, summary.run_id);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(
        out,
        "Steps: {} total, {} completed, {} failed, {} skipped ({:.0}% success)",
        summary.total_steps,
        summary.completed_steps,
        summary.failed_steps,
        summary.skipped_steps,
        summary.success_rate * 100.0
    );
    let _ = writeln!(out, "Duration: {} ms", summary.total_duration_ms);

    for (i, event) in trace.events().iter().enumerate() {
        let duration = event
            .duration_ms
            .map(|ms| format!("{ms} ms"))
            .unwrap_or_else(|| "n/a".to_string());
        let _ = writeln!(
            out,
            "\n{} Step {}: {} ({}) [{}, {}]",
            status_symbol(event.status),
            i + 1,
            event.display_name,
            event.stage_id,
            event.status.as_str(),
            duration
        );
        if let Some(input) = &event.input_summary {
            let _ = writeln!(out, "    input:   {input}");
        }
        if let Some(output) = &event.output_summary {
            let _ = writeln!(out, "    output:  {output}");
        }
        for note in &event.progress {
            let _ = writeln!(out, "    progress: {} ({:.0}%)", note.message, note.fraction * 100.0);
        }
        for metric in &event.metrics {
            let _ = writeln!(out, "    metric:  {} = {} {}", metric.name, metric.value, metric.unit);
        }
        for warning in &event.warnings {
            let _ = writeln!(out, "    warning: {warning}");
        }
        if let Some(error) = &event.error {
            let _ = writeln!(out, "    error:   {error}");
        }
    }
    let _ = write!(out, "{rule}");
    out
}

pub(super) fn render_html(trace: &RunTrace) -> String {
    let summary = trace.summary();
    let process = escape_html(&summary.process_name);
    let mut html = String::with_capacity(4096);

    let _ = writeln!(html, "<!DOCTYPE html>\n<html lang=\"en\">\n<head>");
    let _ = writeln!(html, "<meta charset=\"UTF-8\">");
    let _ = writeln!(html, "<title>Review trace: {process}</title>");
    let _ = writeln!(html, "<style>\n{INLINE_CSS}</style>\n</head>\n<body>");
    let _ = writeln!(html, "<div class=\"trace\" data-run-id=\"{}\">", escape_html(&summary.run_id));
    let _ = writeln!(html, "<h1>Review trace: {process}</h1>");
    let _ = writeln!(
        html,
        "<div class=\"summary\">{} steps &middot; {} completed &middot; {} failed &middot; {} skipped \
         &middot; {:.0}% success &middot; {} ms</div>",
        summary.total_steps,
        summary.completed_steps,
        summary.failed_steps,
        summary.skipped_steps,
        summary.success_rate * 100.0,
        summary.total_duration_ms
    );

    for (i, event) in trace.events().iter().enumerate() {
        let duration = event
            .duration_ms
            .map(|ms| format!("{ms} ms"))
            .unwrap_or_else(|| "n/a".to_string());
        let _ = writeln!(html, "<div class=\"step status-{}\">", event.status.as_str());
        let _ = writeln!(
            html,
            "<h2>{} Step {}: {}</h2>",
            status_entity(event.status),
            i + 1,
            escape_html(&event.display_name)
        );
        let _ = writeln!(
            html,
            "<div class=\"meta\"><code>{}</code> &middot; {} &middot; {}</div>",
            escape_html(&event.stage_id),
            event.status.as_str(),
            duration
        );
        if let Some(input) = &event.input_summary {
            let _ = writeln!(html, "<p><strong>Input:</strong> {}</p>", escape_html(input));
        }
        if let Some(output) = &event.output_summary {
            let _ = writeln!(html, "<p><strong>Output:</strong> {}</p>", escape_html(output));
        }
        if !event.progress.is_empty() || !event.metrics.is_empty() {
            let _ = writeln!(html, "<ul>");
            for note in &event.progress {
                let _ = writeln!(
                    html,
                    "<li>{} ({:.0}%)</li>",
                    escape_html(&note.message),
                    note.fraction * 100.0
                );
            }
            for metric in &event.metrics {
                let _ = writeln!(
                    html,
                    "<li>{} = {} {}</li>",
                    escape_html(&metric.name),
                    metric.value,
                    escape_html(&metric.unit)
                );
            }
            let _ = writeln!(html, "</ul>");
        }
        for warning in &event.warnings {
            let _ = writeln!(html, "<p class=\"warning\">{}</p>", escape_html(warning));
        }
        if let Some(error) = &event.error {
            let _ = writeln!(html, "<p class=\"error\">{}</p>", escape_html(error));
        }
        let _ = writeln!(html, "</div>");
    }

    let _ = write!(html, "</div>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use crate::context::StageReport;
    use crate::trace::{Metric, RunTrace};

    #[test]
    fn renders_every_step_with_details() {
        let mut trace = RunTrace::new("contract_review");
        let idx = trace.begin_stage("parse", "Parse document");
        trace.complete_stage(
            idx,
            3,
            StageReport {
                input_summary: Some("120 chars".into()),
                metrics: vec![Metric {
                    name: "lines".into(),
                    value: 4.0,
                    unit: "lines".into(),
                }],
                ..Default::default()
            },
        );
        let failed = trace.begin_stage("generate_summary", "Generate summary");
        trace.fail_stage(failed, 7, StageReport::default(), "model timed out".into());
        trace.finish();

        let text = trace.render_text();
        assert!(text.contains(trace.run_id()));
        assert!(text.contains("✓ Step 1: Parse document (parse) [completed, 3 ms]"));
        assert!(text.contains("input:   120 chars"));
        assert!(text.contains("metric:  lines = 4 lines"));
        assert!(text.contains("✗ Step 2: Generate summary (generate_summary) [failed, 7 ms]"));
        assert!(text.contains("error:   model timed out"));
        assert!(text.contains("2 total, 1 completed, 1 failed, 0 skipped (50% success)"));
    }

    #[test]
    fn html_report_has_one_card_per_step() {
        let mut trace = RunTrace::new("contract_review");
        let parse = trace.begin_stage("parse", "Parse document");
        trace.complete_stage(
            parse,
            2,
            StageReport {
                output_summary: Some("4 lines".into()),
                ..Default::default()
            },
        );
        trace.skip_stage("retrieve_knowledge", "Retrieve knowledge");
        trace.finish();

        let html = trace.render_html();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.trim_end().ends_with("</html>"));
        assert!(html.contains(trace.run_id()));
        assert_eq!(html.matches("<div class=\"step ").count(), 2);
        assert!(html.contains("<div class=\"step status-completed\">"));
        assert!(html.contains("<div class=\"step status-skipped\">"));
        assert!(html.contains("<p><strong>Output:</strong> 4 lines</p>"));
    }

    #[test]
    fn html_report_escapes_stage_text() {
        let mut trace = RunTrace::new("contract_review");
        let idx = trace.begin_stage("generate_summary", "Generate summary");
        trace.fail_stage(
            idx,
            1,
            StageReport {
                input_summary: Some("Party A & <Party B>".into()),
                ..Default::default()
            },
            "bad \"quote\" <script>".into(),
        );
        trace.finish();

        let html = trace.render_html();
        assert!(html.contains("Party A &amp; &lt;Party B&gt;"));
        assert!(html.contains("<p class=\"error\">bad &quot;quote&quot; &lt;script&gt;</p>"));
        assert!(!html.contains("<script>"));
    }
}

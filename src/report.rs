//! Rendering an [`AnalysisReport`] for people (text) or tools (JSON).

use std::{fmt::Write as _, io};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    bench_meta::{ExecutionMode, ModeLabels},
    classify::{AnalysisOutcome, AnalysisReport, Severity, VariantIssues},
    errors::{PerfBaselineError, Result},
};

const RULE_WIDTH: usize = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    outcome: AnalysisOutcome,
    labels: &'a ModeLabels,
    #[serde(flatten)]
    report: &'a AnalysisReport,
}

pub fn render_json(report: &AnalysisReport, labels: &ModeLabels) -> Result<String> {
    let doc = JsonReport {
        outcome: report.outcome(),
        labels,
        report,
    };
    serde_json::to_string_pretty(&doc).map_err(|e| PerfBaselineError::invalid_report(e.to_string()))
}

pub fn render_text(report: &AnalysisReport, labels: &ModeLabels) -> String {
    let mut out = String::new();
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let baseline = labels.label(ExecutionMode::Baseline);
    let variant_names: Vec<&str> = report
        .variants
        .iter()
        .map(|v| labels.label(v.mode))
        .collect();

    let _ = writeln!(out, "{heavy}");
    let _ = writeln!(
        out,
        "PERFORMANCE ANALYSIS: {} vs {baseline}",
        variant_names.join(" & ")
    );
    let _ = writeln!(out, "{heavy}");

    let percent = ((report.thresholds.review - 1.0) * 100.0).round() as i64;
    for variant in &report.variants {
        let name = labels.label(variant.mode);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Subjects where {name} is >{percent}% slower than {baseline}:"
        );
        let _ = writeln!(out, "{light}");
        let _ = writeln!(
            out,
            "{:<20} {:<15} {:<15} {:>8} {:<20}",
            "Subject",
            format!("{baseline} (ns)"),
            format!("{name} (ns)"),
            "Ratio",
            "Status"
        );
        let _ = writeln!(out, "{light}");
        for issue in &variant.issues {
            let _ = writeln!(
                out,
                "{:<20} {:>13}  {:>13}  {:>7.2}x {:<20}",
                issue.subject_name,
                group_thousands(issue.baseline_mean),
                group_thousands(issue.variant_mean),
                issue.ratio,
                issue.severity.tag()
            );
        }
        if variant.is_empty() {
            let _ = writeln!(out, "No significant {name} performance issues found");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{heavy}");
    let _ = writeln!(out, "SUMMARY STATISTICS");
    let _ = writeln!(out, "{heavy}");
    for variant in &report.variants {
        let Some(summary) = &variant.summary else {
            continue;
        };
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{} Issues Found: {}",
            labels.label(variant.mode),
            summary.count
        );
        let _ = writeln!(out, "  Average slowdown: {:.2}x", summary.average_ratio);
        let _ = writeln!(
            out,
            "  Worst case: {} at {:.2}x slower",
            summary.worst.subject_name, summary.worst.ratio
        );
    }

    if report.has_issues() {
        write_recommendations(&mut out, report, labels);
    } else {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "All {} implementations perform within acceptable range!",
            variant_names.join(" and ")
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{heavy}");
    out
}

fn write_recommendations(out: &mut String, report: &AnalysisReport, labels: &ModeLabels) {
    let heavy = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out);
    let _ = writeln!(out, "{heavy}");
    let _ = writeln!(out, "RECOMMENDATIONS");
    let _ = writeln!(out, "{heavy}");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Subjects to investigate for potential O(n²) or inefficient implementations:"
    );

    let critical = report.thresholds.critical;
    let review = report.thresholds.review;
    for variant in &report.variants {
        write_bucket(
            out,
            variant,
            Severity::Critical,
            &format!(
                "CRITICAL {} implementations (>={critical}x slower):",
                labels.label(variant.mode)
            ),
        );
    }
    for variant in &report.variants {
        write_bucket(
            out,
            variant,
            Severity::Review,
            &format!(
                "{} implementations to review ({review}x-{critical}x slower):",
                labels.label(variant.mode)
            ),
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Potential causes of slowdowns:");
    for hint in &report.hints {
        let _ = writeln!(out, "  * {hint}");
    }
}

fn write_bucket(out: &mut String, variant: &VariantIssues, severity: Severity, title: &str) {
    let bucket = variant.bucket(severity);
    if bucket.is_empty() {
        return;
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{title}");
    for issue in bucket {
        match severity {
            Severity::Critical => {
                let _ = writeln!(
                    out,
                    "   - {}: {:.2}x slower ({} ns vs {} ns)",
                    issue.subject_name,
                    issue.ratio,
                    group_thousands(issue.variant_mean),
                    group_thousands(issue.baseline_mean)
                );
            }
            Severity::Review => {
                let _ = writeln!(out, "   - {}: {:.2}x slower", issue.subject_name, issue.ratio);
            }
        }
    }
}

/// Round to whole nanoseconds and separate thousands with commas.
pub fn group_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3 + 1);
    if value < 0.0 && rounded != "0" {
        grouped.push('-');
    }
    for (idx, ch) in rounded.chars().enumerate() {
        if idx > 0 && (rounded.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Write the report in `format` to `writer`.
pub fn write_report<W: io::Write>(
    writer: &mut W,
    report: &AnalysisReport,
    labels: &ModeLabels,
    format: OutputFormat,
) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => render_text(report, labels),
        OutputFormat::Json => render_json(report, labels)? + "\n",
    };
    writer.write_all(rendered.as_bytes())?;
    writer.flush()?;
    Ok(())
}

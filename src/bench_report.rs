//! Reading benchmark reports into per-subject mean times.
//!
//! A report is a JSON object with a `Benchmarks` array; each entry names the
//! benchmarked method and carries a `Statistics.Mean` in nanoseconds:
//!
//! ```json
//! {"Benchmarks": [{"Method": "ToAdl", "Statistics": {"Mean": 1520.4}}]}
//! ```
//!
//! Method names encode the execution mode (`ToAdl`, `AdlHub`, `AdlList`), so
//! they are normalized back to the subject (`Adl`) before comparison.

use std::{fs, path::Path};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    bench_meta::{BenchmarkRecord, ExecutionMode, SubjectMeans},
    errors::{PerfBaselineError, Result},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AffixRule {
    Prefix(&'static str),
    Suffix(&'static str),
}

impl AffixRule {
    pub fn strip<'a>(&self, raw: &'a str) -> Option<&'a str> {
        match self {
            AffixRule::Prefix(prefix) => raw.strip_prefix(prefix),
            AffixRule::Suffix(suffix) => raw.strip_suffix(suffix),
        }
    }
}

/// Checked in order; the first rule that matches decides the subject.
pub const AFFIX_RULES: &[AffixRule] = &[
    AffixRule::Prefix("To"),
    AffixRule::Suffix("Hub"),
    AffixRule::Suffix("List"),
    AffixRule::Suffix("Batch"),
    AffixRule::Suffix("Series"),
    AffixRule::Suffix("Stream"),
    AffixRule::Suffix("Buffer"),
];

/// Recover the subject name from a raw method identifier.
///
/// An identifier that is nothing but an affix (`To`, `Hub`) is kept as is.
pub fn normalize_subject(raw: &str) -> String {
    AFFIX_RULES
        .iter()
        .find_map(|rule| rule.strip(raw))
        .filter(|stripped| !stripped.is_empty())
        .unwrap_or(raw)
        .to_string()
}

/// Every usable entry of a report, in document order, names normalized.
pub fn parse_records(text: &str) -> Result<Vec<BenchmarkRecord>> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| PerfBaselineError::invalid_report(e.to_string()))?;
    let root = value
        .as_object()
        .ok_or_else(|| PerfBaselineError::invalid_report("top-level value must be an object"))?;
    let entries = match root.get("Benchmarks") {
        None => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            return Err(PerfBaselineError::invalid_report(
                "`Benchmarks` must be an array",
            ));
        }
    };

    let mut records = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        let Some(entry) = entry.as_object() else {
            warn!(index = idx, "skipping benchmark entry that is not an object");
            continue;
        };
        let method = entry.get("Method").and_then(Value::as_str).unwrap_or("");
        if method.is_empty() {
            debug!(index = idx, "skipping benchmark entry without a method");
            continue;
        }
        let mean_time = match entry
            .get("Statistics")
            .and_then(|stats| stats.get("Mean"))
            .and_then(Value::as_f64)
        {
            Some(mean) => mean,
            None => {
                debug!(method, "missing mean statistic, treating as no data");
                0.0
            }
        };
        records.push(BenchmarkRecord {
            subject_name: normalize_subject(method),
            mean_time,
        });
    }
    Ok(records)
}

/// Collapse a report into subject means. Later entries win on collisions.
pub fn parse_report_str(text: &str) -> Result<SubjectMeans> {
    let records = parse_records(text)?;
    let mut means = SubjectMeans::with_capacity(records.len());
    for record in records {
        if let Some(previous) = means.insert(record.subject_name.clone(), record.mean_time) {
            debug!(
                subject = %record.subject_name,
                previous,
                current = record.mean_time,
                "duplicate subject after normalization, keeping later entry"
            );
        }
    }
    Ok(means)
}

/// Load the report for `mode` from disk.
pub fn parse_report_file(mode: ExecutionMode, path: &Path) -> Result<SubjectMeans> {
    let text = fs::read_to_string(path)
        .map_err(|e| PerfBaselineError::parse(mode, path, e.to_string()))?;
    let means = parse_report_str(&text).map_err(|err| match err {
        PerfBaselineError::InvalidReport(reason) => PerfBaselineError::parse(mode, path, reason),
        other => other,
    })?;
    info!(%mode, path = %path.display(), subjects = means.len(), "loaded report");
    Ok(means)
}

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    bench_meta::ExecutionMode,
    errors::{PerfBaselineError, Result},
    reconcile::ComparisonResult,
};

pub const DEFAULT_REVIEW_THRESHOLD: f64 = 1.3;
pub const DEFAULT_CRITICAL_THRESHOLD: f64 = 2.0;

/// Appended to every report that flags at least one subject.
pub const REMEDIATION_HINTS: &[&str] = &[
    "O(n²) complexity in loops (nested iterations)",
    "Unnecessary allocations or collection copies in hot paths",
    "Inefficient lookback/window operations",
    "Missing span optimizations or iterator chains in tight loops",
    "Redundant calculations not cached properly",
];

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub review: f64,
    pub critical: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            review: DEFAULT_REVIEW_THRESHOLD,
            critical: DEFAULT_CRITICAL_THRESHOLD,
        }
    }
}

impl Thresholds {
    pub fn new(review: f64, critical: f64) -> Result<Self> {
        let thresholds = Self { review, critical };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.review.is_finite() || self.review <= 0.0 {
            return Err(PerfBaselineError::invalid_config(format!(
                "review threshold must be a positive number, got {}",
                self.review
            )));
        }
        if !self.critical.is_finite() || self.critical < self.review {
            return Err(PerfBaselineError::invalid_config(format!(
                "critical threshold {} must be finite and not below review threshold {}",
                self.critical, self.review
            )));
        }
        Ok(())
    }

    /// Severity of a ratio, `None` when it stays within bounds.
    pub fn severity(&self, ratio: f64) -> Option<Severity> {
        if ratio >= self.critical {
            Some(Severity::Critical)
        } else if ratio > self.review {
            Some(Severity::Review)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Review,
    Critical,
}

impl Severity {
    pub fn tag(self) -> &'static str {
        match self {
            Severity::Review => "REVIEW",
            Severity::Critical => "CRITICAL",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlaggedResult {
    pub subject_name: String,
    pub baseline_mean: f64,
    pub variant_mean: f64,
    pub ratio: f64,
    pub severity: Severity,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IssueSummary {
    pub count: usize,
    pub average_ratio: f64,
    pub worst: FlaggedResult,
}

impl IssueSummary {
    fn from_issues(issues: &[FlaggedResult]) -> Option<Self> {
        let first = issues.first()?;
        let worst = issues
            .iter()
            .fold(first, |best, issue| if issue.ratio > best.ratio { issue } else { best });
        let total: f64 = issues.iter().map(|issue| issue.ratio).sum();
        Some(Self {
            count: issues.len(),
            average_ratio: total / issues.len() as f64,
            worst: worst.clone(),
        })
    }
}

/// Flagged subjects for one variant mode, in subject order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VariantIssues {
    pub mode: ExecutionMode,
    pub issues: Vec<FlaggedResult>,
    pub summary: Option<IssueSummary>,
}

impl VariantIssues {
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues of one severity, worst ratio first.
    pub fn bucket(&self, severity: Severity) -> Vec<&FlaggedResult> {
        let mut bucket: Vec<&FlaggedResult> = self
            .issues
            .iter()
            .filter(|issue| issue.severity == severity)
            .collect();
        bucket.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));
        bucket
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AnalysisOutcome {
    Clean,
    Regressed { critical: usize, review: usize },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub thresholds: Thresholds,
    pub comparisons: Vec<ComparisonResult>,
    pub variants: Vec<VariantIssues>,
    pub hints: Vec<&'static str>,
}

impl AnalysisReport {
    pub fn variant(&self, mode: ExecutionMode) -> Option<&VariantIssues> {
        self.variants.iter().find(|v| v.mode == mode)
    }

    pub fn has_issues(&self) -> bool {
        self.variants.iter().any(|v| !v.is_empty())
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.variants.iter().map(|v| v.count(severity)).sum()
    }

    pub fn outcome(&self) -> AnalysisOutcome {
        if !self.has_issues() {
            return AnalysisOutcome::Clean;
        }
        AnalysisOutcome::Regressed {
            critical: self.count(Severity::Critical),
            review: self.count(Severity::Review),
        }
    }
}

/// Flag every variant whose ratio exceeds the review threshold.
///
/// A variant without a measurement has ratio 0 and is never flagged.
pub fn flag_variant(
    results: &[ComparisonResult],
    mode: ExecutionMode,
    thresholds: &Thresholds,
) -> VariantIssues {
    let issues: Vec<FlaggedResult> = results
        .iter()
        .filter(|result| result.mean(mode) > 0.0)
        .filter_map(|result| {
            let ratio = result.ratio(mode);
            let severity = thresholds.severity(ratio)?;
            debug!(subject = %result.subject_name, %mode, ratio, ?severity, "flagged");
            Some(FlaggedResult {
                subject_name: result.subject_name.clone(),
                baseline_mean: result.baseline_mean,
                variant_mean: result.mean(mode),
                ratio,
                severity,
            })
        })
        .collect();
    let summary = IssueSummary::from_issues(&issues);
    VariantIssues {
        mode,
        issues,
        summary,
    }
}

pub fn classify(results: Vec<ComparisonResult>, thresholds: &Thresholds) -> AnalysisReport {
    let variants: Vec<VariantIssues> = ExecutionMode::variants()
        .map(|mode| flag_variant(&results, mode, thresholds))
        .collect();
    let has_issues = variants.iter().any(|v| !v.is_empty());
    let report = AnalysisReport {
        thresholds: *thresholds,
        comparisons: results,
        variants,
        hints: if has_issues {
            REMEDIATION_HINTS.to_vec()
        } else {
            Vec::new()
        },
    };
    info!(outcome = ?report.outcome(), "classified comparisons");
    report
}

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::classify::{AnalysisReport, Severity};

/// Lowest severity that fails the gate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FailOn {
    #[default]
    #[serde(rename = "none")]
    #[value(name = "none")]
    Never,
    Critical,
    Review,
}

impl FailOn {
    fn fails(self, severity: Severity) -> bool {
        match self {
            FailOn::Never => false,
            FailOn::Critical => severity == Severity::Critical,
            FailOn::Review => true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GateReport {
    pub passed: bool,
    pub reasons: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct GateEnforcer {
    fail_on: FailOn,
}

impl GateEnforcer {
    pub fn new(fail_on: FailOn) -> Self {
        Self { fail_on }
    }

    pub fn evaluate(&self, report: &AnalysisReport) -> GateReport {
        let mut reasons = Vec::new();
        for variant in &report.variants {
            for issue in &variant.issues {
                if self.fail_on.fails(issue.severity) {
                    reasons.push(format!(
                        "{} {} regression: ratio={:.2} baseline={}ns current={}ns",
                        variant.mode,
                        issue.subject_name,
                        issue.ratio,
                        issue.baseline_mean,
                        issue.variant_mean
                    ));
                }
            }
        }
        GateReport {
            passed: reasons.is_empty(),
            reasons,
        }
    }
}

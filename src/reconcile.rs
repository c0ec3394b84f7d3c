use serde::Serialize;
use tracing::debug;

use crate::bench_meta::{ExecutionMode, ModeSet};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VariantMeasure {
    pub mode: ExecutionMode,
    pub mean: f64,
    pub ratio: f64,
}

/// One subject measured under the baseline and every variant mode.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub subject_name: String,
    pub baseline_mean: f64,
    pub variants: Vec<VariantMeasure>,
}

impl ComparisonResult {
    fn measure(&self, mode: ExecutionMode) -> Option<&VariantMeasure> {
        self.variants.iter().find(|m| m.mode == mode)
    }

    /// Mean under `mode`; the baseline mean for `Baseline`, 0 when unmeasured.
    pub fn mean(&self, mode: ExecutionMode) -> f64 {
        if mode.is_baseline() {
            return self.baseline_mean;
        }
        self.measure(mode).map_or(0.0, |m| m.mean)
    }

    /// `mean(mode) / baseline_mean`, or 0 when the variant has no data.
    pub fn ratio(&self, mode: ExecutionMode) -> f64 {
        if mode.is_baseline() {
            return 1.0;
        }
        self.measure(mode).map_or(0.0, |m| m.ratio)
    }

    pub fn variant_a_mean(&self) -> f64 {
        self.mean(ExecutionMode::VariantA)
    }

    pub fn variant_b_mean(&self) -> f64 {
        self.mean(ExecutionMode::VariantB)
    }

    pub fn ratio_a(&self) -> f64 {
        self.ratio(ExecutionMode::VariantA)
    }

    pub fn ratio_b(&self) -> f64 {
        self.ratio(ExecutionMode::VariantB)
    }
}

pub fn ratio(variant_mean: f64, baseline_mean: f64) -> f64 {
    if variant_mean > 0.0 {
        variant_mean / baseline_mean
    } else {
        0.0
    }
}

/// Join all modes on subject name, ordered by subject.
///
/// Only subjects with a positive baseline mean produce a result; a variant
/// measured for a subject the baseline lacks has nothing to divide by.
pub fn reconcile(modes: &ModeSet) -> Vec<ComparisonResult> {
    let Some(baseline) = modes.baseline() else {
        debug!("no baseline report, nothing to reconcile");
        return Vec::new();
    };
    let mut subjects: Vec<(&str, f64)> = baseline
        .iter()
        .filter(|(_, mean)| **mean > 0.0)
        .map(|(name, mean)| (name.as_str(), *mean))
        .collect();
    subjects.sort_by(|a, b| a.0.cmp(b.0));

    let results: Vec<ComparisonResult> = subjects
        .into_iter()
        .map(|(subject, baseline_mean)| ComparisonResult {
            subject_name: subject.to_string(),
            baseline_mean,
            variants: ExecutionMode::variants()
                .map(|mode| {
                    let mean = modes.mean(mode, subject);
                    VariantMeasure {
                        mode,
                        mean,
                        ratio: ratio(mean, baseline_mean),
                    }
                })
                .collect(),
        })
        .collect();
    debug!(
        baseline_subjects = baseline.len(),
        compared = results.len(),
        "reconciled modes"
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_is_zero_without_measurement() {
        assert_eq!(ratio(0.0, 100.0), 0.0);
        assert_eq!(ratio(-5.0, 100.0), 0.0);
        assert_eq!(ratio(150.0, 100.0), 1.5);
    }

    #[test]
    fn test_reconcile_without_baseline_is_empty() {
        assert!(reconcile(&ModeSet::new()).is_empty());
    }
}

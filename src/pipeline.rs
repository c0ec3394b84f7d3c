use tracing::info;

use crate::{
    bench_meta::{ExecutionMode, ModeSet},
    bench_report::parse_report_file,
    classify::{AnalysisReport, Thresholds, classify},
    config::AnalysisConfig,
    errors::Result,
    reconcile::reconcile,
};

/// Read every mode's report. The first report that fails aborts the load.
pub fn load_modes(config: &AnalysisConfig) -> Result<ModeSet> {
    let mut modes = ModeSet::new();
    for mode in ExecutionMode::ALL {
        let path = config.report_path(mode);
        modes.insert(mode, parse_report_file(mode, &path)?);
    }
    Ok(modes)
}

pub fn analyze_modes(modes: &ModeSet, thresholds: &Thresholds) -> AnalysisReport {
    classify(reconcile(modes), thresholds)
}

pub fn run_analysis(config: &AnalysisConfig) -> Result<AnalysisReport> {
    config.thresholds.validate()?;
    let modes = load_modes(config)?;
    let report = analyze_modes(&modes, &config.thresholds);
    info!(
        compared = report.comparisons.len(),
        flagged = report.variants.iter().map(|v| v.issues.len()).sum::<usize>(),
        "analysis complete"
    );
    Ok(report)
}

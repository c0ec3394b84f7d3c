//! Analysis configuration.
//!
//! Settings are layered, later layers winning field by field:
//!
//! 1. built-in defaults ([`AnalysisConfig::default`]),
//! 2. an optional JSON config file,
//! 3. `PERFBASELINE_*` environment variables,
//! 4. command-line overrides.
//!
//! ```json
//! {
//!   "baselines_dir": "tools/performance/baselines",
//!   "thresholds": { "review": 1.25, "critical": 2.0 },
//!   "labels": { "variant_a": "StreamHub" },
//!   "fail_on": "critical"
//! }
//! ```

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::debug;

use crate::{
    bench_meta::{ExecutionMode, ModeLabels},
    classify::Thresholds,
    errors::{PerfBaselineError, Result},
    gate::FailOn,
    report::OutputFormat,
};

pub const ENV_BASELINES_DIR: &str = "PERFBASELINE_BASELINES_DIR";
pub const ENV_REVIEW_THRESHOLD: &str = "PERFBASELINE_REVIEW_THRESHOLD";
pub const ENV_CRITICAL_THRESHOLD: &str = "PERFBASELINE_CRITICAL_THRESHOLD";

/// Report file names looked up under `baselines_dir` when no explicit path is given.
pub fn default_report_file(mode: ExecutionMode) -> &'static str {
    match mode {
        ExecutionMode::Baseline => "Performance.SeriesIndicators-report-full.json",
        ExecutionMode::VariantA => "Performance.StreamIndicators-report-full.json",
        ExecutionMode::VariantB => "Performance.BufferIndicators-report-full.json",
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisConfig {
    pub baselines_dir: PathBuf,
    pub baseline_path: Option<PathBuf>,
    pub variant_a_path: Option<PathBuf>,
    pub variant_b_path: Option<PathBuf>,
    pub thresholds: Thresholds,
    pub labels: ModeLabels,
    pub format: OutputFormat,
    pub fail_on: FailOn,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            baselines_dir: PathBuf::from("."),
            baseline_path: None,
            variant_a_path: None,
            variant_b_path: None,
            thresholds: Thresholds::default(),
            labels: ModeLabels::default(),
            format: OutputFormat::default(),
            fail_on: FailOn::default(),
        }
    }
}

/// Config file contents; every field optional.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    baselines_dir: Option<PathBuf>,
    baseline: Option<PathBuf>,
    variant_a: Option<PathBuf>,
    variant_b: Option<PathBuf>,
    thresholds: Option<PartialThresholds>,
    labels: Option<ModeLabels>,
    format: Option<OutputFormat>,
    fail_on: Option<FailOn>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialThresholds {
    review: Option<f64>,
    critical: Option<f64>,
}

/// Values supplied on the command line.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub baselines_dir: Option<PathBuf>,
    pub baseline: Option<PathBuf>,
    pub variant_a: Option<PathBuf>,
    pub variant_b: Option<PathBuf>,
    pub review: Option<f64>,
    pub critical: Option<f64>,
    pub format: Option<OutputFormat>,
    pub fail_on: Option<FailOn>,
}

impl AnalysisConfig {
    /// Resolve all layers against the process environment.
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self> {
        Self::resolve_with(overrides, |key| env::var(key).ok())
    }

    pub fn resolve_with<F>(overrides: &ConfigOverrides, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(path) = &overrides.config_file {
            config.apply_file(path)?;
        }
        config.apply_env(lookup)?;
        config.apply_overrides(overrides);
        config.thresholds.validate()?;
        debug!(?config, "resolved configuration");
        Ok(config)
    }

    pub fn apply_file(&mut self, path: &Path) -> Result<()> {
        let data = fs::read(path).map_err(|e| {
            PerfBaselineError::invalid_config(format!("{}: {e}", path.display()))
        })?;
        let file: FileConfig = serde_json::from_slice(&data).map_err(|e| {
            PerfBaselineError::invalid_config(format!("{}: {e}", path.display()))
        })?;
        if let Some(dir) = file.baselines_dir {
            self.baselines_dir = dir;
        }
        set_if_some(&mut self.baseline_path, file.baseline);
        set_if_some(&mut self.variant_a_path, file.variant_a);
        set_if_some(&mut self.variant_b_path, file.variant_b);
        if let Some(thresholds) = file.thresholds {
            if let Some(review) = thresholds.review {
                self.thresholds.review = review;
            }
            if let Some(critical) = thresholds.critical {
                self.thresholds.critical = critical;
            }
        }
        if let Some(labels) = file.labels {
            self.labels = labels;
        }
        if let Some(format) = file.format {
            self.format = format;
        }
        if let Some(fail_on) = file.fail_on {
            self.fail_on = fail_on;
        }
        Ok(())
    }

    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_BASELINES_DIR).filter(|v| !v.is_empty()) {
            self.baselines_dir = PathBuf::from(dir);
        }
        if let Some(review) = env_f64(&lookup, ENV_REVIEW_THRESHOLD)? {
            self.thresholds.review = review;
        }
        if let Some(critical) = env_f64(&lookup, ENV_CRITICAL_THRESHOLD)? {
            self.thresholds.critical = critical;
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(dir) = &overrides.baselines_dir {
            self.baselines_dir = dir.clone();
        }
        set_if_some(&mut self.baseline_path, overrides.baseline.clone());
        set_if_some(&mut self.variant_a_path, overrides.variant_a.clone());
        set_if_some(&mut self.variant_b_path, overrides.variant_b.clone());
        if let Some(review) = overrides.review {
            self.thresholds.review = review;
        }
        if let Some(critical) = overrides.critical {
            self.thresholds.critical = critical;
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        if let Some(fail_on) = overrides.fail_on {
            self.fail_on = fail_on;
        }
    }

    /// Report location for `mode`: the explicit path, else the default file
    /// name under `baselines_dir`.
    pub fn report_path(&self, mode: ExecutionMode) -> PathBuf {
        let explicit = match mode {
            ExecutionMode::Baseline => &self.baseline_path,
            ExecutionMode::VariantA => &self.variant_a_path,
            ExecutionMode::VariantB => &self.variant_b_path,
        };
        explicit
            .clone()
            .unwrap_or_else(|| self.baselines_dir.join(default_report_file(mode)))
    }
}

fn set_if_some<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

fn env_f64<F>(lookup: &F, key: &str) -> Result<Option<f64>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw.trim().parse::<f64>().map(Some).map_err(|e| {
            PerfBaselineError::invalid_config(format!("{key}={raw}: {e}"))
        }),
    }
}

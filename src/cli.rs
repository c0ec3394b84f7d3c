use std::path::PathBuf;

use clap::Parser;

use crate::{config::ConfigOverrides, gate::FailOn, report::OutputFormat};

#[derive(Clone, Debug, Parser)]
#[command(
    name = "perfbaseline",
    version,
    about = "Compare variant benchmark reports against a baseline and flag slowdowns"
)]
pub struct CommandLineConfig {
    /// Directory holding the default report files
    #[arg(long, value_name = "DIR")]
    pub baselines_dir: Option<PathBuf>,

    /// Baseline report (default: <DIR>/Performance.SeriesIndicators-report-full.json)
    #[arg(long, value_name = "PATH")]
    pub baseline: Option<PathBuf>,

    /// First variant report (default: <DIR>/Performance.StreamIndicators-report-full.json)
    #[arg(long, value_name = "PATH")]
    pub variant_a: Option<PathBuf>,

    /// Second variant report (default: <DIR>/Performance.BufferIndicators-report-full.json)
    #[arg(long, value_name = "PATH")]
    pub variant_b: Option<PathBuf>,

    /// Ratio above which a variant is flagged for review
    #[arg(long, value_name = "RATIO")]
    pub review: Option<f64>,

    /// Ratio at or above which a variant is critical
    #[arg(long, value_name = "RATIO")]
    pub critical: Option<f64>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Exit non-zero when issues at this severity or worse are found
    #[arg(long, value_enum)]
    pub fail_on: Option<FailOn>,

    /// JSON config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl CommandLineConfig {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_file: self.config.clone(),
            baselines_dir: self.baselines_dir.clone(),
            baseline: self.baseline.clone(),
            variant_a: self.variant_a.clone(),
            variant_b: self.variant_b.clone(),
            review: self.review,
            critical: self.critical,
            format: self.format,
            fail_on: self.fail_on,
        }
    }
}

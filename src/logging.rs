use tracing_subscriber::EnvFilter;

use crate::errors::{PerfBaselineError, Result};

pub const ENV_LOG: &str = "PERFBASELINE_LOG";

/// Filter directive for the given verbosity flags. `PERFBASELINE_LOG` wins
/// when set.
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install a stderr subscriber so stdout carries only the report.
pub fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    let filter = EnvFilter::try_from_env(ENV_LOG)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| PerfBaselineError::invalid_config(format!("logging: {e}")))
}

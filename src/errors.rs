use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::bench_meta::ExecutionMode;

#[derive(Debug, Error)]
pub enum PerfBaselineError {
    #[error("failed to parse {mode} report {}: {reason}", path.display())]
    ParseError {
        mode: ExecutionMode,
        path: PathBuf,
        reason: String,
    },
    #[error("invalid report: {0}")]
    InvalidReport(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl PerfBaselineError {
    pub fn parse<T: Into<String>>(mode: ExecutionMode, path: &Path, reason: T) -> Self {
        PerfBaselineError::ParseError {
            mode,
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn invalid_report<T: Into<String>>(msg: T) -> Self {
        PerfBaselineError::InvalidReport(msg.into())
    }

    pub fn invalid_config<T: Into<String>>(msg: T) -> Self {
        PerfBaselineError::InvalidConfig(msg.into())
    }

    /// Mode of the report that failed to load, if this is a parse failure.
    pub fn failed_mode(&self) -> Option<ExecutionMode> {
        match self {
            PerfBaselineError::ParseError { mode, .. } => Some(*mode),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PerfBaselineError>;

//! Benchmark baseline comparison across execution modes.
//!
//! Reports for a baseline mode and its variants are parsed
//! ([`bench_report`]), joined per subject into slowdown ratios
//! ([`reconcile`]), and flagged against review/critical thresholds
//! ([`classify`]). [`pipeline::run_analysis`] runs the whole chain.
//! Run the Criterion bench with `cargo bench` to inspect reports under `target/criterion`.

pub mod bench_meta;
pub mod bench_report;
pub mod classify;
pub mod cli;
pub mod config;
pub mod errors;
pub mod gate;
pub mod logging;
pub mod pipeline;
pub mod reconcile;
pub mod report;

pub use crate::bench_meta::{BenchmarkRecord, ExecutionMode, ModeLabels, ModeSet, SubjectMeans};
pub use crate::classify::{
    AnalysisOutcome, AnalysisReport, FlaggedResult, IssueSummary, Severity, Thresholds,
    VariantIssues, classify,
};
pub use crate::config::{AnalysisConfig, ConfigOverrides};
pub use crate::errors::{PerfBaselineError, Result};
pub use crate::gate::{FailOn, GateEnforcer, GateReport};
pub use crate::pipeline::{analyze_modes, load_modes, run_analysis};
pub use crate::reconcile::{ComparisonResult, VariantMeasure, reconcile};
pub use crate::report::OutputFormat;

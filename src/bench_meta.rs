use std::{collections::BTreeMap, fmt};

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Subject name to mean time (ns/op) for a single execution mode.
pub type SubjectMeans = AHashMap<String, f64>;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BenchmarkRecord {
    pub subject_name: String,
    pub mean_time: f64,
}

impl BenchmarkRecord {
    pub fn has_measurement(&self) -> bool {
        self.mean_time > 0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutionMode {
    Baseline,
    VariantA,
    VariantB,
}

impl ExecutionMode {
    pub const ALL: [ExecutionMode; 3] = [
        ExecutionMode::Baseline,
        ExecutionMode::VariantA,
        ExecutionMode::VariantB,
    ];

    pub fn is_baseline(self) -> bool {
        self == ExecutionMode::Baseline
    }

    pub fn variants() -> impl Iterator<Item = ExecutionMode> {
        Self::ALL.into_iter().filter(|mode| !mode.is_baseline())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExecutionMode::Baseline => "baseline",
            ExecutionMode::VariantA => "variant-a",
            ExecutionMode::VariantB => "variant-b",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-facing names for each mode, used only when rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeLabels {
    pub baseline: String,
    pub variant_a: String,
    pub variant_b: String,
}

impl Default for ModeLabels {
    fn default() -> Self {
        Self {
            baseline: "Series".into(),
            variant_a: "StreamHub".into(),
            variant_b: "BufferList".into(),
        }
    }
}

impl ModeLabels {
    pub fn label(&self, mode: ExecutionMode) -> &str {
        match mode {
            ExecutionMode::Baseline => &self.baseline,
            ExecutionMode::VariantA => &self.variant_a,
            ExecutionMode::VariantB => &self.variant_b,
        }
    }
}

/// Parsed reports keyed by the mode they were measured under.
#[derive(Clone, Debug, Default)]
pub struct ModeSet {
    modes: BTreeMap<ExecutionMode, SubjectMeans>,
}

impl ModeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, mode: ExecutionMode, means: SubjectMeans) -> Self {
        self.insert(mode, means);
        self
    }

    pub fn insert(&mut self, mode: ExecutionMode, means: SubjectMeans) {
        self.modes.insert(mode, means);
    }

    pub fn get(&self, mode: ExecutionMode) -> Option<&SubjectMeans> {
        self.modes.get(&mode)
    }

    /// Mean for `subject` under `mode`, 0 when either is absent.
    pub fn mean(&self, mode: ExecutionMode, subject: &str) -> f64 {
        self.get(mode)
            .and_then(|means| means.get(subject))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn baseline(&self) -> Option<&SubjectMeans> {
        self.get(ExecutionMode::Baseline)
    }
}

impl FromIterator<(ExecutionMode, SubjectMeans)> for ModeSet {
    fn from_iter<I: IntoIterator<Item = (ExecutionMode, SubjectMeans)>>(iter: I) -> Self {
        Self {
            modes: iter.into_iter().collect(),
        }
    }
}

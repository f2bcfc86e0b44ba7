//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - built as flat DTOs by the data-acquisition layer before analysis runs
//! - used in-memory during fitting and binning
//! - cached by the caller keyed by (metric, analysis window, day boundary)
//!
//! The engine itself holds no state; everything here is a plain value.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable key for a dependent sleep/recovery outcome (sleep score, duration,
/// HRV, resting heart rate, deep/REM minutes, awake time, ...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricId(pub String);

/// Stable key for a candidate behavioral predictor (health-metric name,
/// workout-type name, habit name).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictorId(pub String);

impl MetricId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PredictorId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MetricId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for PredictorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One logged predictor value for one day.
///
/// Manually logged habits arrive as `Binary`; everything read from the health
/// store (steps, exercise minutes, daylight, workout durations) is
/// `Continuous`. The distinction only matters for the bucket breakdown —
/// regression treats both as numeric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Continuous(f64),
    Binary(bool),
}

impl Signal {
    /// Numeric value used for alignment and regression (`true` -> 1.0).
    pub fn value(self) -> f64 {
        match self {
            Signal::Continuous(v) => v,
            Signal::Binary(b) => {
                if b {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    pub fn kind(self) -> PredictorKind {
        match self {
            Signal::Continuous(_) => PredictorKind::Continuous,
            Signal::Binary(_) => PredictorKind::Binary,
        }
    }
}

/// Whether a predictor's domain is continuous or the binary {0, 1}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictorKind {
    Continuous,
    Binary,
}

/// One day's raw record as materialized by the data-acquisition collaborator.
///
/// A key missing from `metrics` or `signals` means "not logged that day",
/// which is distinct from a logged `0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    /// Dependent outcome values observed that night.
    pub metrics: BTreeMap<MetricId, f64>,
    /// Behavioral/health signals observed that day.
    pub signals: BTreeMap<PredictorId, Signal>,
}

/// One day's aligned tuple for a single dependent metric: the dependent value
/// plus whichever predictors were logged that day.
#[derive(Debug, Clone)]
pub struct Observation {
    pub date: NaiveDate,
    pub dependent: f64,
    pub predictors: BTreeMap<PredictorId, f64>,
}

/// The regression term a coefficient belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Term {
    Intercept,
    Predictor(PredictorId),
}

/// Per-coefficient inferential statistics from one OLS fit.
///
/// Index 0 of the result list is always the intercept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionResult {
    pub term: Term,
    pub coefficient: f64,
    pub standard_error: f64,
    pub t_statistic: f64,
    pub p_value: f64,
    pub confidence_low: f64,
    pub confidence_high: f64,
}

/// One bucket of a predictor's observed range. Bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub label: String,
    pub lower: f64,
    pub upper: f64,
    pub average_dependent: f64,
    pub sample_count: usize,
}

/// Whether a bin analysis produced usable buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinValidity {
    Valid,
    InsufficientData { current: usize, required: usize },
}

/// Bucket breakdown of one predictor against one dependent metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinAnalysisResult {
    pub predictor: PredictorId,
    pub bins: Vec<Bin>,
    pub total_samples: usize,
    /// Mean of the dependent metric over all eligible observations,
    /// independent of which predictor is being binned.
    pub baseline: f64,
    pub validity: BinValidity,
}

/// Confidence tier derived from a p-value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Strong,
    Moderate,
    Weak,
    Uncertain,
}

impl ConfidenceLevel {
    pub fn from_p_value(p: f64) -> Self {
        if p < 0.01 {
            ConfidenceLevel::Strong
        } else if p < 0.05 {
            ConfidenceLevel::Moderate
        } else if p < 0.10 {
            ConfidenceLevel::Weak
        } else {
            ConfidenceLevel::Uncertain
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ConfidenceLevel::Strong => "strong",
            ConfidenceLevel::Moderate => "moderate",
            ConfidenceLevel::Weak => "weak",
            ConfidenceLevel::Uncertain => "uncertain",
        }
    }
}

/// One ranked, human-interpretable association between a predictor and a
/// dependent metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub predictor: PredictorId,
    pub metric: MetricId,
    /// Coefficient on min-max scaled vectors (full-range effect).
    pub coefficient: f64,
    /// `coefficient * 100`: estimated percent-of-range impact on the outcome
    /// when the predictor moves from its observed minimum to its maximum.
    pub impact_pct: f64,
    pub p_value: f64,
    pub confidence_low: f64,
    pub confidence_high: f64,
    pub confidence: ConfidenceLevel,
    pub sample_size: usize,
    /// Bucket breakdown for drill-down, when one was computable.
    pub bins: Option<BinAnalysisResult>,
}

/// Insights for one dependent metric, split into headline and the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightGroup {
    pub metric: MetricId,
    pub headline: Vec<Insight>,
    pub additional: Vec<Insight>,
}

/// Outcome of analyzing one dependent metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Complete,
    /// Too few day-observations to fit at all.
    InsufficientData { current: usize, required: usize },
    /// The fit degenerated (singular normal equations or no spare degrees of
    /// freedom); other metrics are unaffected.
    Degenerate(String),
}

/// Diagnostics surface for one dependent metric: the raw regression output and
/// every computed bucket breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricAnalysis {
    pub metric: MetricId,
    pub sample_size: usize,
    pub status: AnalysisStatus,
    pub regression: Vec<RegressionResult>,
    pub bins: BTreeMap<PredictorId, BinAnalysisResult>,
}

/// Full output of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Lowest-p insights across all metrics, capped at `max_insights`.
    pub top: Vec<Insight>,
    /// Insights grouped per dependent metric, ordered by best headline p.
    pub groups: Vec<InsightGroup>,
    /// Per-metric diagnostics (regression tables, bins, statuses).
    pub metrics: Vec<MetricAnalysis>,
}

/// Thresholds and knobs for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Minimum day-observations with a valid dependent value.
    pub min_observations: usize,
    /// Minimum non-zero values for a predictor to enter the regression.
    /// Requires real logged signal, not mere non-absence.
    pub min_nonzero_signal: usize,
    /// Minimum (predictor, dependent) pairs for a bucket breakdown.
    pub min_bin_pairs: usize,
    /// Insights shown as headline per metric group.
    pub headline_count: usize,
    /// Cap on the global top-level insight list.
    pub max_insights: usize,
    /// Insights at or above this p-value are discarded as uninformative.
    pub max_p_value: f64,
    /// Gauss-Jordan pivot threshold below which the matrix counts as singular.
    pub pivot_epsilon: f64,
    /// Fixed large-sample z for 95% confidence intervals.
    pub z_95: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_observations: 30,
            min_nonzero_signal: 7,
            min_bin_pairs: 7,
            headline_count: 3,
            max_insights: 20,
            max_p_value: 0.99,
            pivot_epsilon: 1e-10,
            z_95: 1.96,
        }
    }
}

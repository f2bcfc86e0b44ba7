//! Turning regression output into ranked, grouped insights.
//!
//! An insight is one predictor's estimated effect on one dependent metric.
//! Because both vectors were min-max scaled before fitting, the coefficient is
//! already a full-range effect and `coefficient * 100` reads as "moving this
//! behavior from its observed minimum to its maximum shifts the outcome by
//! this many percent of its own range".
//!
//! Degenerate fits can leak NaN or near-1 p-values; those are filtered here,
//! never propagated to the caller as errors.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::{
    AnalysisConfig, BinAnalysisResult, ConfidenceLevel, Insight, InsightGroup, MetricId,
    PredictorId, RegressionResult, Term,
};

/// Build filtered, p-ascending insights for one dependent metric.
///
/// The intercept row is dropped; it describes the outcome's base level, not a
/// behavior.
pub fn build_insights(
    metric: &MetricId,
    regression: &[RegressionResult],
    bins: &BTreeMap<PredictorId, BinAnalysisResult>,
    sample_size: usize,
    config: &AnalysisConfig,
) -> Vec<Insight> {
    let mut insights: Vec<Insight> = regression
        .iter()
        .filter_map(|r| {
            let Term::Predictor(predictor) = &r.term else {
                return None;
            };
            if !r.p_value.is_finite() || r.p_value >= config.max_p_value {
                return None;
            }
            if !r.coefficient.is_finite() {
                return None;
            }
            Some(Insight {
                predictor: predictor.clone(),
                metric: metric.clone(),
                coefficient: r.coefficient,
                impact_pct: r.coefficient * 100.0,
                p_value: r.p_value,
                confidence_low: r.confidence_low,
                confidence_high: r.confidence_high,
                confidence: ConfidenceLevel::from_p_value(r.p_value),
                sample_size,
                bins: bins.get(predictor).cloned(),
            })
        })
        .collect();
    sort_by_p(&mut insights);
    insights
}

/// Group per-metric insight lists, splitting headline from additional and
/// ordering groups by their best headline p-value.
///
/// Metrics that produced no insights get no group.
pub fn group_insights(
    per_metric: Vec<(MetricId, Vec<Insight>)>,
    config: &AnalysisConfig,
) -> Vec<InsightGroup> {
    let mut groups: Vec<InsightGroup> = per_metric
        .into_iter()
        .filter_map(|(metric, mut insights)| {
            if insights.is_empty() {
                return None;
            }
            sort_by_p(&mut insights);
            let split = config.headline_count.min(insights.len());
            let additional = insights.split_off(split);
            Some(InsightGroup {
                metric,
                headline: insights,
                additional,
            })
        })
        .collect();

    groups.sort_by(|a, b| {
        let pa = a.headline.first().map_or(f64::INFINITY, |i| i.p_value);
        let pb = b.headline.first().map_or(f64::INFINITY, |i| i.p_value);
        pa.partial_cmp(&pb).unwrap_or(Ordering::Equal)
    });
    groups
}

/// The global cross-metric list: lowest p-values first, capped.
pub fn top_insights(insights: &[Insight], config: &AnalysisConfig) -> Vec<Insight> {
    let mut all = insights.to_vec();
    sort_by_p(&mut all);
    all.truncate(config.max_insights);
    all
}

fn sort_by_p(insights: &mut [Insight]) {
    insights.sort_by(|a, b| a.p_value.partial_cmp(&b.p_value).unwrap_or(Ordering::Equal));
}

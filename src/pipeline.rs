//! Shared analysis pipeline: records -> aligned vectors -> fit -> bins -> ranked insights.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! observations -> alignment/scaling -> OLS fit -> bucket breakdowns -> ranking
//!
//! The caller owns caching and invalidation (by analysis window and day
//! boundary); this function is stateless and re-entrant over an immutable
//! snapshot. Analyses of different dependent metrics share nothing, so they
//! fan out across rayon workers.

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::bins;
use crate::data::{aligned_predictors, build_observations, min_max_scale, predictor_kinds};
use crate::domain::{
    AnalysisConfig, AnalysisReport, AnalysisStatus, BinAnalysisResult, DailyRecord, Insight,
    MetricAnalysis, MetricId, PredictorId, PredictorKind,
};
use crate::fit;
use crate::report::{build_insights, group_insights, top_insights};

/// Analyze every requested dependent metric over one snapshot of daily
/// records.
///
/// Failures are per-metric and degrade gracefully: a metric with too few
/// observations or a degenerate fit reports its status and contributes no
/// insights; the other metrics are unaffected.
pub fn analyze(
    records: &[DailyRecord],
    metrics: &[MetricId],
    config: &AnalysisConfig,
) -> AnalysisReport {
    let kinds = predictor_kinds(records);

    let per_metric: Vec<(MetricAnalysis, Vec<Insight>)> = metrics
        .par_iter()
        .map(|metric| analyze_metric(records, metric, &kinds, config))
        .collect();

    let mut diagnostics = Vec::with_capacity(per_metric.len());
    let mut grouped: Vec<(MetricId, Vec<Insight>)> = Vec::with_capacity(per_metric.len());
    let mut all_insights = Vec::new();
    for (analysis, insights) in per_metric {
        all_insights.extend(insights.iter().cloned());
        grouped.push((analysis.metric.clone(), insights));
        diagnostics.push(analysis);
    }

    AnalysisReport {
        top: top_insights(&all_insights, config),
        groups: group_insights(grouped, config),
        metrics: diagnostics,
    }
}

fn analyze_metric(
    records: &[DailyRecord],
    metric: &MetricId,
    kinds: &BTreeMap<PredictorId, PredictorKind>,
    config: &AnalysisConfig,
) -> (MetricAnalysis, Vec<Insight>) {
    let observations = build_observations(records, metric);
    let n = observations.len();

    if n < config.min_observations {
        return (
            MetricAnalysis {
                metric: metric.clone(),
                sample_size: n,
                status: AnalysisStatus::InsufficientData {
                    current: n,
                    required: config.min_observations,
                },
                regression: Vec::new(),
                bins: BTreeMap::new(),
            },
            Vec::new(),
        );
    }

    let predictors = aligned_predictors(&observations, kinds, config);
    let dependent_raw: Vec<f64> = observations.iter().map(|o| o.dependent).collect();
    let dependent_scaled = min_max_scale(&dependent_raw);

    // Bucket breakdowns run on raw values so bounds and averages stay in the
    // units the user logged.
    let bin_results: BTreeMap<PredictorId, BinAnalysisResult> = predictors
        .iter()
        .map(|p| {
            let pairs: Vec<(f64, f64)> = p
                .raw
                .iter()
                .copied()
                .zip(dependent_raw.iter().copied())
                .collect();
            (p.id.clone(), bins::analyze(&p.id, p.kind, &pairs, config))
        })
        .collect();

    // A singular or over-parameterized fit yields an empty result set for
    // this metric only; the other metrics keep going.
    let (regression, status) = match fit::fit(&dependent_scaled, &predictors, config) {
        Ok(results) => (results, AnalysisStatus::Complete),
        Err(err) => (Vec::new(), AnalysisStatus::Degenerate(err.to_string())),
    };

    let insights = build_insights(metric, &regression, &bin_results, n, config);

    (
        MetricAnalysis {
            metric: metric.clone(),
            sample_size: n,
            status,
            regression,
            bins: bin_results,
        },
        insights,
    )
}

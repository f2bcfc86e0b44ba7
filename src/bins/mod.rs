//! Adaptive bucket breakdown of one predictor against one dependent metric.
//!
//! Given raw `(predictor, dependent)` pairs, partition the predictor's
//! observed range into buckets and report the average dependent value and
//! sample count per bucket, against the overall baseline. The UI layer renders
//! this as "low / medium / high exercise vs. average sleep score".
//!
//! Rules:
//!
//! - fewer than `min_bin_pairs` pairs: zero bins, validity
//!   `InsufficientData`
//! - binary predictors: exactly two candidate buckets, "Not Completed" over
//!   `[0, 0.5)` and "Completed" over `[0.5, 1]`
//! - continuous predictors: equal-width buckets over `[min, max]`, target
//!   count chosen from sample size, final upper bound inclusive of the true
//!   maximum
//! - every pair lands in exactly one bucket (assignment scans buckets in
//!   order and takes the first whose inclusive range contains the value), so
//!   bucket counts always sum to the input count
//! - empty buckets are dropped; the realized count may fall below target for
//!   skewed data
//!
//! The baseline is the dependent mean over ALL input pairs, independent of
//! how this particular predictor buckets them.

use crate::domain::{AnalysisConfig, Bin, BinAnalysisResult, BinValidity, PredictorId, PredictorKind};

/// Target bucket count for a continuous predictor with `n` samples.
fn target_bin_count(n: usize) -> usize {
    match n {
        0..=6 => 2,
        7..=15 => 3,
        16..=30 => 4,
        31..=50 => 5,
        _ => 6,
    }
}

/// Bucket one predictor's `(predictor, dependent)` pairs.
pub fn analyze(
    predictor: &PredictorId,
    kind: PredictorKind,
    pairs: &[(f64, f64)],
    config: &AnalysisConfig,
) -> BinAnalysisResult {
    let n = pairs.len();
    let baseline = if n == 0 {
        0.0
    } else {
        pairs.iter().map(|&(_, d)| d).sum::<f64>() / n as f64
    };

    if n < config.min_bin_pairs {
        return BinAnalysisResult {
            predictor: predictor.clone(),
            bins: Vec::new(),
            total_samples: n,
            baseline,
            validity: BinValidity::InsufficientData {
                current: n,
                required: config.min_bin_pairs,
            },
        };
    }

    let bins = match kind {
        PredictorKind::Binary => binary_bins(pairs),
        PredictorKind::Continuous => continuous_bins(pairs),
    };

    let validity = if bins.is_empty() {
        BinValidity::InsufficientData {
            current: n,
            required: config.min_bin_pairs,
        }
    } else {
        BinValidity::Valid
    };

    BinAnalysisResult {
        predictor: predictor.clone(),
        bins,
        total_samples: n,
        baseline,
        validity,
    }
}

fn binary_bins(pairs: &[(f64, f64)]) -> Vec<Bin> {
    let mut sums = [0.0_f64; 2];
    let mut counts = [0_usize; 2];
    for &(v, d) in pairs {
        let idx = usize::from(v >= 0.5);
        sums[idx] += d;
        counts[idx] += 1;
    }

    let candidates = [
        ("Not Completed", 0.0, 0.5, 0),
        ("Completed", 0.5, 1.0, 1),
    ];
    candidates
        .iter()
        .filter(|&&(_, _, _, idx)| counts[idx] > 0)
        .map(|&(label, lower, upper, idx)| Bin {
            label: label.to_string(),
            lower,
            upper,
            average_dependent: sums[idx] / counts[idx] as f64,
            sample_count: counts[idx],
        })
        .collect()
}

fn continuous_bins(pairs: &[(f64, f64)]) -> Vec<Bin> {
    let n = pairs.len();
    let mut sorted = pairs.to_vec();
    sorted.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let min = sorted[0].0;
    let max = sorted[n - 1].0;

    if min == max {
        let avg = sorted.iter().map(|&(_, d)| d).sum::<f64>() / n as f64;
        return vec![Bin {
            label: format_value(min),
            lower: min,
            upper: max,
            average_dependent: avg,
            sample_count: n,
        }];
    }

    let count = target_bin_count(n);
    let width = (max - min) / count as f64;

    // Candidate edges; the final upper bound is the true maximum so the last
    // bucket is inclusive of it regardless of rounding.
    let edges: Vec<(f64, f64)> = (0..count)
        .map(|i| {
            let lower = min + i as f64 * width;
            let upper = if i == count - 1 {
                max
            } else {
                min + (i + 1) as f64 * width
            };
            (lower, upper)
        })
        .collect();

    let mut sums = vec![0.0_f64; count];
    let mut counts = vec![0_usize; count];
    for &(v, d) in &sorted {
        // First bucket whose inclusive range contains the value. The buckets
        // tile [min, max], so every pair lands in exactly one.
        let idx = edges
            .iter()
            .position(|&(lo, hi)| v >= lo && v <= hi)
            .unwrap_or(count - 1);
        sums[idx] += d;
        counts[idx] += 1;
    }

    edges
        .iter()
        .enumerate()
        .filter(|&(i, _)| counts[i] > 0)
        .map(|(i, &(lower, upper))| Bin {
            label: format!("{} - {}", format_value(lower), format_value(upper)),
            lower,
            upper,
            average_dependent: sums[i] / counts[i] as f64,
            sample_count: counts[i],
        })
        .collect()
}

fn format_value(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{}", v.round() as i64)
    } else {
        format!("{v:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid() -> PredictorId {
        PredictorId::new("exercise_minutes")
    }

    fn config() -> AnalysisConfig {
        AnalysisConfig::default()
    }

    #[test]
    fn five_pairs_is_insufficient() {
        let pairs: Vec<(f64, f64)> = (0..5).map(|i| (i as f64, 80.0)).collect();
        let result = analyze(&pid(), PredictorKind::Continuous, &pairs, &config());
        assert!(result.bins.is_empty());
        assert_eq!(result.total_samples, 5);
        assert_eq!(
            result.validity,
            BinValidity::InsufficientData {
                current: 5,
                required: 7
            }
        );
    }

    #[test]
    fn binary_breakdown_and_baseline() {
        // 10 completed days averaging 85, 5 not-completed averaging 75.
        let mut pairs: Vec<(f64, f64)> = (0..10).map(|_| (1.0, 85.0)).collect();
        pairs.extend((0..5).map(|_| (0.0, 75.0)));

        let result = analyze(&pid(), PredictorKind::Binary, &pairs, &config());
        assert_eq!(result.bins.len(), 2);

        let not_completed = &result.bins[0];
        assert_eq!(not_completed.label, "Not Completed");
        assert_eq!(not_completed.sample_count, 5);
        assert!((not_completed.average_dependent - 75.0).abs() < 1e-12);

        let completed = &result.bins[1];
        assert_eq!(completed.label, "Completed");
        assert_eq!(completed.sample_count, 10);
        assert!((completed.average_dependent - 85.0).abs() < 1e-12);

        let expected_baseline = (10.0 * 85.0 + 5.0 * 75.0) / 15.0;
        assert!((result.baseline - expected_baseline).abs() < 1e-9);
    }

    #[test]
    fn binary_with_one_side_only_emits_one_bin() {
        let pairs: Vec<(f64, f64)> = (0..8).map(|_| (1.0, 80.0)).collect();
        let result = analyze(&pid(), PredictorKind::Binary, &pairs, &config());
        assert_eq!(result.bins.len(), 1);
        assert_eq!(result.bins[0].label, "Completed");
        assert_eq!(result.validity, BinValidity::Valid);
    }

    #[test]
    fn constant_predictor_yields_single_spanning_bin() {
        let pairs: Vec<(f64, f64)> = (0..10).map(|i| (30.0, 70.0 + i as f64)).collect();
        let result = analyze(&pid(), PredictorKind::Continuous, &pairs, &config());
        assert_eq!(result.bins.len(), 1);
        assert_eq!(result.bins[0].lower, 30.0);
        assert_eq!(result.bins[0].upper, 30.0);
        assert_eq!(result.bins[0].sample_count, 10);
    }

    #[test]
    fn target_counts_follow_sample_size() {
        assert_eq!(target_bin_count(6), 2);
        assert_eq!(target_bin_count(7), 3);
        assert_eq!(target_bin_count(15), 3);
        assert_eq!(target_bin_count(16), 4);
        assert_eq!(target_bin_count(30), 4);
        assert_eq!(target_bin_count(50), 5);
        assert_eq!(target_bin_count(51), 6);
    }

    #[test]
    fn every_pair_lands_in_exactly_one_bin() {
        // Heavily skewed values to stress boundary assignment.
        let pairs: Vec<(f64, f64)> = (0..40)
            .map(|i| {
                let v = if i < 35 { i as f64 * 0.1 } else { 100.0 + i as f64 };
                (v, 60.0 + (i % 7) as f64)
            })
            .collect();
        let result = analyze(&pid(), PredictorKind::Continuous, &pairs, &config());
        let assigned: usize = result.bins.iter().map(|b| b.sample_count).sum();
        assert_eq!(assigned, pairs.len());
        assert_eq!(result.validity, BinValidity::Valid);

        // Bounds cover the observed range.
        assert_eq!(result.bins.first().unwrap().lower, 0.0);
        assert_eq!(result.bins.last().unwrap().upper, 139.0);
    }

    #[test]
    fn analysis_is_idempotent() {
        let pairs: Vec<(f64, f64)> = (0..20)
            .map(|i| ((i * 3 % 11) as f64, 70.0 + (i % 5) as f64))
            .collect();
        let a = analyze(&pid(), PredictorKind::Continuous, &pairs, &config());
        let b = analyze(&pid(), PredictorKind::Continuous, &pairs, &config());
        assert_eq!(a.bins, b.bins);
        assert_eq!(a.baseline, b.baseline);
        assert_eq!(a.total_samples, b.total_samples);
    }

    #[test]
    fn averages_are_per_bin_means() {
        // n=10 -> 3 bins over [0, 9]: [0,3], (3,6], (6,9].
        let pairs: Vec<(f64, f64)> = (0..10).map(|i| (i as f64, i as f64 * 10.0)).collect();
        let result = analyze(&pid(), PredictorKind::Continuous, &pairs, &config());
        assert_eq!(result.bins.len(), 3);
        // First bin holds 0,1,2,3 (boundary 3.0 goes to the first bucket
        // whose inclusive range contains it).
        assert_eq!(result.bins[0].sample_count, 4);
        assert!((result.bins[0].average_dependent - 15.0).abs() < 1e-9);
    }
}

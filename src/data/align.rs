//! Alignment and scaling of raw daily records into regression-ready vectors.
//!
//! For one dependent metric we need:
//!
//! - the dependent vector: one value per day the metric was observed, in date
//!   order
//! - per candidate predictor, an equal-length vector in the same date order
//!
//! Predictors are logged irregularly. A day with no logged value contributes
//! `0.0` to the aligned vector (so every vector has length `n` and the design
//! matrix can be joined at all), and the admission rule then demands at least
//! `min_nonzero_signal` truly non-zero values — real logged signal, not mere
//! non-absence. A predictor whose aligned length somehow differs from `n` is
//! silently dropped; one malformed predictor must never abort the others.

use std::collections::BTreeMap;

use crate::domain::{
    AnalysisConfig, DailyRecord, MetricId, Observation, PredictorId, PredictorKind,
};

/// One admitted predictor column: raw values for binning, scaled for fitting.
#[derive(Debug, Clone)]
pub struct AlignedPredictor {
    pub id: PredictorId,
    pub kind: PredictorKind,
    /// Aligned raw values, absent days as 0.0; same date order as the
    /// dependent vector.
    pub raw: Vec<f64>,
    /// `min_max_scale(raw)`.
    pub scaled: Vec<f64>,
}

/// Build date-ordered observations for one dependent metric.
///
/// Days without a finite value for the metric are skipped entirely.
pub fn build_observations(records: &[DailyRecord], metric: &MetricId) -> Vec<Observation> {
    let mut observations: Vec<Observation> = records
        .iter()
        .filter_map(|record| {
            let dependent = record.metrics.get(metric).copied()?;
            if !dependent.is_finite() {
                return None;
            }
            let predictors: BTreeMap<PredictorId, f64> = record
                .signals
                .iter()
                .filter(|(_, s)| s.value().is_finite())
                .map(|(id, s)| (id.clone(), s.value()))
                .collect();
            Some(Observation {
                date: record.date,
                dependent,
                predictors,
            })
        })
        .collect();
    observations.sort_by_key(|o| o.date);
    observations
}

/// Collect each predictor's kind across the snapshot.
///
/// A predictor that ever appears continuous is treated as continuous; the
/// binary two-bucket breakdown only applies to consistently binary habits.
pub fn predictor_kinds(records: &[DailyRecord]) -> BTreeMap<PredictorId, PredictorKind> {
    let mut kinds = BTreeMap::new();
    for record in records {
        for (id, signal) in &record.signals {
            kinds
                .entry(id.clone())
                .and_modify(|k| {
                    if signal.kind() == PredictorKind::Continuous {
                        *k = PredictorKind::Continuous;
                    }
                })
                .or_insert(signal.kind());
        }
    }
    kinds
}

/// Min-max normalize to `[0, 1]`.
///
/// A constant vector is returned unchanged (no range to map, and dividing by
/// zero would poison the design matrix).
pub fn min_max_scale(values: &[f64]) -> Vec<f64> {
    let Some(&first) = values.first() else {
        return Vec::new();
    };
    let mut min = first;
    let mut max = first;
    for &v in &values[1..] {
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }
    if max == min {
        return values.to_vec();
    }
    let range = max - min;
    values.iter().map(|&v| (v - min) / range).collect()
}

/// Align, filter, and scale every candidate predictor against `n`
/// observations.
pub fn aligned_predictors(
    observations: &[Observation],
    kinds: &BTreeMap<PredictorId, PredictorKind>,
    config: &AnalysisConfig,
) -> Vec<AlignedPredictor> {
    let n = observations.len();
    kinds
        .iter()
        .filter_map(|(id, &kind)| {
            let raw: Vec<f64> = observations
                .iter()
                .map(|o| o.predictors.get(id).copied().unwrap_or(0.0))
                .collect();

            // Defensive: by construction raw.len() == n, but a predictor that
            // ever misaligns is excluded rather than aborting the run.
            if raw.len() != n {
                return None;
            }
            let nonzero = raw.iter().filter(|&&v| v != 0.0).count();
            if nonzero < config.min_nonzero_signal {
                return None;
            }

            let scaled = min_max_scale(&raw);
            Some(AlignedPredictor {
                id: id.clone(),
                kind,
                raw,
                scaled,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Signal;
    use chrono::NaiveDate;

    fn day(offset: u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap() + chrono::Duration::days(offset as i64)
    }

    fn record(offset: u64, score: Option<f64>, steps: Option<f64>) -> DailyRecord {
        let mut metrics = BTreeMap::new();
        if let Some(s) = score {
            metrics.insert(MetricId::new("sleep_score"), s);
        }
        let mut signals = BTreeMap::new();
        if let Some(v) = steps {
            signals.insert(PredictorId::new("steps"), Signal::Continuous(v));
        }
        DailyRecord {
            date: day(offset),
            metrics,
            signals,
        }
    }

    #[test]
    fn observations_skip_days_without_the_metric() {
        let records = vec![
            record(0, Some(80.0), Some(4_000.0)),
            record(1, None, Some(9_000.0)),
            record(2, Some(75.0), None),
        ];
        let obs = build_observations(&records, &MetricId::new("sleep_score"));
        assert_eq!(obs.len(), 2);
        assert_eq!(obs[0].dependent, 80.0);
        assert!(obs[1].predictors.is_empty());
    }

    #[test]
    fn observations_are_date_ordered() {
        let records = vec![record(5, Some(70.0), None), record(1, Some(90.0), None)];
        let obs = build_observations(&records, &MetricId::new("sleep_score"));
        assert!(obs[0].date < obs[1].date);
    }

    #[test]
    fn min_max_scale_maps_extremes() {
        let scaled = min_max_scale(&[10.0, 20.0, 15.0]);
        assert_eq!(scaled[0], 0.0);
        assert_eq!(scaled[1], 1.0);
        assert!((scaled[2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn min_max_scale_is_identity_on_constant_input() {
        let v = vec![3.0, 3.0, 3.0];
        assert_eq!(min_max_scale(&v), v);
        assert!(min_max_scale(&[]).is_empty());
    }

    #[test]
    fn sparse_predictor_is_excluded() {
        // 100 aligned observations but only 6 non-zero values: excluded even
        // though the aligned length matches n.
        let records: Vec<DailyRecord> = (0..100)
            .map(|i| {
                let steps = if i < 6 { Some(5_000.0) } else { None };
                record(i, Some(80.0), steps)
            })
            .collect();
        let obs = build_observations(&records, &MetricId::new("sleep_score"));
        assert_eq!(obs.len(), 100);
        let kinds = predictor_kinds(&records);
        let admitted = aligned_predictors(&obs, &kinds, &AnalysisConfig::default());
        assert!(admitted.is_empty());
    }

    #[test]
    fn predictor_with_enough_signal_is_admitted_and_scaled() {
        let records: Vec<DailyRecord> = (0..40)
            .map(|i| record(i, Some(80.0 + i as f64), Some(1_000.0 + 100.0 * i as f64)))
            .collect();
        let obs = build_observations(&records, &MetricId::new("sleep_score"));
        let kinds = predictor_kinds(&records);
        let admitted = aligned_predictors(&obs, &kinds, &AnalysisConfig::default());
        assert_eq!(admitted.len(), 1);
        let steps = &admitted[0];
        assert_eq!(steps.raw.len(), 40);
        assert_eq!(steps.scaled[0], 0.0);
        assert_eq!(steps.scaled[39], 1.0);
    }

    #[test]
    fn mixed_signal_kinds_resolve_to_continuous() {
        let mut r0 = record(0, Some(80.0), None);
        r0.signals
            .insert(PredictorId::new("meditation"), Signal::Binary(true));
        let mut r1 = record(1, Some(82.0), None);
        r1.signals
            .insert(PredictorId::new("meditation"), Signal::Continuous(0.5));
        let kinds = predictor_kinds(&[r0, r1]);
        assert_eq!(
            kinds[&PredictorId::new("meditation")],
            PredictorKind::Continuous
        );
    }
}

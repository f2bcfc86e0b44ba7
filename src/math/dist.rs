//! Normal-approximation p-values for t-statistics.
//!
//! These rankings only need p-values good enough for triage, not clinical
//! inference, so we deliberately avoid an exact Student-t CDF:
//!
//! - `df > 30`: the t distribution is close enough to normal that we use
//!   `2 * (1 - Phi(|t|))` directly.
//! - `df <= 30`: we first shrink the statistic with the moment-matched
//!   correction `z = t / sqrt(1 + t^2 / (4 df))` and evaluate the same normal
//!   CDF. This widens tails for small samples in roughly the right way but is
//!   NOT the Student-t CDF; p-values near conventional cutoffs can differ by
//!   a few percent.
//!
//! `Phi` uses the Abramowitz & Stegun 7.1.26 rational approximation of `erf`
//! (|error| < 1.5e-7), plenty for two-decimal p-value thresholds.

/// Standard normal CDF via an erf rational approximation.
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))
}

/// Two-tailed p-value for a t-statistic with `df` degrees of freedom.
///
/// Returns 1.0 for non-finite or zero-information inputs so degenerate
/// coefficients sort last instead of propagating NaN.
pub fn two_tailed_p_value(t: f64, df: usize) -> f64 {
    if !t.is_finite() || df == 0 {
        return 1.0;
    }
    let t_abs = t.abs();
    let z = if df > 30 {
        t_abs
    } else {
        t_abs / (1.0 + t_abs * t_abs / (4.0 * df as f64)).sqrt()
    };
    let p = 2.0 * (1.0 - normal_cdf(z));
    p.clamp(0.0, 1.0)
}

/// Abramowitz & Stegun 7.1.26.
fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254_829_592;
    const A2: f64 = -0.284_496_736;
    const A3: f64 = 1.421_413_741;
    const A4: f64 = -1.453_152_027;
    const A5: f64 = 1.061_405_429;
    const P: f64 = 0.327_591_1;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + P * x);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;
    sign * (1.0 - poly * (-x * x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_cdf_known_values() {
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-7);
        assert!((normal_cdf(1.96) - 0.975).abs() < 1e-3);
        assert!((normal_cdf(-1.96) - 0.025).abs() < 1e-3);
        assert!(normal_cdf(6.0) > 0.999_999);
    }

    #[test]
    fn p_value_is_two_tailed_and_symmetric() {
        let p_pos = two_tailed_p_value(2.0, 100);
        let p_neg = two_tailed_p_value(-2.0, 100);
        assert!((p_pos - p_neg).abs() < 1e-12);
        // z = 2.0 two-tailed is about 0.0455.
        assert!((p_pos - 0.0455).abs() < 1e-3);
    }

    #[test]
    fn p_value_decreases_with_larger_statistic() {
        let mut prev = 1.0;
        for t in [0.0, 0.5, 1.0, 2.0, 4.0, 8.0] {
            let p = two_tailed_p_value(t, 50);
            assert!(p <= prev);
            prev = p;
        }
    }

    #[test]
    fn small_df_correction_widens_tails() {
        // Same statistic must look less significant on 5 df than on 500.
        let small = two_tailed_p_value(2.5, 5);
        let large = two_tailed_p_value(2.5, 500);
        assert!(small > large);
    }

    #[test]
    fn degenerate_inputs_yield_p_of_one() {
        assert_eq!(two_tailed_p_value(f64::NAN, 10), 1.0);
        assert_eq!(two_tailed_p_value(f64::INFINITY, 0), 1.0);
        // erf approximation error keeps this a hair under exactly 1.0.
        assert!(two_tailed_p_value(0.0, 10) > 0.999_999);
    }
}

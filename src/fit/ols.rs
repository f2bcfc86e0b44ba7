//! Ordinary least squares with per-coefficient inference.
//!
//! One fit per dependent metric, all admissible predictors at once:
//!
//! ```text
//! X = [1 | x1 | ... | xk]          (n rows, k+1 columns)
//! beta = (X' X)^-1 X' y
//! e = y - X beta
//! sigma^2 = sum(e^2) / (n - k - 1)
//! var_i = (X' X)^-1 [i][i] * sigma^2
//! ```
//!
//! Both `y` and every `x` arrive min-max scaled to `[0, 1]`, so a coefficient
//! reads directly as the full-range effect of that predictor on the outcome.
//!
//! Failure modes are part of the contract: `SingularMatrix` for collinear
//! columns and `DegreesOfFreedom` when `n - k - 1 <= 0`; the pipeline maps
//! both to an empty result set for that metric and continues with the rest.

use nalgebra::DMatrix;

use crate::data::AlignedPredictor;
use crate::domain::{AnalysisConfig, RegressionResult, Term};
use crate::error::AnalysisError;
use crate::math::{inverse, multiply, subtract, transpose, two_tailed_p_value};

/// Fit `y ~ 1 + x1 + ... + xk` and derive inferential statistics.
///
/// Output order mirrors input column order, intercept first.
pub fn fit(
    y: &[f64],
    predictors: &[AlignedPredictor],
    config: &AnalysisConfig,
) -> Result<Vec<RegressionResult>, AnalysisError> {
    let n = y.len();
    let k = predictors.len();

    for p in predictors {
        if p.scaled.len() != n {
            return Err(AnalysisError::DimensionMismatch {
                op: "design matrix",
                left: (n, 1),
                right: (p.scaled.len(), 1),
            });
        }
    }
    if n <= k + 1 {
        return Err(AnalysisError::DegreesOfFreedom { n, k });
    }
    let df = n - k - 1;

    let x = design_matrix(n, predictors);
    let y_col = DMatrix::from_column_slice(n, 1, y);

    let xt = transpose(&x);
    let xtx = multiply(&xt, &x)?;
    let xtx_inv = inverse(&xtx, config.pivot_epsilon)?;
    let beta = multiply(&xtx_inv, &multiply(&xt, &y_col)?)?;

    let fitted = multiply(&x, &beta)?;
    let residuals = subtract(&y_col, &fitted)?;
    let sse: f64 = residuals.iter().map(|e| e * e).sum();
    let sigma2 = sse / df as f64;

    let mut results = Vec::with_capacity(k + 1);
    for i in 0..=k {
        let coefficient = beta[(i, 0)];
        // Rounding can push a diagonal entry a hair below zero; clamp before
        // the square root.
        let variance = (xtx_inv[(i, i)] * sigma2).max(0.0);
        let standard_error = variance.sqrt();

        // A zero standard error means an exact (noiseless) fit: any non-zero
        // coefficient is then maximally significant, not unmeasurable.
        let (t_statistic, p_value) = if standard_error > 0.0 {
            let t = coefficient / standard_error;
            (t, two_tailed_p_value(t, df))
        } else if coefficient != 0.0 {
            (f64::INFINITY, 0.0)
        } else {
            (0.0, 1.0)
        };

        let margin = config.z_95 * standard_error;
        let term = if i == 0 {
            Term::Intercept
        } else {
            Term::Predictor(predictors[i - 1].id.clone())
        };
        results.push(RegressionResult {
            term,
            coefficient,
            standard_error,
            t_statistic,
            p_value,
            confidence_low: coefficient - margin,
            confidence_high: coefficient + margin,
        });
    }

    Ok(results)
}

fn design_matrix(n: usize, predictors: &[AlignedPredictor]) -> DMatrix<f64> {
    let k = predictors.len();
    let mut x = DMatrix::<f64>::zeros(n, k + 1);
    for i in 0..n {
        x[(i, 0)] = 1.0;
        for (j, p) in predictors.iter().enumerate() {
            x[(i, j + 1)] = p.scaled[i];
        }
    }
    x
}

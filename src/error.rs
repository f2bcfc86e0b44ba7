//! Analysis error type.
//!
//! Degenerate fits (collinear predictors, too few degrees of freedom) are
//! expected outcomes on sparse daily logs, not program bugs. The pipeline maps
//! them to empty per-metric results and keeps going; only the shape-level
//! misuse variants indicate a caller error.

#[derive(Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Matrix operands with incompatible shapes.
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },
    /// The normal-equations matrix is not invertible (collinear or
    /// degenerate predictor columns).
    SingularMatrix,
    /// More predictors than the sample supports (`n - k - 1 <= 0`).
    DegreesOfFreedom { n: usize, k: usize },
    /// Not enough observations/pairs to run the requested analysis.
    InsufficientData { current: usize, required: usize },
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::DimensionMismatch { op, left, right } => write!(
                f,
                "dimension mismatch in {op}: {}x{} vs {}x{}",
                left.0, left.1, right.0, right.1
            ),
            AnalysisError::SingularMatrix => {
                write!(f, "singular matrix: normal equations are not invertible")
            }
            AnalysisError::DegreesOfFreedom { n, k } => write!(
                f,
                "not enough degrees of freedom: n={n}, k={k} (need n - k - 1 > 0)"
            ),
            AnalysisError::InsufficientData { current, required } => {
                write!(f, "insufficient data: have {current}, need {required}")
            }
        }
    }
}

impl std::fmt::Debug for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AnalysisError({self})")
    }
}

impl std::error::Error for AnalysisError {}

//! Checked dense-matrix primitives.
//!
//! The regression engine needs four operations: transpose, multiply, subtract,
//! and inverse. `nalgebra` provides the storage and arithmetic; the wrappers
//! here add the shape checks the engine relies on (nalgebra panics on shape
//! errors, we want `Result`s), and the inverse is an explicit Gauss-Jordan
//! elimination on the augmented `[A | I]` matrix with partial pivoting:
//!
//! - for each column, swap in the row with the largest absolute value before
//!   eliminating (numerical stability on nearly collinear columns)
//! - a pivot with absolute value below `pivot_epsilon` means the matrix is
//!   singular for our purposes
//!
//! Normal-equations matrices here are tiny (a few dozen columns at most), so
//! O(n^3) elimination is more than fast enough and keeps the singularity
//! threshold explicit rather than buried in a library tolerance.

use nalgebra::DMatrix;

use crate::error::AnalysisError;

pub fn transpose(a: &DMatrix<f64>) -> DMatrix<f64> {
    a.transpose()
}

pub fn multiply(a: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<DMatrix<f64>, AnalysisError> {
    if a.ncols() != b.nrows() {
        return Err(AnalysisError::DimensionMismatch {
            op: "multiply",
            left: (a.nrows(), a.ncols()),
            right: (b.nrows(), b.ncols()),
        });
    }
    Ok(a * b)
}

pub fn subtract(a: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<DMatrix<f64>, AnalysisError> {
    if a.shape() != b.shape() {
        return Err(AnalysisError::DimensionMismatch {
            op: "subtract",
            left: (a.nrows(), a.ncols()),
            right: (b.nrows(), b.ncols()),
        });
    }
    Ok(a - b)
}

/// Invert a square matrix by Gauss-Jordan elimination with partial pivoting.
///
/// Fails with `SingularMatrix` when any pivot's absolute value falls below
/// `pivot_epsilon`.
pub fn inverse(a: &DMatrix<f64>, pivot_epsilon: f64) -> Result<DMatrix<f64>, AnalysisError> {
    let n = a.nrows();
    if a.ncols() != n {
        return Err(AnalysisError::DimensionMismatch {
            op: "inverse",
            left: (a.nrows(), a.ncols()),
            right: (a.ncols(), a.nrows()),
        });
    }

    // Augmented [A | I], eliminated in place.
    let mut aug = DMatrix::<f64>::zeros(n, 2 * n);
    aug.view_mut((0, 0), (n, n)).copy_from(a);
    for i in 0..n {
        aug[(i, n + i)] = 1.0;
    }

    for col in 0..n {
        // Partial pivoting: largest |value| in this column, at or below the
        // current row.
        let mut pivot_row = col;
        let mut pivot_abs = aug[(col, col)].abs();
        for row in (col + 1)..n {
            let v = aug[(row, col)].abs();
            if v > pivot_abs {
                pivot_abs = v;
                pivot_row = row;
            }
        }
        if pivot_abs < pivot_epsilon || !pivot_abs.is_finite() {
            return Err(AnalysisError::SingularMatrix);
        }
        if pivot_row != col {
            aug.swap_rows(pivot_row, col);
        }

        let pivot = aug[(col, col)];
        for j in 0..2 * n {
            aug[(col, j)] /= pivot;
        }

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = aug[(row, col)];
            if factor == 0.0 {
                continue;
            }
            for j in 0..2 * n {
                aug[(row, j)] -= factor * aug[(col, j)];
            }
        }
    }

    Ok(aug.view((0, n), (n, n)).into_owned())
}

use nalgebra::DMatrix;
use ndarray::Array2;
use tracing::warn;

use crate::data::matrix::max_asymmetry;
use crate::error::Result;
use crate::error::RiskError;

/// Asymmetry above this (scaled by the largest diagonal entry) is logged
/// before symmetrizing.
pub const SYMMETRY_TOLERANCE: f64 = 1e-10;

/// Lower Cholesky factor `L` of a symmetric positive-definite matrix, `A = L L^T`.
///
/// The input is symmetrized as `(A + A^T) / 2` first.
pub fn cholesky_lower(matrix: &Array2<f64>) -> Result<Array2<f64>> {
  let n = matrix.nrows();
  if n != matrix.ncols() {
    return Err(RiskError::dimension_mismatch(
      "cholesky columns",
      n,
      matrix.ncols(),
    ));
  }
  if n == 0 {
    return Err(RiskError::invalid_parameter(
      "cannot factorize an empty matrix",
    ));
  }
  if matrix.iter().any(|v| !v.is_finite()) {
    return Err(RiskError::invalid_parameter(
      "covariance contains non-finite entries",
    ));
  }

  let scale = matrix.diag().iter().fold(1.0_f64, |acc, v| acc.max(v.abs()));
  let asymmetry = max_asymmetry(matrix);
  if asymmetry > SYMMETRY_TOLERANCE * scale {
    warn!(asymmetry, "covariance is not symmetric, averaging with its transpose");
  }

  let sym = DMatrix::from_fn(n, n, |i, j| 0.5 * (matrix[[i, j]] + matrix[[j, i]]));
  let Some(chol) = sym.clone().cholesky() else {
    return Err(RiskError::NonPositiveDefiniteCovariance {
      pivot: failing_pivot(&sym),
    });
  };

  let l = chol.l();
  for i in 0..n {
    let pivot = l[(i, i)];
    if !(pivot.is_finite() && pivot > 0.0) {
      return Err(RiskError::NonPositiveDefiniteCovariance { pivot: i });
    }
  }

  Ok(Array2::from_shape_fn((n, n), |(i, j)| l[(i, j)]))
}

// Index of the first leading principal minor that is not positive definite.
fn failing_pivot(sym: &DMatrix<f64>) -> usize {
  let n = sym.nrows();
  (1..=n)
    .find(|&k| sym.view((0, 0), (k, k)).clone_owned().cholesky().is_none())
    .map(|k| k - 1)
    .unwrap_or(n - 1)
}

use ndarray::Array1;

use crate::error::Result;
use crate::error::RiskError;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Fixed portfolio weights summing to one.
#[derive(Clone, Debug, PartialEq)]
pub struct Weights(Array1<f64>);

impl Weights {
  /// Equal weights `1/N` for `n` assets.
  pub fn equal(n: usize) -> Result<Self> {
    if n == 0 {
      return Err(RiskError::invalid_parameter(
        "equal weights need at least one asset",
      ));
    }
    Ok(Self(Array1::from_elem(n, 1.0 / n as f64)))
  }

  /// Arbitrary weights; must be finite and sum to one.
  pub fn new(weights: Array1<f64>) -> Result<Self> {
    if weights.is_empty() {
      return Err(RiskError::invalid_parameter("weights must not be empty"));
    }
    if weights.iter().any(|w| !w.is_finite()) {
      return Err(RiskError::invalid_parameter("weights must be finite"));
    }
    let total = weights.sum();
    if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
      return Err(RiskError::invalid_parameter(format!(
        "weights must sum to 1, got {total}"
      )));
    }
    Ok(Self(weights))
  }

  pub fn as_array(&self) -> &Array1<f64> {
    &self.0
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use ndarray::array;

  use super::*;

  #[test]
  fn equal_weights_sum_to_one() {
    let w = Weights::equal(3).unwrap();
    assert_eq!(w.len(), 3);
    assert_abs_diff_eq!(w.as_array().sum(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(w.as_array()[0], 1.0 / 3.0, epsilon = 1e-15);
  }

  #[test]
  fn rejects_zero_assets() {
    assert!(Weights::equal(0).is_err());
  }

  #[test]
  fn rejects_weights_not_summing_to_one() {
    let err = Weights::new(array![0.5, 0.6]).unwrap_err();
    assert!(matches!(err, RiskError::InvalidParameter { .. }));
    assert!(Weights::new(array![0.25, 0.75]).is_ok());
  }
}

use ndarray::Array2;

use crate::error::Result;
use crate::error::RiskError;

macro_rules! asset_matrix {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(Clone, Debug)]
    pub struct $name {
      assets: Vec<String>,
      values: Array2<f64>,
    }

    impl $name {
      /// Wrap an `N × N` matrix labeled by `assets`.
      pub fn new(assets: Vec<String>, values: Array2<f64>) -> Result<Self> {
        if values.nrows() != values.ncols() {
          return Err(RiskError::dimension_mismatch(
            concat!(stringify!($name), " columns"),
            values.nrows(),
            values.ncols(),
          ));
        }
        if values.nrows() != assets.len() {
          return Err(RiskError::dimension_mismatch(
            concat!(stringify!($name), " labels"),
            assets.len(),
            values.nrows(),
          ));
        }
        Ok(Self { assets, values })
      }

      /// Asset labels shared by rows and columns.
      pub fn assets(&self) -> &[String] {
        &self.assets
      }

      /// Raw matrix entries.
      pub fn values(&self) -> &Array2<f64> {
        &self.values
      }

      /// Entry `(i, j)`.
      pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[[i, j]]
      }

      /// Matrix dimension `N`.
      pub fn dim(&self) -> usize {
        self.values.nrows()
      }

      /// Largest absolute difference `|M[i,j] - M[j,i]|`.
      pub fn max_asymmetry(&self) -> f64 {
        max_asymmetry(&self.values)
      }
    }
  };
}

asset_matrix!(
  /// Sample covariance of daily log returns (`ddof = 1`).
  CovarianceMatrix
);

asset_matrix!(
  /// Pearson correlation of daily log returns; unit diagonal.
  CorrelationMatrix
);

pub(crate) fn max_asymmetry(m: &Array2<f64>) -> f64 {
  let n = m.nrows().min(m.ncols());
  let mut worst = 0.0_f64;
  for i in 0..n {
    for j in (i + 1)..n {
      worst = worst.max((m[[i, j]] - m[[j, i]]).abs());
    }
  }
  worst
}

#[cfg(test)]
mod tests {
  use ndarray::array;

  use super::*;

  #[test]
  fn rejects_non_square_values() {
    let err = CovarianceMatrix::new(
      vec!["A".into(), "B".into()],
      array![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
    )
    .unwrap_err();
    assert!(matches!(err, RiskError::DimensionMismatch { .. }));
  }

  #[test]
  fn rejects_label_count_mismatch() {
    let err = CorrelationMatrix::new(vec!["A".into()], array![[1.0, 0.2], [0.2, 1.0]]).unwrap_err();
    assert!(matches!(
      err,
      RiskError::DimensionMismatch {
        expected: 1,
        found: 2,
        ..
      }
    ));
  }

  #[test]
  fn reports_asymmetry() {
    let m = CovarianceMatrix::new(
      vec!["A".into(), "B".into()],
      array![[1.0, 0.25], [0.5, 1.0]],
    )
    .unwrap();
    assert_eq!(m.max_asymmetry(), 0.25);
    assert_eq!(m.get(1, 0), 0.5);
    assert_eq!(m.dim(), 2);
  }
}

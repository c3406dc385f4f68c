use std::collections::HashSet;

use ndarray::Array2;
use ndarray::ArrayView1;
use ndarray::Axis;

use crate::error::Result;
use crate::error::RiskError;

/// Minimum number of price series the pipeline accepts.
pub const MIN_ASSETS: usize = 2;
/// Minimum number of observations (one return needs two prices).
pub const MIN_OBSERVATIONS: usize = 2;

/// `T × N` table of prices, one column per asset.
#[derive(Clone, Debug)]
pub struct PriceMatrix {
  assets: Vec<String>,
  prices: Array2<f64>,
}

impl PriceMatrix {
  /// Build a price matrix from asset names and a `T × N` array.
  ///
  /// Shape and naming are validated here; price positivity is checked when
  /// returns are derived so the offending cell can be reported.
  pub fn new(assets: Vec<String>, prices: Array2<f64>) -> Result<Self> {
    if prices.ncols() != assets.len() {
      return Err(RiskError::dimension_mismatch(
        "price columns",
        assets.len(),
        prices.ncols(),
      ));
    }
    if assets.len() < MIN_ASSETS {
      return Err(RiskError::InsufficientColumns {
        required: MIN_ASSETS,
        found: assets.len(),
      });
    }
    if prices.nrows() < MIN_OBSERVATIONS {
      return Err(RiskError::InsufficientRows {
        required: MIN_OBSERVATIONS,
        found: prices.nrows(),
      });
    }

    let mut seen = HashSet::with_capacity(assets.len());
    for name in &assets {
      if !seen.insert(name.as_str()) {
        return Err(RiskError::DuplicateAsset {
          asset: name.clone(),
        });
      }
    }

    Ok(Self { assets, prices })
  }

  /// Build a price matrix from `(name, series)` columns of equal length.
  pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<f64>)>) -> Result<Self> {
    let n_assets = columns.len();
    let n_obs = columns.first().map(|(_, c)| c.len()).unwrap_or(0);

    let mut assets = Vec::with_capacity(n_assets);
    let mut prices = Array2::<f64>::zeros((n_obs, n_assets));
    for (j, (name, series)) in columns.into_iter().enumerate() {
      if series.len() != n_obs {
        return Err(RiskError::dimension_mismatch(
          "price column length",
          n_obs,
          series.len(),
        ));
      }
      for (t, p) in series.into_iter().enumerate() {
        prices[[t, j]] = p;
      }
      assets.push(name.into());
    }

    Self::new(assets, prices)
  }

  /// Asset names in column order.
  pub fn assets(&self) -> &[String] {
    &self.assets
  }

  /// Raw `T × N` prices.
  pub fn values(&self) -> &Array2<f64> {
    &self.prices
  }

  /// Number of observations `T`.
  pub fn n_observations(&self) -> usize {
    self.prices.nrows()
  }

  /// Number of assets `N`.
  pub fn n_assets(&self) -> usize {
    self.prices.ncols()
  }

  /// Price series of asset `i`.
  pub fn column(&self, i: usize) -> ArrayView1<'_, f64> {
    self.prices.column(i)
  }
}

/// `(T−1) × N` matrix of log returns, immutable once derived.
#[derive(Clone, Debug)]
pub struct ReturnMatrix {
  assets: Vec<String>,
  returns: Array2<f64>,
}

impl ReturnMatrix {
  pub(crate) fn from_parts(assets: Vec<String>, returns: Array2<f64>) -> Self {
    debug_assert_eq!(assets.len(), returns.ncols());
    debug_assert!(returns.nrows() >= 1, "return matrix needs at least one row");
    Self { assets, returns }
  }

  /// Asset names in column order.
  pub fn assets(&self) -> &[String] {
    &self.assets
  }

  /// Raw `(T−1) × N` log returns.
  pub fn values(&self) -> &Array2<f64> {
    &self.returns
  }

  /// Number of return observations.
  pub fn n_observations(&self) -> usize {
    self.returns.nrows()
  }

  /// Number of assets.
  pub fn n_assets(&self) -> usize {
    self.returns.ncols()
  }

  /// Log-return series of asset `i`.
  pub fn column(&self, i: usize) -> ArrayView1<'_, f64> {
    self.returns.column(i)
  }

  /// Per-asset arithmetic mean of daily log returns.
  ///
  /// A return matrix always holds at least one row, so the divisor is non-zero.
  pub fn mean_returns(&self) -> ndarray::Array1<f64> {
    self.returns.sum_axis(Axis(0)) / self.n_observations() as f64
  }
}

#[cfg(test)]
mod tests {
  use ndarray::array;

  use super::*;

  #[test]
  fn rejects_single_column() {
    let err = PriceMatrix::new(vec!["A".into()], array![[1.0], [2.0]]).unwrap_err();
    assert!(matches!(
      err,
      RiskError::InsufficientColumns {
        required: 2,
        found: 1
      }
    ));
  }

  #[test]
  fn rejects_single_row() {
    let err = PriceMatrix::new(vec!["A".into(), "B".into()], array![[1.0, 2.0]]).unwrap_err();
    assert!(matches!(
      err,
      RiskError::InsufficientRows {
        required: 2,
        found: 1
      }
    ));
  }

  #[test]
  fn rejects_duplicate_names() {
    let err = PriceMatrix::new(
      vec!["A".into(), "A".into()],
      array![[1.0, 2.0], [1.1, 2.1]],
    )
    .unwrap_err();
    assert!(matches!(err, RiskError::DuplicateAsset { asset } if asset == "A"));
  }

  #[test]
  fn from_columns_preserves_order() {
    let prices = PriceMatrix::from_columns(vec![
      ("ZZZ", vec![1.0, 2.0, 3.0]),
      ("AAA", vec![4.0, 5.0, 6.0]),
    ])
    .unwrap();
    assert_eq!(prices.assets(), &["ZZZ".to_string(), "AAA".to_string()]);
    assert_eq!(prices.n_observations(), 3);
    assert_eq!(prices.values()[[2, 1]], 6.0);
  }

  #[test]
  fn from_columns_rejects_ragged_input() {
    let err = PriceMatrix::from_columns(vec![("A", vec![1.0, 2.0]), ("B", vec![1.0])]).unwrap_err();
    assert!(matches!(err, RiskError::DimensionMismatch { .. }));
  }

  #[test]
  fn mean_returns_averages_each_column() {
    let returns = ReturnMatrix::from_parts(
      vec!["A".into(), "B".into()],
      array![[0.01, -0.02], [0.03, 0.0], [0.02, 0.05]],
    );
    let means = returns.mean_returns();
    assert!((means[0] - 0.02).abs() < 1e-15);
    assert!((means[1] - 0.01).abs() < 1e-15);
  }

  #[test]
  fn mean_of_single_row_is_that_row() {
    let returns = ReturnMatrix::from_parts(vec!["A".into(), "B".into()], array![[0.4, -0.1]]);
    assert_eq!(returns.mean_returns(), array![0.4, -0.1]);
  }
}

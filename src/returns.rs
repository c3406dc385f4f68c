//! # Returns
//!
//! $$
//! R_{t,i}=\ln\frac{P_{t+1,i}}{P_{t,i}},\quad
//! \mu_i^{\text{ann}} = 252\,\bar R_i,\quad
//! \sigma_i^{\text{ann}} = \sqrt{252}\,\sigma_i
//! $$
//!
//! Log-return derivation and per-asset daily/annualized statistics.

use ndarray::Array2;
use ndarray::Axis;
use tracing::debug;

use crate::data::PriceMatrix;
use crate::data::ReturnMatrix;
use crate::error::Result;
use crate::error::RiskError;

/// Trading days per year used for annualization.
pub const TRADING_DAYS: f64 = 252.0;

/// Daily and annualized return statistics for one asset.
#[derive(Clone, Debug, PartialEq)]
pub struct AssetStats {
  /// Asset name.
  pub asset: String,
  /// Mean daily log return.
  pub daily_mean_return: f64,
  /// Population standard deviation of daily log returns.
  pub daily_vol: f64,
  /// `daily_mean_return * 252`.
  pub annual_return: f64,
  /// `daily_vol * sqrt(252)`.
  pub annual_vol: f64,
}

/// Convert prices into log returns, column by column.
///
/// Fails with [`RiskError::InvalidPrice`] on the first non-positive or
/// non-finite price, scanning row-major.
pub fn compute_returns(prices: &PriceMatrix) -> Result<ReturnMatrix> {
  let values = prices.values();
  for ((row, column), &p) in values.indexed_iter() {
    if !(p.is_finite() && p > 0.0) {
      return Err(RiskError::InvalidPrice {
        row,
        column,
        asset: prices.assets()[column].clone(),
        value: p,
      });
    }
  }

  let n_obs = prices.n_observations();
  let n_assets = prices.n_assets();
  let mut returns = Array2::<f64>::zeros((n_obs - 1, n_assets));
  for (j, mut out) in returns.axis_iter_mut(Axis(1)).enumerate() {
    let col = values.column(j);
    for t in 0..n_obs - 1 {
      out[t] = (col[t + 1] / col[t]).ln();
    }
  }

  debug!(
    observations = n_obs - 1,
    assets = n_assets,
    "derived log returns"
  );

  Ok(ReturnMatrix::from_parts(prices.assets().to_vec(), returns))
}

/// Daily mean/vol per asset and their annualized counterparts.
pub fn compute_stats(returns: &ReturnMatrix) -> Vec<AssetStats> {
  let values = returns.values();
  let means = returns.mean_returns();
  let vols = values.std_axis(Axis(0), 0.0);

  returns
    .assets()
    .iter()
    .enumerate()
    .map(|(i, asset)| AssetStats {
      asset: asset.clone(),
      daily_mean_return: means[i],
      daily_vol: vols[i],
      annual_return: means[i] * TRADING_DAYS,
      annual_vol: vols[i] * TRADING_DAYS.sqrt(),
    })
    .collect()
}

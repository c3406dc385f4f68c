//! # Covariance
//!
//! $$
//! \Sigma_{ij}=\frac{1}{T-2}\sum_{t}(R_{t,i}-\bar R_i)(R_{t,j}-\bar R_j),\qquad
//! \rho_{ij}=\frac{\Sigma_{ij}}{\sqrt{\Sigma_{ii}\Sigma_{jj}}}
//! $$
//!
//! Sample covariance and Pearson correlation of a return matrix, columns as
//! variables and rows as observations.

use ndarray::Array2;
use ndarray_stats::CorrelationExt;
use tracing::debug;

use crate::data::CorrelationMatrix;
use crate::data::CovarianceMatrix;
use crate::data::ReturnMatrix;
use crate::error::Result;
use crate::error::RiskError;

/// Return standard deviations below this are treated as zero variance.
pub const DEGENERATE_STD_TOLERANCE: f64 = 1e-12;

/// Sample covariance (`ddof = 1`) of the return columns.
///
/// Needs at least two return observations, i.e. three price rows.
pub fn compute_covariance(returns: &ReturnMatrix) -> Result<CovarianceMatrix> {
  let n_obs = returns.n_observations();
  if n_obs < 2 {
    return Err(RiskError::InsufficientRows {
      required: 3,
      found: n_obs + 1,
    });
  }

  // ndarray-stats wants variables on rows.
  let variables = returns.values().t();
  let mut cov = variables
    .cov(1.0)
    .map_err(|_| RiskError::InsufficientRows {
      required: 3,
      found: n_obs + 1,
    })?;
  mirror_upper(&mut cov);

  debug!(assets = cov.nrows(), observations = n_obs, "computed covariance");
  CovarianceMatrix::new(returns.assets().to_vec(), cov)
}

/// Pearson correlation of the return columns.
pub fn compute_correlation(returns: &ReturnMatrix) -> Result<CorrelationMatrix> {
  let cov = compute_covariance(returns)?;
  correlation_from_covariance(&cov)
}

/// Normalize a covariance matrix into a correlation matrix.
///
/// Fails with [`RiskError::DegenerateVariance`] naming the first asset whose
/// variance is zero.
pub fn correlation_from_covariance(cov: &CovarianceMatrix) -> Result<CorrelationMatrix> {
  let n = cov.dim();
  let values = cov.values();

  let mut stds = Vec::with_capacity(n);
  for i in 0..n {
    let s = values[[i, i]].max(0.0).sqrt();
    if !(s > DEGENERATE_STD_TOLERANCE) {
      return Err(RiskError::DegenerateVariance {
        asset: cov.assets()[i].clone(),
      });
    }
    stds.push(s);
  }

  let mut corr = Array2::<f64>::eye(n);
  for i in 0..n {
    for j in (i + 1)..n {
      let rho = (values[[i, j]] / (stds[i] * stds[j])).clamp(-1.0, 1.0);
      corr[[i, j]] = rho;
      corr[[j, i]] = rho;
    }
  }

  CorrelationMatrix::new(cov.assets().to_vec(), corr)
}

fn mirror_upper(m: &mut Array2<f64>) {
  let n = m.nrows();
  for i in 0..n {
    for j in (i + 1)..n {
      m[[j, i]] = m[[i, j]];
    }
  }
}

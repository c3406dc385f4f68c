use std::time::Instant;

use ndarray::Array1;
use ndarray::Array2;
use ndarray_rand::RandomExt;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::StandardNormal;
use rayon::prelude::*;
use tracing::debug;
use tracing::info;

use super::cancel::CancelToken;
use super::cholesky::cholesky_lower;
use crate::data::CovarianceMatrix;
use crate::data::Weights;
use crate::error::Result;
use crate::error::RiskError;
use crate::returns::TRADING_DAYS;

/// Monte Carlo run parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonteCarloConfig {
  /// Simulated trading days per path.
  pub horizon_days: usize,
  /// Number of independent paths.
  pub num_simulations: usize,
  /// Base seed; `None` draws one from the thread RNG.
  pub seed: Option<u64>,
}

impl Default for MonteCarloConfig {
  fn default() -> Self {
    Self {
      horizon_days: TRADING_DAYS as usize,
      num_simulations: 5000,
      seed: None,
    }
  }
}

impl MonteCarloConfig {
  /// Default horizon and path count with a fixed seed.
  pub fn seeded(seed: u64) -> Self {
    Self {
      seed: Some(seed),
      ..Self::default()
    }
  }
}

/// Simulated one-period portfolio returns, one per path, in path order.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulatedSample {
  returns: Vec<f64>,
  seed: u64,
}

impl SimulatedSample {
  pub fn values(&self) -> &[f64] {
    &self.returns
  }

  pub fn len(&self) -> usize {
    self.returns.len()
  }

  pub fn is_empty(&self) -> bool {
    self.returns.is_empty()
  }

  /// Base seed the sample was drawn with; rerunning with it reproduces the sample.
  pub fn seed(&self) -> u64 {
    self.seed
  }
}

impl From<Vec<f64>> for SimulatedSample {
  fn from(returns: Vec<f64>) -> Self {
    Self { returns, seed: 0 }
  }
}

fn trial_seed(base: u64, trial: usize) -> u64 {
  base.wrapping_add(0xD134_2543_DE82_EF95_u64.wrapping_mul((trial as u64).wrapping_add(1)))
}

/// Simulate `num_simulations` portfolio returns over `horizon_days` correlated daily steps.
///
/// Each path draws a `horizon_days × N` matrix of standard normal shocks `Z`,
/// forms daily returns `mean + Z L^T` from the lower Cholesky factor of
/// `covariance`, and sums the weighted daily returns across the horizon
/// (log returns are added, not compounded).
///
/// Paths are independent and run on the rayon pool. Path `i` owns an RNG
/// seeded from `(seed, i)`, so a fixed seed yields a bit-identical sample
/// regardless of scheduling.
pub fn simulate_portfolio(
  mean_returns: &Array1<f64>,
  covariance: &CovarianceMatrix,
  weights: &Weights,
  config: &MonteCarloConfig,
  cancel: &CancelToken,
) -> Result<SimulatedSample> {
  let n = covariance.dim();
  if mean_returns.len() != n {
    return Err(RiskError::dimension_mismatch(
      "mean returns",
      n,
      mean_returns.len(),
    ));
  }
  if weights.len() != n {
    return Err(RiskError::dimension_mismatch("weights", n, weights.len()));
  }
  if mean_returns.iter().any(|m| !m.is_finite()) {
    return Err(RiskError::invalid_parameter("mean returns must be finite"));
  }
  if config.horizon_days == 0 {
    return Err(RiskError::invalid_parameter("horizon_days must be > 0"));
  }
  if config.num_simulations == 0 {
    return Err(RiskError::invalid_parameter("num_simulations must be > 0"));
  }

  let lower = cholesky_lower(covariance.values())?;
  let lower_t = lower.t().to_owned();
  let w = weights.as_array();
  let base_seed = config.seed.unwrap_or_else(rand::random);

  info!(
    assets = n,
    horizon_days = config.horizon_days,
    num_simulations = config.num_simulations,
    seed = base_seed,
    "starting monte carlo run"
  );
  let started = Instant::now();

  let mut buffer = vec![0.0_f64; config.num_simulations];
  buffer
    .par_iter_mut()
    .enumerate()
    .try_for_each(|(trial, slot)| -> Result<()> {
      cancel.check()?;
      let mut rng = StdRng::seed_from_u64(trial_seed(base_seed, trial));
      let shocks = Array2::<f64>::random_using((config.horizon_days, n), StandardNormal, &mut rng);
      let daily = shocks.dot(&lower_t) + mean_returns;
      *slot = daily.dot(w).sum();
      Ok(())
    })
    .inspect_err(|_| debug!("monte carlo run aborted"))?;

  info!(
    elapsed_ms = started.elapsed().as_millis() as u64,
    "finished monte carlo run"
  );

  Ok(SimulatedSample {
    returns: buffer,
    seed: base_seed,
  })
}

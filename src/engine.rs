//! # Risk Engine
//!
//! $$
//! P \xrightarrow{\ln} R \xrightarrow{} (\bar R, \Sigma, \rho)
//! \xrightarrow{\text{MC}} X \xrightarrow{} (\operatorname{VaR}_{95}, \bar X)
//! $$
//!
//! Stateless orchestration of one analysis run, from a price matrix to the
//! results consumed by the display shell.

use std::time::Duration;

use tracing::info;

use crate::covariance::compute_covariance;
use crate::covariance::correlation_from_covariance;
use crate::data::CorrelationMatrix;
use crate::data::CovarianceMatrix;
use crate::data::PriceMatrix;
use crate::data::Weights;
use crate::error::Result;
use crate::returns::AssetStats;
use crate::returns::compute_returns;
use crate::returns::compute_stats;
use crate::simulation::CancelToken;
use crate::simulation::MonteCarloConfig;
use crate::simulation::SimulatedSample;
use crate::simulation::simulate_portfolio;
use crate::summary::HistogramBin;
use crate::summary::RiskSummary;
use crate::summary::histogram;
use crate::summary::summarize;

/// Runtime configuration for [`RiskEngine`].
#[derive(Clone, Debug, PartialEq)]
pub struct RiskEngineConfig {
  /// Monte Carlo horizon, path count and seed.
  pub monte_carlo: MonteCarloConfig,
  /// Abort the simulation once this much wall time has passed.
  pub timeout: Option<Duration>,
  /// Number of histogram buckets in the report.
  pub histogram_bins: usize,
}

impl Default for RiskEngineConfig {
  fn default() -> Self {
    Self {
      monte_carlo: MonteCarloConfig::default(),
      timeout: None,
      histogram_bins: 40,
    }
  }
}

/// Everything one run hands to the display shell.
#[derive(Clone, Debug)]
pub struct RiskReport {
  pub stats: Vec<AssetStats>,
  pub covariance: CovarianceMatrix,
  pub correlation: CorrelationMatrix,
  pub weights: Weights,
  pub sample: SimulatedSample,
  pub histogram: Vec<HistogramBin>,
  pub summary: RiskSummary,
}

/// Single entry point for the analysis pipeline. Holds configuration only;
/// every run owns its matrices and shares nothing with other runs.
#[derive(Clone, Debug, Default)]
pub struct RiskEngine {
  config: RiskEngineConfig,
}

impl RiskEngine {
  pub fn new(config: RiskEngineConfig) -> Self {
    Self { config }
  }

  /// Borrow engine configuration.
  pub fn config(&self) -> &RiskEngineConfig {
    &self.config
  }

  /// Run the full pipeline on an equal-weighted portfolio of every asset.
  pub fn analyze(&self, prices: &PriceMatrix) -> Result<RiskReport> {
    let cancel = match self.config.timeout {
      Some(timeout) => CancelToken::with_timeout(timeout),
      None => CancelToken::new(),
    };
    self.analyze_with_cancel(prices, &cancel)
  }

  /// Like [`RiskEngine::analyze`], abortable through `cancel`.
  pub fn analyze_with_cancel(
    &self,
    prices: &PriceMatrix,
    cancel: &CancelToken,
  ) -> Result<RiskReport> {
    info!(
      assets = prices.n_assets(),
      observations = prices.n_observations(),
      "analyzing price matrix"
    );

    let returns = compute_returns(prices)?;
    let stats = compute_stats(&returns);
    let covariance = compute_covariance(&returns)?;
    let correlation = correlation_from_covariance(&covariance)?;
    let weights = Weights::equal(returns.n_assets())?;

    let sample = simulate_portfolio(
      &returns.mean_returns(),
      &covariance,
      &weights,
      &self.config.monte_carlo,
      cancel,
    )?;
    let summary = summarize(&sample, &stats)?;
    let histogram = histogram(sample.values(), self.config.histogram_bins);

    info!(
      var95 = summary.var95,
      mean = summary.mean_simulated_return,
      best = %summary.best_asset,
      riskiest = %summary.worst_vol_asset,
      "analysis complete"
    );

    Ok(RiskReport {
      stats,
      covariance,
      correlation,
      weights,
      sample,
      histogram,
      summary,
    })
  }
}

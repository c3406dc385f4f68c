//! # basket-risk
//!
//! $$
//! \operatorname{VaR}_{95} = Q_{0.05}\Big(\sum_{t=1}^{252}\mathbf w^\top(\boldsymbol\mu + L\mathbf z_t)\Big)
//! $$
//!
//! Risk/return statistics for a basket of price series and Monte Carlo
//! Value-at-Risk of the equal-weighted portfolio.
//!
//! The pipeline is a chain of pure functions, each usable on its own:
//! [`returns::compute_returns`] → [`returns::compute_stats`] /
//! [`covariance::compute_covariance`] → [`simulation::simulate_portfolio`] →
//! [`summary::summarize`]. [`engine::RiskEngine`] runs the whole chain.

pub mod covariance;
pub mod data;
pub mod engine;
pub mod error;
pub mod io;
pub mod report;
pub mod returns;
pub mod simulation;
pub mod summary;

pub use data::CorrelationMatrix;
pub use data::CovarianceMatrix;
pub use data::PriceMatrix;
pub use data::ReturnMatrix;
pub use data::Weights;
pub use engine::RiskEngine;
pub use engine::RiskEngineConfig;
pub use engine::RiskReport;
pub use error::Result;
pub use error::RiskError;
pub use returns::AssetStats;
pub use simulation::CancelToken;
pub use simulation::MonteCarloConfig;
pub use simulation::SimulatedSample;
pub use summary::RiskSummary;

//! # Simulation
//!
//! $$
//! \mathbf r_t = \boldsymbol\mu + L\mathbf z_t,\quad \Sigma = LL^\top,\quad
//! X = \sum_{t=1}^{H} \mathbf w^\top \mathbf r_t
//! $$
//!
//! Correlated Monte Carlo simulation of one-period portfolio returns.

pub mod cancel;
pub mod cholesky;
pub mod monte_carlo;

pub use cancel::CancelToken;
pub use cholesky::cholesky_lower;
pub use monte_carlo::MonteCarloConfig;
pub use monte_carlo::SimulatedSample;
pub use monte_carlo::simulate_portfolio;

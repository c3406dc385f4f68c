//! # Data
//!
//! $$
//! R_{t,i} = \ln\frac{P_{t+1,i}}{P_{t,i}}, \qquad \Sigma \in \mathbb R^{N\times N}
//! $$
//!
//! Labeled containers shared by every pipeline stage. Asset names are unique,
//! order-preserving and reused as the index of every derived matrix.

pub(crate) mod matrix;
pub mod prices;
pub mod weights;

pub use matrix::CorrelationMatrix;
pub use matrix::CovarianceMatrix;
pub use prices::PriceMatrix;
pub use prices::ReturnMatrix;
pub use weights::Weights;

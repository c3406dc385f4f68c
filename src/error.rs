//! # Errors
//!
//! $$
//! \text{input} \xrightarrow{\text{first violated precondition}} \texttt{RiskError}
//! $$
//!
//! Typed failures of the risk pipeline. Every kind is a deterministic validation
//! failure: nothing here is retried, and the location (row/column/asset) is carried
//! wherever one exists.

use thiserror::Error;

/// Result type alias for basket-risk operations.
pub type Result<T> = std::result::Result<T, RiskError>;

/// Error kinds raised by the analytics core and its ingestion shell.
#[derive(Error, Debug)]
pub enum RiskError {
  /// Fewer numeric price columns than the pipeline needs.
  #[error("insufficient columns: need at least {required} numeric series, got {found}")]
  InsufficientColumns { required: usize, found: usize },

  /// Fewer price rows than the pipeline needs.
  #[error("insufficient rows: need at least {required} observations, got {found}")]
  InsufficientRows { required: usize, found: usize },

  /// A price is non-positive or non-finite, so its log return is undefined.
  #[error("invalid price {value} at row {row}, column {column} ({asset})")]
  InvalidPrice {
    row: usize,
    column: usize,
    asset: String,
    value: f64,
  },

  /// An asset with zero return variance makes its correlations undefined.
  #[error("degenerate variance: asset {asset} has zero return variance")]
  DegenerateVariance { asset: String },

  /// Cholesky factorization failed.
  #[error("covariance matrix is not positive definite (failed at pivot {pivot})")]
  NonPositiveDefiniteCovariance { pivot: usize },

  /// Two columns share the same asset name.
  #[error("duplicate asset name {asset}")]
  DuplicateAsset { asset: String },

  /// Inputs of incompatible shapes.
  #[error("dimension mismatch in {context}: expected {expected}, got {found}")]
  DimensionMismatch {
    context: &'static str,
    expected: usize,
    found: usize,
  },

  /// Invalid parameter value.
  #[error("invalid parameter: {message}")]
  InvalidParameter { message: String },

  /// A statistic was requested from an empty sample.
  #[error("empty simulated sample")]
  EmptySample,

  /// The Monte Carlo run was aborted by its cancel token or deadline.
  #[error("simulation cancelled")]
  Cancelled,

  /// A numeric column of the input table has an empty cell.
  #[error("missing value at row {row}, column {column}")]
  MissingValue { row: usize, column: String },

  #[error(transparent)]
  Csv(#[from] csv::Error),

  #[error(transparent)]
  Io(#[from] std::io::Error),
}

impl RiskError {
  /// Create an invalid parameter error.
  pub fn invalid_parameter(message: impl Into<String>) -> Self {
    Self::InvalidParameter {
      message: message.into(),
    }
  }

  /// Create a dimension mismatch error.
  pub fn dimension_mismatch(context: &'static str, expected: usize, found: usize) -> Self {
    Self::DimensionMismatch {
      context,
      expected,
      found,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn invalid_price_message_names_location() {
    let err = RiskError::InvalidPrice {
      row: 3,
      column: 1,
      asset: "BBB".to_string(),
      value: -2.0,
    };
    let msg = err.to_string();
    assert!(msg.contains("row 3"), "{msg}");
    assert!(msg.contains("column 1"), "{msg}");
    assert!(msg.contains("BBB"), "{msg}");
  }

  #[test]
  fn dimension_mismatch_message_names_context() {
    let err = RiskError::dimension_mismatch("weights", 2, 3);
    assert_eq!(
      err.to_string(),
      "dimension mismatch in weights: expected 2, got 3"
    );
  }
}

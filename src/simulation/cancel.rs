use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::time::Duration;
use std::time::Instant;

use crate::error::Result;
use crate::error::RiskError;

/// Cooperative abort signal for long Monte Carlo runs.
///
/// Clones share the same flag, so a caller can keep one handle and pass
/// another into the run. An optional deadline cancels implicitly once passed.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
  flag: Arc<AtomicBool>,
  deadline: Option<Instant>,
}

impl CancelToken {
  pub fn new() -> Self {
    Self::default()
  }

  /// Token that cancels itself at `deadline`.
  pub fn with_deadline(deadline: Instant) -> Self {
    Self {
      flag: Arc::new(AtomicBool::new(false)),
      deadline: Some(deadline),
    }
  }

  /// Token that cancels itself `timeout` from now.
  pub fn with_timeout(timeout: Duration) -> Self {
    Self::with_deadline(Instant::now() + timeout)
  }

  /// Request cancellation for every clone of this token.
  pub fn cancel(&self) {
    self.flag.store(true, Ordering::Relaxed);
  }

  pub fn is_cancelled(&self) -> bool {
    self.flag.load(Ordering::Relaxed) || self.deadline.is_some_and(|d| Instant::now() >= d)
  }

  /// `Err(RiskError::Cancelled)` once cancelled.
  pub fn check(&self) -> Result<()> {
    if self.is_cancelled() {
      Err(RiskError::Cancelled)
    } else {
      Ok(())
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn clones_share_the_flag() {
    let token = CancelToken::new();
    let handle = token.clone();
    assert!(token.check().is_ok());
    handle.cancel();
    assert!(token.is_cancelled());
    assert!(matches!(token.check(), Err(RiskError::Cancelled)));
  }

  #[test]
  fn past_deadline_is_cancelled() {
    let token = CancelToken::with_timeout(Duration::ZERO);
    assert!(token.is_cancelled());
    assert!(!CancelToken::with_timeout(Duration::from_secs(3600)).is_cancelled());
  }
}

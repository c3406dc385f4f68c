//! # Summary
//!
//! $$
//! \operatorname{VaR}_{95} = Q_{0.05}(X),\qquad
//! Q_p = x_{(\lfloor h\rfloor)} + (h-\lfloor h\rfloor)\,(x_{(\lceil h\rceil)}-x_{(\lfloor h\rfloor)}),\ h=p(n-1)
//! $$
//!
//! Value-at-Risk, sample mean and best/worst asset flags extracted from a
//! simulated sample.

use statrs::statistics::Statistics;

use crate::error::Result;
use crate::error::RiskError;
use crate::returns::AssetStats;
use crate::simulation::SimulatedSample;

/// Confidence level of the headline Value-at-Risk.
pub const VAR_CONFIDENCE: f64 = 0.95;

/// Percentile of the simulated sample at [`VAR_CONFIDENCE`], reported as `var95`.
pub const VAR_PERCENTILE: f64 = 5.0;

/// Headline risk figures of one analysis run.
#[derive(Clone, Debug, PartialEq)]
pub struct RiskSummary {
  /// 5th percentile of the simulated portfolio returns (negative = loss).
  pub var95: f64,
  /// Mean of the simulated portfolio returns.
  pub mean_simulated_return: f64,
  /// Asset with the highest annualized return.
  pub best_asset: String,
  /// Annualized return of `best_asset`.
  pub best_annual_return: f64,
  /// Asset with the highest annualized volatility.
  pub worst_vol_asset: String,
  /// Annualized volatility of `worst_vol_asset`.
  pub worst_annual_vol: f64,
}

/// One equal-width histogram bucket `[lower, upper)`; the last bucket is closed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HistogramBin {
  pub lower: f64,
  pub upper: f64,
  pub count: usize,
}

/// `p`-th percentile (`0..=100`) with linear interpolation between order statistics.
///
/// Matches numpy's default: rank `p/100 * (n-1)` into the sorted values.
/// Returns `NaN` for an empty slice.
pub fn percentile(values: &[f64], p: f64) -> f64 {
  if values.is_empty() {
    return f64::NAN;
  }
  let mut sorted = values.to_vec();
  sorted.sort_by(f64::total_cmp);

  let rank = (p.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
  let lo = rank.floor() as usize;
  let hi = rank.ceil() as usize;
  if lo == hi {
    sorted[lo]
  } else {
    let w = rank - lo as f64;
    sorted[lo] + w * (sorted[hi] - sorted[lo])
  }
}

/// Simulated-return threshold that `confidence` of the outcomes stay above.
pub fn value_at_risk(sample: &SimulatedSample, confidence: f64) -> Result<f64> {
  if !(confidence > 0.0 && confidence < 1.0) {
    return Err(RiskError::invalid_parameter(format!(
      "confidence must be in (0, 1), got {confidence}"
    )));
  }
  if sample.is_empty() {
    return Err(RiskError::EmptySample);
  }
  // Drop binary noise from `(1 - confidence) * 100`, e.g. 5.000000000000004.
  let p = ((1.0 - confidence) * 100.0 * 1e10).round() / 1e10;
  Ok(percentile(sample.values(), p))
}

// First index of the maximum; NaN never wins.
fn argmax_by<F: Fn(&AssetStats) -> f64>(stats: &[AssetStats], key: F) -> Option<usize> {
  let mut best: Option<(usize, f64)> = None;
  for (i, s) in stats.iter().enumerate() {
    let v = key(s);
    match best {
      Some((_, b)) if !(v > b) => {}
      _ if v.is_nan() => {}
      _ => best = Some((i, v)),
    }
  }
  best.map(|(i, _)| i)
}

/// Project a simulated sample and per-asset statistics onto a [`RiskSummary`].
///
/// Ties between assets resolve to the first in asset order.
pub fn summarize(sample: &SimulatedSample, stats: &[AssetStats]) -> Result<RiskSummary> {
  if sample.is_empty() {
    return Err(RiskError::EmptySample);
  }
  let var95 = percentile(sample.values(), VAR_PERCENTILE);
  let mean_simulated_return = sample.values().iter().mean();

  let best = argmax_by(stats, |s| s.annual_return)
    .ok_or_else(|| RiskError::invalid_parameter("no asset statistics to rank"))?;
  let worst = argmax_by(stats, |s| s.annual_vol)
    .ok_or_else(|| RiskError::invalid_parameter("no asset statistics to rank"))?;

  Ok(RiskSummary {
    var95,
    mean_simulated_return,
    best_asset: stats[best].asset.clone(),
    best_annual_return: stats[best].annual_return,
    worst_vol_asset: stats[worst].asset.clone(),
    worst_annual_vol: stats[worst].annual_vol,
  })
}

/// Bucket `values` into `bins` equal-width bins spanning their range.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
  let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
  if bins == 0 || finite.is_empty() {
    return Vec::new();
  }

  let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
  let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
  let (lo, hi) = if max > min {
    (min, max)
  } else {
    (min - 0.5, max + 0.5)
  };
  let width = (hi - lo) / bins as f64;

  let mut out: Vec<HistogramBin> = (0..bins)
    .map(|k| HistogramBin {
      lower: lo + k as f64 * width,
      upper: if k + 1 == bins {
        hi
      } else {
        lo + (k + 1) as f64 * width
      },
      count: 0,
    })
    .collect();

  for v in finite {
    let k = (((v - lo) / width) as usize).min(bins - 1);
    out[k].count += 1;
  }
  out
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;

  use super::*;

  fn stats(entries: &[(&str, f64, f64)]) -> Vec<AssetStats> {
    entries
      .iter()
      .map(|&(name, ret, vol)| AssetStats {
        asset: name.to_string(),
        daily_mean_return: ret / 252.0,
        daily_vol: vol / 252.0_f64.sqrt(),
        annual_return: ret,
        annual_vol: vol,
      })
      .collect()
  }

  #[test]
  fn var95_of_zero_to_ninety_nine_is_four_point_nine_five() {
    let sample = SimulatedSample::from((0..100).map(f64::from).collect::<Vec<_>>());
    let summary = summarize(&sample, &stats(&[("A", 0.1, 0.2)])).unwrap();
    assert_eq!(summary.var95, 4.95);
    assert_abs_diff_eq!(summary.mean_simulated_return, 49.5, epsilon = 1e-12);
  }

  #[test]
  fn value_at_risk_matches_plain_percentile() {
    let sample = SimulatedSample::from((0..100).map(f64::from).collect::<Vec<_>>());
    assert_eq!(value_at_risk(&sample, VAR_CONFIDENCE).unwrap(), 4.95);
    assert_eq!(
      value_at_risk(&sample, VAR_CONFIDENCE).unwrap(),
      percentile(sample.values(), VAR_PERCENTILE)
    );
    assert_eq!(
      value_at_risk(&sample, 0.99).unwrap(),
      percentile(sample.values(), 1.0)
    );
  }

  #[test]
  fn percentile_ignores_input_order() {
    let values = [5.0, -1.0, 3.0, 2.0, 0.0];
    assert_eq!(percentile(&values, 0.0), -1.0);
    assert_eq!(percentile(&values, 100.0), 5.0);
    assert_eq!(percentile(&values, 50.0), 2.0);
    assert_abs_diff_eq!(percentile(&values, 10.0), -0.6, epsilon = 1e-12);
  }

  #[test]
  fn percentile_of_empty_is_nan() {
    assert!(percentile(&[], 5.0).is_nan());
  }

  #[test]
  fn empty_sample_is_rejected() {
    let sample = SimulatedSample::from(Vec::new());
    assert!(matches!(
      value_at_risk(&sample, 0.95),
      Err(RiskError::EmptySample)
    ));
    assert!(matches!(
      summarize(&sample, &stats(&[("A", 0.1, 0.2)])),
      Err(RiskError::EmptySample)
    ));
  }

  #[test]
  fn rejects_confidence_out_of_range() {
    let sample = SimulatedSample::from(vec![1.0, 2.0]);
    assert!(value_at_risk(&sample, 1.0).is_err());
    assert!(value_at_risk(&sample, 0.0).is_err());
  }

  #[test]
  fn best_and_worst_assets_break_ties_by_order() {
    let s = stats(&[
      ("A", 0.05, 0.30),
      ("B", 0.12, 0.10),
      ("C", 0.12, 0.30),
    ]);
    let sample = SimulatedSample::from(vec![0.0, 1.0]);
    let summary = summarize(&sample, &s).unwrap();
    assert_eq!(summary.best_asset, "B");
    assert_eq!(summary.best_annual_return, 0.12);
    assert_eq!(summary.worst_vol_asset, "A");
    assert_eq!(summary.worst_annual_vol, 0.30);
  }

  #[test]
  fn summarize_does_not_reorder_sample() {
    let sample = SimulatedSample::from(vec![3.0, 1.0, 2.0]);
    let _ = summarize(&sample, &stats(&[("A", 0.0, 0.0)])).unwrap();
    assert_eq!(sample.values(), &[3.0, 1.0, 2.0]);
  }

  #[test]
  fn histogram_counts_every_value() {
    let values: Vec<f64> = (0..100).map(f64::from).collect();
    let bins = histogram(&values, 40);
    assert_eq!(bins.len(), 40);
    assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 100);
    assert_eq!(bins[0].lower, 0.0);
    assert_eq!(bins[39].upper, 99.0);
    assert_eq!(bins[39].count, 3);
  }

  #[test]
  fn histogram_of_constant_sample_uses_unit_span() {
    let bins = histogram(&[2.0, 2.0, 2.0], 4);
    assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
    assert_eq!(bins[0].lower, 1.5);
    assert_eq!(bins[3].upper, 2.5);
  }
}

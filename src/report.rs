//! # Report
//!
//! Plain-text rendering of a [`RiskReport`]: metrics and matrix tables,
//! headline risk figures, a histogram of simulated returns and the two
//! recommendation lines.

use std::fmt::Write;

use ndarray::Array2;
use prettytable::Cell;
use prettytable::Row;
use prettytable::Table;
use prettytable::format;
use prettytable::row;

use crate::engine::RiskReport;
use crate::summary::HistogramBin;

const HISTOGRAM_WIDTH: usize = 50;

fn pct(x: f64) -> String {
  format!("{:.2}", x * 100.0)
}

/// Per-asset annualized return and volatility, in percent.
pub fn metrics_table(report: &RiskReport) -> Table {
  let mut table = Table::new();
  table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
  table.set_titles(row!["Asset", "Annual Return (%)", "Annual Volatility (%)"]);
  for s in &report.stats {
    table.add_row(row![s.asset, r->pct(s.annual_return), r->pct(s.annual_vol)]);
  }
  table
}

/// Labeled square matrix with a fixed number of decimals.
pub fn matrix_table(assets: &[String], values: &Array2<f64>, decimals: usize) -> Table {
  let mut table = Table::new();
  table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

  let mut titles = vec![Cell::new("")];
  titles.extend(assets.iter().map(|a| Cell::new(a)));
  table.set_titles(Row::new(titles));

  for (i, asset) in assets.iter().enumerate() {
    let mut cells = vec![Cell::new(asset)];
    for j in 0..assets.len() {
      cells.push(Cell::new_align(
        &format!("{:.*}", decimals, values[[i, j]]),
        format::Alignment::RIGHT,
      ));
    }
    table.add_row(Row::new(cells));
  }
  table
}

/// Horizontal bar chart of the histogram; the bin holding `marker` is flagged.
pub fn render_histogram(bins: &[HistogramBin], marker: f64) -> String {
  let peak = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);
  let mut out = String::new();
  for (k, bin) in bins.iter().enumerate() {
    let last = k + 1 == bins.len();
    let holds_marker =
      marker >= bin.lower && (marker < bin.upper || (last && marker <= bin.upper));
    let bar = "#".repeat(bin.count * HISTOGRAM_WIDTH / peak);
    let _ = writeln!(
      out,
      "{:>8}% {:<width$} {}{}",
      pct(bin.lower),
      bar,
      bin.count,
      if holds_marker { "  <- VaR 95%" } else { "" },
      width = HISTOGRAM_WIDTH
    );
  }
  out
}

/// Full text report for terminal output.
pub fn render_report(report: &RiskReport) -> String {
  let summary = &report.summary;
  let mut out = String::new();

  let _ = writeln!(out, "Financial metrics (annualized)");
  let _ = write!(out, "{}", metrics_table(report));
  let _ = writeln!(out, "\nCovariance matrix");
  let _ = write!(
    out,
    "{}",
    matrix_table(report.covariance.assets(), report.covariance.values(), 6)
  );
  let _ = writeln!(out, "\nCorrelation matrix");
  let _ = write!(
    out,
    "{}",
    matrix_table(report.correlation.assets(), report.correlation.values(), 3)
  );

  let _ = writeln!(
    out,
    "\nMonte Carlo simulation (equal-weighted, {} paths, seed {})",
    report.sample.len(),
    report.sample.seed()
  );
  let _ = writeln!(out, "Value at Risk (95%): {}%", pct(summary.var95));
  let _ = writeln!(
    out,
    "Mean simulated return: {}%",
    pct(summary.mean_simulated_return)
  );
  let _ = writeln!(out);
  out.push_str(&render_histogram(&report.histogram, summary.var95));

  let _ = writeln!(out, "\nRecommendations");
  let _ = writeln!(
    out,
    "Best performer: {} with an annual return of {}%.",
    summary.best_asset,
    pct(summary.best_annual_return)
  );
  let _ = writeln!(
    out,
    "Riskiest asset: {} with an annual volatility of {}%.",
    summary.worst_vol_asset,
    pct(summary.worst_annual_vol)
  );
  out
}

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use anyhow::Result;
use basket_risk::MonteCarloConfig;
use basket_risk::RiskEngine;
use basket_risk::RiskEngineConfig;
use basket_risk::io::read_price_csv;
use basket_risk::report::render_report;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "Risk/return statistics and Monte Carlo VaR for a basket of price series",
  after_help = "EXAMPLES:
    # Analyze every numeric column of a CSV price table
    basket-risk prices.csv

    # Reproducible run with 20k paths over a half-year horizon
    basket-risk prices.csv --simulations 20000 --horizon 126 --seed 42"
)]
struct Args {
  /// CSV file with a header row; non-numeric columns are ignored
  path: PathBuf,

  /// Number of Monte Carlo paths
  #[arg(long, default_value_t = 5000)]
  simulations: usize,

  /// Simulated trading days per path
  #[arg(long, default_value_t = 252)]
  horizon: usize,

  /// Seed for a reproducible simulation
  #[arg(long)]
  seed: Option<u64>,

  /// Abort the simulation after this many seconds
  #[arg(long)]
  timeout_secs: Option<u64>,

  /// Histogram buckets
  #[arg(long, default_value_t = 40)]
  bins: usize,
}

fn main() -> Result<()> {
  let env_filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("basket_risk=info"));
  tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();
  let prices = read_price_csv(&args.path)
    .with_context(|| format!("failed to load {}", args.path.display()))?;

  let engine = RiskEngine::new(RiskEngineConfig {
    monte_carlo: MonteCarloConfig {
      horizon_days: args.horizon,
      num_simulations: args.simulations,
      seed: args.seed,
    },
    timeout: args.timeout_secs.map(Duration::from_secs),
    histogram_bins: args.bins,
  });

  let report = engine.analyze(&prices)?;
  print!("{}", render_report(&report));
  Ok(())
}

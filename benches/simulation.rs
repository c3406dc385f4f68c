use std::hint::black_box;

use basket_risk::CancelToken;
use basket_risk::CovarianceMatrix;
use basket_risk::MonteCarloConfig;
use basket_risk::Weights;
use basket_risk::simulation::simulate_portfolio;
use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use ndarray::Array1;
use ndarray::Array2;

fn inputs(n: usize) -> (Array1<f64>, CovarianceMatrix, Weights) {
  let mean = Array1::from_elem(n, 3e-4);
  let cov = Array2::from_shape_fn((n, n), |(i, j)| {
    if i == j {
      2e-4
    } else {
      5e-5
    }
  });
  let names = (0..n).map(|i| format!("A{i}")).collect();
  (
    mean,
    CovarianceMatrix::new(names, cov).unwrap(),
    Weights::equal(n).unwrap(),
  )
}

fn bench_simulate(c: &mut Criterion) {
  let mut group = c.benchmark_group("simulate_portfolio");
  group.sample_size(10);

  for n in [2usize, 10, 50] {
    let (mean, cov, w) = inputs(n);
    let cfg = MonteCarloConfig::seeded(42);
    group.bench_with_input(BenchmarkId::new("assets", n), &n, |b, _| {
      b.iter(|| {
        let sample = simulate_portfolio(&mean, &cov, &w, &cfg, &CancelToken::new()).unwrap();
        black_box(sample.len())
      })
    });
  }

  group.finish();
}

criterion_group!(benches, bench_simulate);
criterion_main!(benches);

use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::BenchmarkId;
use criterion::Criterion;
use forecast_losses::mae;
use forecast_losses::mqloss;
use forecast_losses::smape;
use ndarray::Array;
use ndarray::Array1;
use ndarray::Axis;
use ndarray_rand::RandomExt;
use rand_distr::Uniform;

fn bench_mae_by_size(c: &mut Criterion) {
  let mut group = c.benchmark_group("MAE_by_size");

  for &n in &[1_024, 16_384, 262_144] {
    let y = Array1::<f64>::random(n, Uniform::new(-1.0, 1.0));
    let y_hat = Array1::<f64>::random(n, Uniform::new(-1.0, 1.0));

    group.bench_with_input(BenchmarkId::new("full", n), &n, |b, _| {
      b.iter(|| black_box(mae(y.view(), y_hat.view(), None, None).unwrap()));
    });
  }

  group.finish();
}

fn bench_axis_reduction(c: &mut Criterion) {
  let mut group = c.benchmark_group("axis_reduction");
  let (series, horizon) = (2_048, 48);
  let y = Array::random((series, horizon), Uniform::new(0.5, 2.0));
  let y_hat = Array::random((series, horizon), Uniform::new(0.5, 2.0));
  let w = Array::random((series, horizon), Uniform::new(0.0, 1.0));

  group.bench_function("mae/per_series", |b| {
    b.iter(|| black_box(mae(y.view(), y_hat.view(), Some(w.view()), Some(Axis(1))).unwrap()));
  });

  group.bench_function("smape/per_series", |b| {
    b.iter(|| black_box(smape(y.view(), y_hat.view(), None, Some(Axis(1))).unwrap()));
  });

  group.finish();
}

fn bench_mqloss_by_levels(c: &mut Criterion) {
  let mut group = c.benchmark_group("MQLoss_by_levels");
  let (series, horizon) = (512, 24);
  let y = Array::random((series, horizon), Uniform::new(0.0, 1.0));

  for &n_q in &[3usize, 9, 19] {
    let quantiles = Array1::linspace(0.05, 0.95, n_q);
    let y_hat = Array::random((series, horizon, n_q), Uniform::new(0.0, 1.0));

    group.bench_with_input(BenchmarkId::new("full", n_q), &n_q, |b, _| {
      b.iter(|| black_box(mqloss(y.view(), y_hat.view(), quantiles.view(), None, None).unwrap()));
    });
  }

  group.finish();
}

criterion_group!(
  benches,
  bench_mae_by_size,
  bench_axis_reduction,
  bench_mqloss_by_levels
);
criterion_main!(benches);

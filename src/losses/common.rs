//! # Common
//!
//! $$
//! \bar e=\frac{\sum_i w_i e_i\,\mathbb{1}[e_i\ne\mathrm{NaN}]}{\sum_i w_i\,\mathbb{1}[e_i\ne\mathrm{NaN}]}
//! $$
//!
use anyhow::Result;
use anyhow::bail;
use anyhow::ensure;
use either::Either;
use ndarray::Array;
use ndarray::ArrayView;
use ndarray::Axis;
use ndarray::Dimension;
use ndarray::Zip;

use crate::traits::FloatExt;
use crate::traits::Reduced;

/// How a reduction treats NaN entries of the value array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NanPolicy {
  /// NaN values flow into the result.
  Propagate,
  /// NaN values are dropped together with their weights.
  Omit,
}

/// Elementwise `a / b` with NaN and infinite quotients replaced by zero.
pub fn divide_no_nan<T: FloatExt, D: Dimension>(
  a: &ArrayView<'_, T, D>,
  b: &ArrayView<'_, T, D>,
) -> Result<Array<T, D>> {
  ensure!(
    a.shape() == b.shape(),
    "divide_no_nan shape mismatch: {:?} vs {:?}",
    a.shape(),
    b.shape()
  );

  Ok(Zip::from(a).and(b).map_collect(|&num, &den| {
    let q = num / den;
    if q.is_finite() { q } else { T::zero() }
  }))
}

/// Checks that `weights`, when given, match the shape of `y` and have a positive sum.
pub fn validate_weights<T: FloatExt, D: Dimension>(
  y: &ArrayView<'_, T, D>,
  weights: Option<&ArrayView<'_, T, D>>,
) -> Result<()> {
  let Some(w) = weights else {
    return Ok(());
  };

  // NaN sums fail here as well.
  if !(w.sum() > T::zero()) {
    bail!("sum of weights cannot be 0");
  }
  ensure!(
    w.shape() == y.shape(),
    "wrong weight dimension: weights {:?} vs y {:?}",
    w.shape(),
    y.shape()
  );

  Ok(())
}

/// Shared precondition check of the point metrics.
pub fn metric_protections<T: FloatExt, D: Dimension>(
  y: &ArrayView<'_, T, D>,
  y_hat: &ArrayView<'_, T, D>,
  weights: Option<&ArrayView<'_, T, D>>,
) -> Result<()> {
  ensure!(
    y.shape() == y_hat.shape(),
    "y and y_hat shape mismatch: {:?} vs {:?}",
    y.shape(),
    y_hat.shape()
  );
  validate_weights(y, weights)
}

pub(crate) fn check_axis(ndim: usize, axis: Option<Axis>) -> Result<()> {
  if let Some(Axis(k)) = axis {
    ensure!(k < ndim, "axis out of bounds: axis {k} for an array of rank {ndim}");
  }
  Ok(())
}

pub(crate) fn elementwise<T, D, F>(
  y: &ArrayView<'_, T, D>,
  y_hat: &ArrayView<'_, T, D>,
  f: F,
) -> Array<T, D>
where
  T: FloatExt,
  D: Dimension,
  F: Fn(T, T) -> T,
{
  Zip::from(y).and(y_hat).map_collect(|&a, &b| f(a, b))
}

fn lane_mean<T, I>(pairs: I, policy: NanPolicy) -> T
where
  T: FloatExt,
  I: Iterator<Item = (T, T)>,
{
  let mut num = T::zero();
  let mut den = T::zero();
  for (v, w) in pairs {
    if policy == NanPolicy::Omit && v.is_nan() {
      continue;
    }
    num += v * w;
    den += w;
  }

  if den == T::zero() {
    tracing::warn!(?policy, "reduction lane has no weight left, result is NaN");
    return T::nan();
  }
  num / den
}

/// Weighted (or plain) mean along `axis`, or over every element when `axis` is `None`.
///
/// Lanes are reduced independently, so the axis-wise pass runs them in parallel.
pub fn reduce<T: FloatExt, D: Dimension>(
  values: ArrayView<'_, T, D>,
  weights: Option<ArrayView<'_, T, D>>,
  axis: Option<Axis>,
  policy: NanPolicy,
) -> Result<Reduced<T>> {
  if let Some(w) = &weights {
    ensure!(
      w.shape() == values.shape(),
      "wrong weight dimension: weights {:?} vs values {:?}",
      w.shape(),
      values.shape()
    );
  }
  check_axis(values.ndim(), axis)?;

  let Some(axis) = axis else {
    let value = match &weights {
      Some(w) => lane_mean(values.iter().copied().zip(w.iter().copied()), policy),
      None => lane_mean(values.iter().map(|&v| (v, T::one())), policy),
    };
    return Ok(Either::Left(value));
  };

  let out = match &weights {
    Some(w) => Zip::from(values.lanes(axis))
      .and(w.lanes(axis))
      .par_map_collect(|v, w| lane_mean(v.iter().copied().zip(w.iter().copied()), policy)),
    None => Zip::from(values.lanes(axis))
      .par_map_collect(|v| lane_mean(v.iter().map(|&x| (x, T::one())), policy)),
  };

  Ok(Either::Right(out.into_dyn()))
}

/// `np.average` semantics: NaN values propagate.
pub fn average<T: FloatExt, D: Dimension>(
  values: ArrayView<'_, T, D>,
  weights: Option<ArrayView<'_, T, D>>,
  axis: Option<Axis>,
) -> Result<Reduced<T>> {
  reduce(values, weights, axis, NanPolicy::Propagate)
}

/// NaN-aware mean: NaN values and their weights are excluded before averaging.
pub fn nan_average<T: FloatExt, D: Dimension>(
  values: ArrayView<'_, T, D>,
  weights: Option<ArrayView<'_, T, D>>,
  axis: Option<Axis>,
) -> Result<Reduced<T>> {
  reduce(values, weights, axis, NanPolicy::Omit)
}

/// Combines two reductions of the same kind elementwise.
pub(crate) fn combine<T, F>(lhs: Reduced<T>, rhs: Reduced<T>, f: F) -> Result<Reduced<T>>
where
  T: FloatExt,
  F: Fn(T, T) -> T,
{
  match (lhs, rhs) {
    (Either::Left(a), Either::Left(b)) => Ok(Either::Left(f(a, b))),
    (Either::Right(a), Either::Right(b)) => {
      ensure!(
        a.shape() == b.shape(),
        "reduced shapes differ: {:?} vs {:?}",
        a.shape(),
        b.shape()
      );
      Ok(Either::Right(
        Zip::from(&a).and(&b).map_collect(|&x, &y| f(x, y)),
      ))
    }
    _ => bail!("cannot combine a full reduction with an axis-wise one"),
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use ndarray::Axis;
  use ndarray::array;
  use tracing_test::traced_test;

  use super::*;
  use crate::traits::ReducedExt;

  #[test]
  fn divide_no_nan_zeroes_undefined_quotients() {
    let a = array![1.0, 0.0, -1.0, 6.0];
    let b = array![0.0, 0.0, 0.0, 3.0];
    let q = divide_no_nan(&a.view(), &b.view()).unwrap();
    assert_eq!(q, array![0.0, 0.0, 0.0, 2.0]);
  }

  #[test]
  fn divide_no_nan_zeroes_nan_inputs() {
    let a = array![f64::NAN, 2.0];
    let b = array![1.0, f64::NAN];
    let q = divide_no_nan(&a.view(), &b.view()).unwrap();
    assert_eq!(q, array![0.0, 0.0]);
  }

  #[test]
  fn zero_weight_sum_is_rejected() {
    let y = array![1.0, 2.0];
    let w = array![0.0, 0.0];
    let err = validate_weights(&y.view(), Some(&w.view())).unwrap_err();
    assert!(err.to_string().contains("sum of weights cannot be 0"));
  }

  #[test]
  fn weight_shape_mismatch_is_rejected() {
    let y = array![1.0, 2.0];
    let w = array![1.0, 1.0, 1.0];
    let err = validate_weights(&y.view(), Some(&w.view())).unwrap_err();
    assert!(err.to_string().contains("wrong weight dimension"));
  }

  #[test]
  fn prediction_shape_mismatch_is_rejected() {
    let y = array![1.0, 2.0];
    let y_hat = array![1.0];
    let err = metric_protections(&y.view(), &y_hat.view(), None).unwrap_err();
    assert!(err.to_string().contains("y and y_hat shape mismatch"));
  }

  #[test]
  fn nan_average_skips_missing_values_and_weights() {
    let v = array![1.0, f64::NAN, 3.0];
    let w = array![1.0, 100.0, 3.0];
    let r = nan_average(v.view(), Some(w.view()), None).unwrap();
    assert_abs_diff_eq!(r.scalar().unwrap(), 2.5, epsilon = 1e-12);

    let plain = nan_average(v.view(), None, None).unwrap();
    assert_abs_diff_eq!(plain.scalar().unwrap(), 2.0, epsilon = 1e-12);
  }

  #[test]
  fn average_propagates_nan() {
    let v = array![1.0, f64::NAN, 3.0];
    let r = average(v.view(), None, None).unwrap();
    assert!(r.scalar().unwrap().is_nan());
  }

  #[test]
  fn axis_reduction_matches_row_means() {
    let v = array![[1.0, 2.0, 3.0], [4.0, 6.0, 8.0]];
    let rows = average(v.view(), None, Some(Axis(1))).unwrap().into_array();
    assert_eq!(rows, array![2.0, 6.0].into_dyn());

    let cols = average(v.view(), None, Some(Axis(0))).unwrap().into_array();
    assert_eq!(cols, array![2.5, 4.0, 5.5].into_dyn());
  }

  #[test]
  fn axis_out_of_bounds_is_rejected() {
    let v = array![1.0, 2.0];
    let err = average(v.view(), None, Some(Axis(1))).unwrap_err();
    assert!(err.to_string().contains("axis out of bounds"));
  }

  #[test]
  fn all_nan_lane_reduces_to_nan() {
    let v = array![[f64::NAN, f64::NAN], [1.0, 3.0]];
    let r = nan_average(v.view(), None, Some(Axis(1))).unwrap().into_array();
    assert!(r[[0]].is_nan());
    assert_abs_diff_eq!(r[[1]], 2.0, epsilon = 1e-12);
  }

  #[test]
  #[traced_test]
  fn empty_full_reduction_is_logged() {
    let v = array![f64::NAN, f64::NAN];
    let r = nan_average(v.view(), None, None).unwrap();
    assert!(r.scalar().unwrap().is_nan());
    assert!(logs_contain("reduction lane has no weight left"));
  }

  #[test]
  fn combine_rejects_mixed_reductions() {
    let full: Reduced<f64> = Either::Left(1.0);
    let lanes: Reduced<f64> = Either::Right(array![1.0].into_dyn());
    assert!(combine(full, lanes, |a, b| a / b).is_err());
  }
}

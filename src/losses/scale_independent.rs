//! # Scale-independent errors
//!
//! $$
//! \mathrm{MASE}=\frac{\mathrm{MAE}(y,\hat y)}{\frac{1}{T-m}\sum_{t=1}^{T-m}|y^{\text{train}}_{t+m}-y^{\text{train}}_t|},\quad
//! \mathrm{RMAE}=\frac{\mathrm{MAE}(y,\hat y_1)}{\mathrm{MAE}(y,\hat y_2)}
//! $$
//!
use anyhow::Result;
use anyhow::ensure;
use ndarray::ArrayView;
use ndarray::Axis;
use ndarray::Dimension;
use ndarray::Slice;
use ndarray::Zip;

use super::common::average;
use super::common::combine;
use super::common::elementwise;
use super::common::metric_protections;
use super::scale_dependent::mae;
use crate::traits::FloatExt;
use crate::traits::Reduced;
use crate::traits::ReducedExt;

/// Mean Absolute Scaled Error.
///
/// The scale is the in-sample MAE of the seasonal-naive forecast at lag `seasonality`,
/// taken along the last axis of `y_train` and reduced with the same `axis` as the
/// numerator. The lag axis is the last one, not the first, so a `(series, time)`
/// training panel lines up with a `(series, horizon)` target. A zero scale is not an
/// error and yields a non-finite value.
///
/// # Errors
/// Fails on invalid weights, when `seasonality` is 0 or not smaller than the training
/// length, or when the axis-wise numerator and scale do not line up.
pub fn mase<T: FloatExt, D: Dimension, E: Dimension>(
  y: ArrayView<'_, T, D>,
  y_hat: ArrayView<'_, T, D>,
  y_train: ArrayView<'_, T, E>,
  seasonality: usize,
  weights: Option<ArrayView<'_, T, D>>,
  axis: Option<Axis>,
) -> Result<Reduced<T>> {
  metric_protections(&y, &y_hat, weights.as_ref())?;
  ensure!(y_train.ndim() > 0, "y_train must have at least one axis");

  let lag_axis = Axis(y_train.ndim() - 1);
  let n = y_train.len_of(lag_axis);
  ensure!(
    seasonality >= 1 && seasonality < n,
    "seasonality must be in [1, len(y_train)): got {seasonality} for length {n}"
  );

  let delta = elementwise(&y, &y_hat, |a, b| (a - b).abs());
  let numerator = average(delta.view(), weights, axis)?;

  let head = y_train.slice_axis(lag_axis, Slice::from(..n - seasonality));
  let tail = y_train.slice_axis(lag_axis, Slice::from(seasonality..));
  let naive = Zip::from(&head)
    .and(&tail)
    .map_collect(|&a, &b| (a - b).abs());
  let scale = average(naive.view(), None, axis)?;

  if !scale.all(|s| s != T::zero()) {
    tracing::debug!(seasonality, "seasonal-naive scale is zero, MASE is not finite");
  }

  combine(numerator, scale, |num, den| num / den)
}

/// Relative Mean Absolute Error of two forecasts of the same target.
///
/// Values below 1 mean `y_hat1` beats `y_hat2`.
pub fn rmae<T: FloatExt, D: Dimension>(
  y: ArrayView<'_, T, D>,
  y_hat1: ArrayView<'_, T, D>,
  y_hat2: ArrayView<'_, T, D>,
  weights: Option<ArrayView<'_, T, D>>,
  axis: Option<Axis>,
) -> Result<Reduced<T>> {
  let numerator = mae(y.view(), y_hat1, weights.as_ref().map(|w| w.view()), axis)?;
  let denominator = mae(y, y_hat2, weights, axis)?;
  combine(numerator, denominator, |num, den| num / den)
}

//! # Percentage errors
//!
//! $$
//! \mathrm{MAPE}=\frac{\sum_i w_i\frac{|y_i-\hat y_i|}{|y_i|}}{\sum_i w_i},\quad
//! \mathrm{SMAPE}=\frac{2\sum_i w_i\frac{|y_i-\hat y_i|}{|y_i|+|\hat y_i|}}{\sum_i w_i}
//! $$
//!
use anyhow::Result;
use anyhow::bail;
use ndarray::ArrayView;
use ndarray::Axis;
use ndarray::Dimension;

use super::common::average;
use super::common::divide_no_nan;
use super::common::elementwise;
use super::common::metric_protections;
use crate::traits::FloatExt;
use crate::traits::Reduced;
use crate::traits::ReducedExt;

/// Mean Absolute Percentage Error, as a fraction (not in %).
///
/// Terms with `y_i = 0` contribute zero but still count in the mean.
pub fn mape<T: FloatExt, D: Dimension>(
  y: ArrayView<'_, T, D>,
  y_hat: ArrayView<'_, T, D>,
  weights: Option<ArrayView<'_, T, D>>,
  axis: Option<Axis>,
) -> Result<Reduced<T>> {
  metric_protections(&y, &y_hat, weights.as_ref())?;
  let delta = elementwise(&y, &y_hat, |a, b| (a - b).abs());
  let scale = y.mapv(|a| a.abs());
  let ratio = divide_no_nan(&delta.view(), &scale.view())?;
  average(ratio.view(), weights, axis)
}

/// Symmetric Mean Absolute Percentage Error, bounded in `[0, 2]`.
///
/// # Errors
/// Fails when the reduced value exceeds 2, which only happens for malformed weights.
pub fn smape<T: FloatExt, D: Dimension>(
  y: ArrayView<'_, T, D>,
  y_hat: ArrayView<'_, T, D>,
  weights: Option<ArrayView<'_, T, D>>,
  axis: Option<Axis>,
) -> Result<Reduced<T>> {
  metric_protections(&y, &y_hat, weights.as_ref())?;
  let delta = elementwise(&y, &y_hat, |a, b| (a - b).abs());
  let scale = elementwise(&y, &y_hat, |a, b| a.abs() + b.abs());
  let ratio = divide_no_nan(&delta.view(), &scale.view())?;

  let two = T::from_f64_fast(2.0);
  let smape = average(ratio.view(), weights, axis)?.map_values(|v| two * v);
  if !smape.all(|v| v <= two) {
    tracing::warn!(result = ?smape, "SMAPE left its [0, 2] range");
    bail!("SMAPE should be lower than 2");
  }

  Ok(smape)
}

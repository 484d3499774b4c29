//! # Scale-dependent errors
//!
//! $$
//! \mathrm{MAE}=\frac{\sum_i w_i|y_i-\hat y_i|}{\sum_i w_i},\quad
//! \mathrm{MSE}=\frac{\sum_i w_i(y_i-\hat y_i)^2}{\sum_i w_i},\quad
//! \mathrm{RMSE}=\sqrt{\mathrm{MSE}}
//! $$
//!
use anyhow::Result;
use ndarray::ArrayView;
use ndarray::Axis;
use ndarray::Dimension;

use super::common::elementwise;
use super::common::metric_protections;
use super::common::nan_average;
use crate::traits::FloatExt;
use crate::traits::Reduced;
use crate::traits::ReducedExt;

/// Mean Absolute Error.
///
/// Positions where `|y - y_hat|` is NaN are left out of both the values and the weights.
pub fn mae<T: FloatExt, D: Dimension>(
  y: ArrayView<'_, T, D>,
  y_hat: ArrayView<'_, T, D>,
  weights: Option<ArrayView<'_, T, D>>,
  axis: Option<Axis>,
) -> Result<Reduced<T>> {
  metric_protections(&y, &y_hat, weights.as_ref())?;
  let delta = elementwise(&y, &y_hat, |a, b| (a - b).abs());
  nan_average(delta.view(), weights, axis)
}

/// Mean Squared Error, with the same missing-value handling as [`mae`].
pub fn mse<T: FloatExt, D: Dimension>(
  y: ArrayView<'_, T, D>,
  y_hat: ArrayView<'_, T, D>,
  weights: Option<ArrayView<'_, T, D>>,
  axis: Option<Axis>,
) -> Result<Reduced<T>> {
  metric_protections(&y, &y_hat, weights.as_ref())?;
  let delta = elementwise(&y, &y_hat, |a, b| (a - b).powi(2));
  nan_average(delta.view(), weights, axis)
}

/// Root Mean Squared Error: RMSE = √MSE
pub fn rmse<T: FloatExt, D: Dimension>(
  y: ArrayView<'_, T, D>,
  y_hat: ArrayView<'_, T, D>,
  weights: Option<ArrayView<'_, T, D>>,
  axis: Option<Axis>,
) -> Result<Reduced<T>> {
  Ok(mse(y, y_hat, weights, axis)?.map_values(|v| v.sqrt()))
}

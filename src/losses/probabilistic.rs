//! # Probabilistic losses
//!
//! $$
//! \rho_q(e)=\max\{q\,e,(q-1)\,e\},\quad
//! \mathrm{MQL}=\frac{\sum_{i,k} w_i\left[q_k(\hat y_{ik}-y_i)^- + (1-q_k)(\hat y_{ik}-y_i)^+\right]}{Q\sum_i w_i}
//! $$
//!
//! With uniformly spaced levels the multi-quantile loss is a left Riemann sum of the
//! CRPS integral $\int_0^1 \rho_q\,dq$.
//!
use anyhow::Result;
use anyhow::anyhow;
use anyhow::ensure;
use ndarray::Array;
use ndarray::ArrayView;
use ndarray::ArrayView1;
use ndarray::Axis;
use ndarray::Dimension;
use ndarray::Zip;

use super::common::average;
use super::common::elementwise;
use super::common::metric_protections;
use super::common::nan_average;
use super::common::validate_weights;
use crate::traits::FloatExt;
use crate::traits::Reduced;

fn check_level<T: FloatExt>(q: T) -> Result<()> {
  ensure!(
    q > T::zero() && q < T::one(),
    "quantile must be in (0, 1): got {q}"
  );
  Ok(())
}

/// Pinball loss at level `q`.
///
/// `q = 0.5` gives half the MAE. Missing errors are handled as in
/// [`mae`](super::scale_dependent::mae).
pub fn quantile_loss<T: FloatExt, D: Dimension>(
  y: ArrayView<'_, T, D>,
  y_hat: ArrayView<'_, T, D>,
  q: T,
  weights: Option<ArrayView<'_, T, D>>,
  axis: Option<Axis>,
) -> Result<Reduced<T>> {
  check_level(q)?;
  metric_protections(&y, &y_hat, weights.as_ref())?;

  let loss = elementwise(&y, &y_hat, |a, b| {
    let delta = a - b;
    (q * delta).max((q - T::one()) * delta)
  });
  nan_average(loss.view(), weights, axis)
}

/// Multi-Quantile loss.
///
/// `y_hat` carries one trailing entry per level in `quantiles`, so its shape is
/// `y.shape() + [quantiles.len()]`. Missing weights default to ones; weights are repeated
/// along the quantile axis and `axis` indexes the expanded array.
pub fn mqloss<T: FloatExt, D: Dimension>(
  y: ArrayView<'_, T, D>,
  y_hat: ArrayView<'_, T, D::Larger>,
  quantiles: ArrayView1<'_, T>,
  weights: Option<ArrayView<'_, T, D>>,
  axis: Option<Axis>,
) -> Result<Reduced<T>> {
  for &q in quantiles.iter() {
    check_level(q)?;
  }

  let n_q = quantiles.len();
  let (lead, last) = y_hat.shape().split_at(y_hat.ndim().saturating_sub(1));
  ensure!(
    y_hat.ndim() == y.ndim() + 1 && lead == y.shape(),
    "y and y_hat shape mismatch: y_hat {:?} must be y {:?} plus a quantile axis",
    y_hat.shape(),
    y.shape()
  );
  ensure!(
    last == [n_q],
    "quantile dimension mismatch: y_hat has {:?} levels, quantiles has {n_q}",
    last
  );

  let weights = match weights {
    Some(w) => w.to_owned(),
    None => Array::ones(y.raw_dim()),
  };
  validate_weights(&y, Some(&weights.view()))?;

  let q_axis = Axis(y.ndim());
  let y_rep = y.insert_axis(q_axis);
  let loss = Zip::from(&y_hat)
    .and_broadcast(&y_rep)
    .and_broadcast(&quantiles)
    .map_collect(|&pred, &obs, &q| {
      let error = pred - obs;
      // Float::max drops NaN, keep it so `average` propagates it.
      if error.is_nan() {
        return error;
      }
      q * (-error).max(T::zero()) + (T::one() - q) * error.max(T::zero())
    });

  let w_col = weights.view().insert_axis(q_axis);
  let w_rep = w_col
    .broadcast(y_hat.raw_dim())
    .ok_or_else(|| anyhow!("weights cannot be repeated along the quantile axis"))?;

  average(loss.view(), Some(w_rep), axis)
}

//! # Score
//!
//! $$
//! \mathcal{S}(y,\hat y)=\left(\mathrm{MAE},\mathrm{MSE},\mathrm{RMSE},\mathrm{MAPE},\mathrm{SMAPE},\rho_q,\mathrm{MASE}\right)
//! $$
//!
use std::fmt::Display;

use anyhow::Result;
use anyhow::anyhow;
use impl_new_derive::ImplNew;
use ndarray::ArrayView;
use ndarray::Dimension;
use prettytable::Cell;
use prettytable::Row;
use prettytable::Table;

use super::percentage::mape;
use super::percentage::smape;
use super::probabilistic::quantile_loss;
use super::scale_dependent::mae;
use super::scale_dependent::mse;
use super::scale_independent::mase;
use crate::traits::FloatExt;
use crate::traits::Reduced;
use crate::traits::ReducedExt;

/// Settings for [`ForecastLossScore::compute`].
#[derive(ImplNew, Debug, Clone, Copy)]
pub struct ScoreConfig {
  /// Level of the reported pinball loss.
  pub quantile: f64,
  /// Lag of the seasonal-naive scale used by MASE.
  pub seasonality: usize,
}

impl Default for ScoreConfig {
  fn default() -> Self {
    Self {
      quantile: 0.5,
      seasonality: 1,
    }
  }
}

/// Holds the full-reduction forecast losses in one place.
#[derive(Default, Debug, Clone, Copy)]
pub struct ForecastLossScore<T> {
  /// Mean Absolute Error
  pub mae: T,
  /// Mean Squared Error
  pub mse: T,
  /// Root Mean Squared Error
  pub rmse: T,
  /// Mean Absolute Percentage Error (fraction)
  pub mape: T,
  /// Symmetric Mean Absolute Percentage Error, in [0, 2]
  pub smape: T,
  /// Pinball loss at `ScoreConfig::quantile`
  pub quantile_loss: T,
  /// Mean Absolute Scaled Error, when a training series was given
  pub mase: Option<T>,
}

fn scalar<T: FloatExt>(r: Reduced<T>) -> Result<T> {
  r.scalar().ok_or_else(|| anyhow!("expected a full reduction"))
}

impl<T: FloatExt> ForecastLossScore<T> {
  /// Scores `y_hat` against `y` over all elements.
  pub fn compute<D: Dimension, E: Dimension>(
    y: ArrayView<'_, T, D>,
    y_hat: ArrayView<'_, T, D>,
    y_train: Option<ArrayView<'_, T, E>>,
    cfg: ScoreConfig,
  ) -> Result<Self> {
    let mse = scalar(mse(y.view(), y_hat.view(), None, None)?)?;
    let mase = match y_train {
      Some(train) => Some(scalar(mase(
        y.view(),
        y_hat.view(),
        train,
        cfg.seasonality,
        None,
        None,
      )?)?),
      None => None,
    };

    Ok(Self {
      mae: scalar(mae(y.view(), y_hat.view(), None, None)?)?,
      mse,
      rmse: mse.sqrt(),
      mape: scalar(mape(y.view(), y_hat.view(), None, None)?)?,
      smape: scalar(smape(y.view(), y_hat.view(), None, None)?)?,
      quantile_loss: scalar(quantile_loss(
        y,
        y_hat,
        T::from_f64_fast(cfg.quantile),
        None,
        None,
      )?)?,
      mase,
    })
  }

  /// Two-column metric/value table.
  pub fn table(&self) -> Table {
    let mut table = Table::new();
    table.set_titles(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));

    let rows = [
      ("MAE", Some(self.mae)),
      ("MSE", Some(self.mse)),
      ("RMSE", Some(self.rmse)),
      ("MAPE", Some(self.mape)),
      ("SMAPE", Some(self.smape)),
      ("Quantile loss", Some(self.quantile_loss)),
      ("MASE", self.mase),
    ];

    for (name, value) in rows {
      let value = match value {
        Some(v) => format!("{v:.6}"),
        None => "-".to_string(),
      };
      table.add_row(Row::new(vec![Cell::new(name), Cell::new(&value)]));
    }
    table
  }
}

impl<T: FloatExt> Display for ForecastLossScore<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.table())
  }
}

//! # forecast-losses
//!
//! $$
//! \ell:\ (y,\hat y,w)\mapsto \frac{\sum_i w_i\,e(y_i,\hat y_i)}{\sum_i w_i}
//! $$
//!
//! Forecast evaluation losses over `ndarray` arrays: scale-dependent (MAE, MSE, RMSE),
//! percentage (MAPE, SMAPE), scale-independent (MASE, RMAE) and quantile (pinball,
//! multi-quantile) errors, with optional weights and axis-wise reduction.
//!
pub mod losses;
pub mod traits;

pub use losses::*;
pub use traits::FloatExt;
pub use traits::Reduced;
pub use traits::ReducedExt;

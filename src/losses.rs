//! # Losses
//!
//! $$
//! L=\frac{\sum_{i}w_i\,\ell(y_i,\hat y_i)}{\sum_i w_i}
//! $$
//!
//! Every loss takes `y`, the prediction(s), optional `weights` shaped like `y` and an
//! optional reduction `axis`. `axis = None` reduces to a scalar (`Either::Left`), an axis
//! reduces to an array of one rank less (`Either::Right`).
//!
pub mod common;
pub mod percentage;
pub mod probabilistic;
pub mod scale_dependent;
pub mod scale_independent;
pub mod score;

pub use common::divide_no_nan;
pub use common::metric_protections;
pub use percentage::mape;
pub use percentage::smape;
pub use probabilistic::mqloss;
pub use probabilistic::quantile_loss;
pub use scale_dependent::mae;
pub use scale_dependent::mse;
pub use scale_dependent::rmse;
pub use scale_independent::mase;
pub use scale_independent::rmae;
pub use score::ForecastLossScore;
pub use score::ScoreConfig;

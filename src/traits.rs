//! # Traits
//!
//! $$
//! \ell:\mathbb{R}^{S}\times\mathbb{R}^{S}\to\mathbb{R}\ \text{or}\ \mathbb{R}^{S\setminus\{k\}}
//! $$
//!
use std::fmt::Debug;
use std::fmt::Display;
use std::iter::Sum;
use std::ops::AddAssign;
use std::ops::SubAssign;

use either::Either;
use ndarray::ArrayD;
use ndarray::ScalarOperand;

/// Element type accepted by every loss.
pub trait FloatExt:
  num_traits::Float
  + num_traits::FromPrimitive
  + Sum
  + Default
  + Debug
  + Display
  + Send
  + Sync
  + ScalarOperand
  + AddAssign
  + SubAssign
  + 'static
{
  fn from_usize_(n: usize) -> Self;
  fn from_f64_fast(x: f64) -> Self;
}

impl FloatExt for f64 {
  fn from_usize_(n: usize) -> Self {
    n as f64
  }

  fn from_f64_fast(x: f64) -> Self {
    x
  }
}

impl FloatExt for f32 {
  fn from_usize_(n: usize) -> Self {
    n as f32
  }

  fn from_f64_fast(x: f64) -> Self {
    x as f32
  }
}

/// Result of a loss: `Left` for a full reduction, `Right` for an axis-wise one.
pub type Reduced<T> = Either<T, ArrayD<T>>;

pub trait ReducedExt<T: FloatExt> {
  /// Scalar value of a full reduction, `None` for an axis-wise one.
  fn scalar(&self) -> Option<T>;

  /// Axis-wise values; a scalar becomes a 0-dimensional array.
  fn into_array(self) -> ArrayD<T>;

  /// Whether `pred` holds for every reduced value.
  fn all<F: Fn(T) -> bool>(&self, pred: F) -> bool;

  /// Applies `f` to every reduced value, keeping the reduction kind.
  fn map_values<F: Fn(T) -> T>(self, f: F) -> Self;
}

impl<T: FloatExt> ReducedExt<T> for Reduced<T> {
  fn scalar(&self) -> Option<T> {
    match self {
      Either::Left(v) => Some(*v),
      Either::Right(_) => None,
    }
  }

  fn into_array(self) -> ArrayD<T> {
    match self {
      Either::Left(v) => ArrayD::from_elem(ndarray::IxDyn(&[]), v),
      Either::Right(a) => a,
    }
  }

  fn all<F: Fn(T) -> bool>(&self, pred: F) -> bool {
    match self {
      Either::Left(v) => pred(*v),
      Either::Right(a) => a.iter().all(|&v| pred(v)),
    }
  }

  fn map_values<F: Fn(T) -> T>(self, f: F) -> Self {
    self.map_either(|v| f(v), |a| a.mapv(|v| f(v)))
  }
}

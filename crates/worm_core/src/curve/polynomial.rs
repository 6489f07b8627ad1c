//! PolyCurve - `y = f(x)` polynomial with low-to-high coefficients.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Polynomial `y = Σ cᵢ·xⁱ`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolyCurve {
  /// Coefficients ordered from degree 0 upward.
  pub coeffs: Vec<f64>,
}

impl PolyCurve {
  pub fn new(coeffs: Vec<f64>) -> Self {
    Self { coeffs }
  }

  /// Degree implied by the coefficient count (0 for an empty curve).
  #[inline]
  pub fn order(&self) -> usize {
    self.coeffs.len().saturating_sub(1)
  }

  /// Horner evaluation.
  #[inline]
  pub fn eval(&self, x: f64) -> f64 {
    self.coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
  }

  /// `count` equally spaced samples over `[x_min, x_max]`, both ends
  /// included, lying in the z = 0 plane.
  pub fn sample(&self, x_min: f32, x_max: f32, count: usize) -> Vec<Vec3> {
    match count {
      0 => Vec::new(),
      1 => vec![self.point_at(x_min as f64)],
      _ => {
        let (lo, hi) = (x_min as f64, x_max as f64);
        let step = (hi - lo) / (count - 1) as f64;
        (0..count)
          .map(|i| {
            let x = if i == count - 1 { hi } else { lo + step * i as f64 };
            self.point_at(x)
          })
          .collect()
      }
    }
  }

  #[inline]
  fn point_at(&self, x: f64) -> Vec3 {
    Vec3::new(x as f32, self.eval(x) as f32, 0.0)
  }
}

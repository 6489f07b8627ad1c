//! Polynomial least squares via Householder QR.

use nalgebra::{DMatrix, DVector};

/// Relative threshold on `|R[i][i]|` below which the system is rank
/// deficient.
pub const RANK_TOLERANCE: f64 = 1e-10;

/// Fit `y = Σ cᵢ·xⁱ` of degree `order` to the samples.
///
/// Columns of the Vandermonde matrix are normalized before factoring, then
/// `R·c = Qᵀ·b` is solved by back substitution. Returns None when there are
/// fewer than `order + 1` samples, when the system is rank deficient, or
/// when the solution is not finite.
pub fn solve_polynomial(xs: &[f64], ys: &[f64], order: usize) -> Option<Vec<f64>> {
  let rows = xs.len();
  let cols = order + 1;
  if rows < cols || rows != ys.len() {
    return None;
  }

  let mut a = DMatrix::<f64>::zeros(rows, cols);
  for (r, &x) in xs.iter().enumerate() {
    let mut power = 1.0;
    for c in 0..cols {
      a[(r, c)] = power;
      power *= x;
    }
  }

  let mut scales = DVector::<f64>::zeros(cols);
  for c in 0..cols {
    let norm = a.column(c).norm();
    if !(norm.is_finite() && norm > 0.0) {
      return None;
    }
    a.column_mut(c).unscale_mut(norm);
    scales[c] = norm;
  }

  let qr = a.qr();
  let r = qr.r();
  let max_diag = (0..cols).map(|i| r[(i, i)].abs()).fold(0.0, f64::max);
  if !(max_diag > 0.0) || (0..cols).any(|i| r[(i, i)].abs() <= RANK_TOLERANCE * max_diag) {
    return None;
  }

  let b = DVector::from_column_slice(ys);
  let qtb = qr.q().transpose() * b;
  let scaled = r.solve_upper_triangular(&qtb)?;
  let coeffs = scaled.component_div(&scales);

  coeffs
    .iter()
    .all(|c| c.is_finite())
    .then(|| coeffs.iter().copied().collect())
}

#[cfg(test)]
#[path = "lsq_test.rs"]
mod lsq_test;

//! Centerline fitting for noisy neuron clouds.
//!
//! The cloud's dominant axis is modeled as a polynomial `y = f(x)` over the
//! cloud's X range. Two entry points:
//!
//! - [`CurveFitter::fit_ransac`]: unconstrained search over random minimal
//!   samples, keeping the curve with the most inliers
//! - [`CurveFitter::fit_indices`]: least squares over a known inlier subset
//!
//! Distances to a curve are Euclidean, measured against its sampled polyline
//! in the z = 0 plane, so depth counts toward the distance.

pub mod lsq;
pub mod polynomial;
pub mod ransac;

use glam::Vec3;
use rand::Rng;

pub use polynomial::PolyCurve;
pub use ransac::{sample_distance, RansacFit};

/// Fits polynomials over a borrowed point set.
pub struct CurveFitter<'a> {
  points: &'a [Vec3],
  sample_count: usize,
  x_min: f32,
  x_max: f32,
}

impl<'a> CurveFitter<'a> {
  /// `sample_count` is the number of polyline samples taken along every
  /// candidate curve.
  pub fn new(points: &'a [Vec3], sample_count: usize) -> Self {
    let (x_min, x_max) = points
      .iter()
      .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)));
    Self {
      points,
      sample_count,
      x_min,
      x_max,
    }
  }

  #[inline]
  pub fn points(&self) -> &'a [Vec3] {
    self.points
  }

  /// `[min x, max x]` of the point set, None when empty.
  pub fn x_range(&self) -> Option<(f32, f32)> {
    (!self.points.is_empty()).then_some((self.x_min, self.x_max))
  }

  /// Curve samples over the point set's X range.
  pub fn sample(&self, curve: &PolyCurve) -> Vec<Vec3> {
    match self.x_range() {
      Some((lo, hi)) => curve.sample(lo, hi, self.sample_count),
      None => Vec::new(),
    }
  }

  /// Least-squares fit over the points at `indices`.
  ///
  /// Out-of-range indices are ignored. None when fewer than `order + 1`
  /// usable points remain or the system is singular.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "curve::fit_indices"))]
  pub fn fit_indices(&self, order: usize, indices: &[u32]) -> Option<PolyCurve> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = indices
      .iter()
      .filter_map(|&i| self.points.get(i as usize))
      .map(|p| (p.x as f64, p.y as f64))
      .unzip();
    lsq::solve_polynomial(&xs, &ys, order).map(PolyCurve::new)
  }

  /// RANSAC search over `search_times` random minimal samples.
  ///
  /// None when the set has fewer than `order + 1` points or every trial was
  /// singular.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "curve::fit_ransac"))]
  pub fn fit_ransac<R: Rng + ?Sized>(
    &self,
    order: usize,
    search_times: usize,
    inlier_half_width: f32,
    rng: &mut R,
  ) -> Option<RansacFit> {
    ransac::search(self, order, search_times, inlier_half_width, rng)
  }

  /// Indices of points within `half_width` of the sampled curve.
  pub fn classify(&self, curve: &PolyCurve, half_width: f32) -> Vec<u32> {
    let samples = self.sample(curve);
    self
      .points
      .iter()
      .enumerate()
      .filter(|(_, p)| sample_distance(&samples, **p) <= half_width)
      .map(|(i, _)| i as u32)
      .collect()
  }
}

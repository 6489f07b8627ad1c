//! Random-sample consensus over minimal polynomial fits.

use glam::Vec3;
use rand::Rng;

use super::{lsq, CurveFitter, PolyCurve};

/// Outcome of a RANSAC search.
#[derive(Clone, Debug, PartialEq)]
pub struct RansacFit {
  pub curve: PolyCurve,
  /// Points within the inlier half-width of the winning curve.
  pub inlier_count: usize,
  /// Indices of those points, ascending.
  pub inliers: Vec<u32>,
  /// Trials whose minimal system was singular.
  pub trials_skipped: usize,
}

/// Draw `k` distinct indices below `n` by rejection.
///
/// Requires `k <= n`.
pub fn draw_distinct<R: Rng + ?Sized>(rng: &mut R, n: usize, k: usize, out: &mut Vec<usize>) {
  debug_assert!(k <= n);
  out.clear();
  while out.len() < k {
    let idx = rng.random_range(0..n);
    if !out.contains(&idx) {
      out.push(idx);
    }
  }
}

pub(super) fn search<R: Rng + ?Sized>(
  fitter: &CurveFitter<'_>,
  order: usize,
  search_times: usize,
  inlier_half_width: f32,
  rng: &mut R,
) -> Option<RansacFit> {
  let points = fitter.points();
  let k = order + 1;
  if points.len() < k {
    return None;
  }

  let mut picks = Vec::with_capacity(k);
  let mut xs = vec![0.0f64; k];
  let mut ys = vec![0.0f64; k];
  let mut best: Option<(PolyCurve, usize)> = None;
  let mut trials_skipped = 0;

  for _ in 0..search_times {
    draw_distinct(rng, points.len(), k, &mut picks);
    for (slot, &idx) in picks.iter().enumerate() {
      xs[slot] = points[idx].x as f64;
      ys[slot] = points[idx].y as f64;
    }

    let Some(coeffs) = lsq::solve_polynomial(&xs, &ys, order) else {
      trials_skipped += 1;
      continue;
    };
    let curve = PolyCurve::new(coeffs);
    let samples = fitter.sample(&curve);
    let count = points
      .iter()
      .filter(|p| sample_distance(&samples, **p) <= inlier_half_width)
      .count();

    // Ties keep the earlier trial.
    if best.as_ref().map_or(true, |(_, best_count)| count > *best_count) {
      best = Some((curve, count));
    }
  }

  #[cfg(feature = "tracing")]
  if trials_skipped > 0 {
    tracing::debug!(trials_skipped, search_times, "ransac skipped singular trials");
  }

  let (curve, inlier_count) = best?;
  let inliers = fitter.classify(&curve, inlier_half_width);
  debug_assert_eq!(inliers.len(), inlier_count);
  Some(RansacFit {
    curve,
    inlier_count,
    inliers,
    trials_skipped,
  })
}

/// Euclidean distance from `p` to the nearest sample.
pub fn sample_distance(samples: &[Vec3], p: Vec3) -> f32 {
  samples
    .iter()
    .map(|s| s.distance_squared(p))
    .fold(f32::INFINITY, f32::min)
    .sqrt()
}

#[cfg(test)]
#[path = "ransac_test.rs"]
mod ransac_test;

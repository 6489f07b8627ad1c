//! Centerline - polyline with cumulative planar arc length.
//!
//! Fitted curves and body reference lines are both centerlines. Registration
//! maps positions between them by matching arc-length fractions.

use glam::{Vec2, Vec3};

/// Position on a centerline: base vertex plus fraction toward the next one.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ArcAnchor {
  pub index: usize,
  /// Interpolation fraction in [0, 1].
  pub t: f32,
}

/// Ordered vertices with a parallel cumulative arc-length table.
///
/// Lengths are measured in the XY plane. `arc[0] == 0` and `arc` is
/// non-decreasing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Centerline {
  points: Vec<Vec3>,
  arc: Vec<f32>,
}

impl Centerline {
  pub fn new(points: Vec<Vec3>) -> Self {
    let mut arc = Vec::with_capacity(points.len());
    let mut total = 0.0f32;
    for (i, p) in points.iter().enumerate() {
      if i > 0 {
        total += p.truncate().distance(points[i - 1].truncate());
      }
      arc.push(total);
    }
    Self { points, arc }
  }

  #[inline]
  pub fn points(&self) -> &[Vec3] {
    &self.points
  }

  #[inline]
  pub fn arc_lengths(&self) -> &[f32] {
    &self.arc
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.points.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.points.is_empty()
  }

  pub fn total_length(&self) -> f32 {
    self.arc.last().copied().unwrap_or(0.0)
  }

  /// Nearest vertex to `p` with its Euclidean distance.
  ///
  /// Linear scan; the first vertex reaching the minimum wins.
  pub fn nearest(&self, p: Vec3) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (i, v) in self.points.iter().enumerate() {
      let dist = v.distance(p);
      if best.map_or(true, |(_, min)| dist < min) {
        best = Some((i, dist));
      }
    }
    best
  }

  /// Arc-length fraction of vertex `index` within the span `[lo, hi]`.
  ///
  /// Clamped to [0, 1]. Zero-length spans yield 0.
  pub fn fraction_in_span(&self, index: usize, lo: usize, hi: usize) -> f32 {
    let Some(last) = self.arc.len().checked_sub(1) else {
      return 0.0;
    };
    let (index, lo, hi) = (index.min(last), lo.min(last), hi.min(last));
    let span = self.arc[hi] - self.arc[lo];
    if span <= f32::EPSILON {
      return 0.0;
    }
    ((self.arc[index] - self.arc[lo]) / span).clamp(0.0, 1.0)
  }

  /// Anchor at an arc-length fraction of the whole line.
  ///
  /// Binary search over the cumulative lengths. Zero-length lines anchor to
  /// the first vertex. None for an empty line.
  pub fn locate(&self, fraction: f32) -> Option<ArcAnchor> {
    if self.points.is_empty() {
      return None;
    }
    let total = self.total_length();
    if self.points.len() < 2 || total <= f32::EPSILON {
      return Some(ArcAnchor::default());
    }

    let fraction = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
    let target = fraction * total;
    let upper = self.arc.partition_point(|&a| a <= target);
    let index = upper.saturating_sub(1).min(self.points.len() - 2);

    let segment = self.arc[index + 1] - self.arc[index];
    let t = if segment > f32::EPSILON {
      ((target - self.arc[index]) / segment).clamp(0.0, 1.0)
    } else {
      0.0
    };
    Some(ArcAnchor { index, t })
  }

  /// Interpolated position at an anchor.
  pub fn point_at(&self, anchor: ArcAnchor) -> Vec3 {
    let Some(last) = self.points.len().checked_sub(1) else {
      return Vec3::ZERO;
    };
    let a = self.points[anchor.index.min(last)];
    let b = self.points[(anchor.index + 1).min(last)];
    a.lerp(b, anchor.t)
  }

  /// Unit planar tangent at a vertex.
  ///
  /// Central difference inside, one-sided at both ends. Zero when the
  /// neighbors coincide or the line has fewer than two vertices.
  pub fn tangent_at(&self, index: usize) -> Vec2 {
    let n = self.points.len();
    if n < 2 {
      return Vec2::ZERO;
    }
    let index = index.min(n - 1);
    let (a, b) = if index == 0 {
      (0, 1)
    } else if index == n - 1 {
      (n - 2, n - 1)
    } else {
      (index - 1, index + 1)
    };
    (self.points[b] - self.points[a]).truncate().normalize_or_zero()
  }

  /// Tangent interpolated between the anchor's vertex and the next one.
  pub fn tangent_at_anchor(&self, anchor: ArcAnchor) -> Vec2 {
    let a = self.tangent_at(anchor.index);
    let b = self.tangent_at(anchor.index + 1);
    a.lerp(b, anchor.t).normalize_or_zero()
  }
}

#[cfg(test)]
#[path = "centerline_test.rs"]
mod centerline_test;

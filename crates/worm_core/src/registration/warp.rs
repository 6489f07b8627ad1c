//! Re-projection of encoded points onto a reference line.

use glam::{Vec2, Vec3};

use super::encoding::PointEncoding;
use super::reference::ReferenceLine;

/// Unit complex number rotating direction `from` onto `to`.
///
/// Identity when either direction is zero.
#[inline]
pub fn rotation_between(from: Vec2, to: Vec2) -> Vec2 {
  let (from, to) = (from.normalize_or_zero(), to.normalize_or_zero());
  if from == Vec2::ZERO || to == Vec2::ZERO {
    return Vec2::X;
  }
  Vec2::new(from.dot(to), from.perp_dot(to)).normalize_or(Vec2::X)
}

/// Position of an encoded point on `reference`.
///
/// The point lands at the reference anchor for its arc fraction. Its offset
/// is rotated by the angle between the curve and reference tangents, then
/// scaled by `local half-width / span max distance` (1 when that distance
/// is zero).
pub fn warp(encoding: &PointEncoding, reference: &ReferenceLine) -> Vec3 {
  let line = reference.line();
  let anchor = line.locate(encoding.arc_fraction).unwrap_or_default();
  let base = line.point_at(anchor);

  let rotation = rotation_between(encoding.curve_tangent, line.tangent_at_anchor(anchor));
  let planar = rotation.rotate(encoding.offset.truncate());

  let scale = if encoding.span_max_distance > f32::EPSILON {
    reference.half_width_at(anchor) / encoding.span_max_distance
  } else {
    1.0
  };
  base + planar.extend(encoding.offset.z) * scale
}

#[cfg(test)]
#[path = "warp_test.rs"]
mod warp_test;

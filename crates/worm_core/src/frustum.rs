//! Six-plane convex region for point picking and octree pruning.

use glam::{Vec3, Vec4};

use crate::octree::Aabb;

/// Plane indices.
pub const NEAR: usize = 0;
pub const FAR: usize = 1;
pub const LEFT: usize = 2;
pub const RIGHT: usize = 3;
pub const BOTTOM: usize = 4;
pub const TOP: usize = 5;

/// Convex region bounded by six planes.
///
/// Each plane is stored as `(nx, ny, nz, d)`; a point `p` is inside a plane
/// when `dot(n, p) + d <= 0`. Planes are ordered near, far, left, right,
/// bottom, top.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
  planes: [Vec4; 6],
}

impl Frustum {
  /// Build a frustum from an eye position, a forward axis, near/far
  /// distances along that axis, and the four corner ray directions
  /// (left-bottom, left-top, right-bottom, right-top).
  ///
  /// Side planes pass through the eye; their normals come from cross
  /// products of adjacent corner rays so that they point outward.
  #[allow(clippy::too_many_arguments)]
  pub fn new(
    eye: Vec3,
    forward: Vec3,
    near: f32,
    far: f32,
    left_bottom: Vec3,
    left_top: Vec3,
    right_bottom: Vec3,
    right_top: Vec3,
  ) -> Self {
    let plane = |normal: Vec3, through: Vec3| normal.extend(-normal.dot(through));

    let mut planes = [Vec4::ZERO; 6];
    planes[NEAR] = plane(-forward, eye + near * forward);
    planes[FAR] = plane(forward, eye + far * forward);
    planes[LEFT] = plane(left_top.cross(left_bottom), eye);
    planes[RIGHT] = plane(right_bottom.cross(right_top), eye);
    planes[BOTTOM] = plane(left_bottom.cross(right_bottom), eye);
    planes[TOP] = plane(right_top.cross(left_top), eye);
    Self { planes }
  }

  /// Frustum whose six planes are the faces of a box.
  ///
  /// Useful to select everything inside a volume (e.g. the whole index).
  pub fn from_aabb(aabb: &Aabb) -> Self {
    let (min, max) = (aabb.min, aabb.max);
    Self {
      planes: [
        Vec4::new(0.0, 0.0, -1.0, min.z),
        Vec4::new(0.0, 0.0, 1.0, -max.z),
        Vec4::new(-1.0, 0.0, 0.0, min.x),
        Vec4::new(1.0, 0.0, 0.0, -max.x),
        Vec4::new(0.0, -1.0, 0.0, min.y),
        Vec4::new(0.0, 1.0, 0.0, -max.y),
      ],
    }
  }

  /// Plane equations, near/far/left/right/bottom/top.
  pub fn planes(&self) -> &[Vec4; 6] {
    &self.planes
  }

  /// Signed distance-like value of `point` against plane `face`
  /// (not normalized by the plane normal's length).
  #[inline]
  pub fn signed_distance(&self, face: usize, point: Vec3) -> f32 {
    self.planes[face].truncate().dot(point) + self.planes[face].w
  }

  /// Check if a point lies inside all six planes (boundary inclusive).
  #[inline]
  pub fn contains(&self, point: Vec3) -> bool {
    (0..6).all(|face| self.signed_distance(face, point) <= 0.0)
  }

  /// Conservative box test.
  ///
  /// For each plane, tests the box corner with the smallest signed value;
  /// if even that corner is outside, the whole box is. May report boxes
  /// near frustum edges as intersecting when they are not, but never misses
  /// a box that does intersect.
  pub fn intersects_aabb(&self, min: Vec3, max: Vec3) -> bool {
    self.planes.iter().all(|plane| {
      let corner = Vec3::new(
        if plane.x > 0.0 { min.x } else { max.x },
        if plane.y > 0.0 { min.y } else { max.y },
        if plane.z > 0.0 { min.z } else { max.z },
      );
      plane.truncate().dot(corner) + plane.w <= 0.0
    })
  }
}

#[cfg(test)]
#[path = "frustum_test.rs"]
mod frustum_test;

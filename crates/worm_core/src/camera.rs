//! Camera pose and screen-space selection rectangles.
//!
//! A selection gesture is a drag between two normalized window positions.
//! Together with the camera that was active during the drag it defines the
//! picking [`Frustum`].

use glam::{Affine3A, Vec2, Vec3};

use crate::frustum::Frustum;

/// Dragged selection rectangle in normalized device coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionRect {
  /// Lower-left corner, each axis in [-1, 1].
  pub min: Vec2,
  /// Upper-right corner, each axis in [-1, 1].
  pub max: Vec2,
}

impl SelectionRect {
  /// Rectangle spanned by two normalized window positions (`[0,1]²`, y up).
  ///
  /// Returns None when the drag has zero width or height.
  pub fn from_drag(start: Vec2, end: Vec2) -> Option<Self> {
    let min = start.min(end) * 2.0 - Vec2::ONE;
    let max = start.max(end) * 2.0 - Vec2::ONE;
    if min.x == max.x || min.y == max.y {
      return None;
    }
    Some(Self { min, max })
  }

  /// Full viewport.
  pub fn full() -> Self {
    Self {
      min: Vec2::NEG_ONE,
      max: Vec2::ONE,
    }
  }

  /// Corners in left-bottom, left-top, right-bottom, right-top order.
  pub fn corners(&self) -> [Vec2; 4] {
    [
      self.min,
      Vec2::new(self.min.x, self.max.y),
      Vec2::new(self.max.x, self.min.y),
      self.max,
    ]
  }
}

/// Perspective camera with an orthonormal basis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
  pub position: Vec3,
  pub right: Vec3,
  pub up: Vec3,
  pub forward: Vec3,
  /// Vertical field of view in radians.
  pub fov_y: f32,
  /// Width over height.
  pub aspect: f32,
  pub near: f32,
  pub far: f32,
}

impl CameraPose {
  /// Build a pose from a view direction and an up hint.
  ///
  /// The basis is re-orthonormalized; `up` only has to be non-parallel to
  /// `forward`.
  pub fn new(
    position: Vec3,
    forward: Vec3,
    up: Vec3,
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
  ) -> Self {
    let forward = forward.normalize_or(Vec3::NEG_Z);
    let right = forward.cross(up).normalize_or(Vec3::X);
    let up = right.cross(forward);
    Self {
      position,
      right,
      up,
      forward,
      fov_y,
      aspect,
      near,
      far,
    }
  }

  /// Normalized world direction through an NDC position.
  pub fn ray_direction(&self, ndc: Vec2) -> Vec3 {
    let tan_half = (self.fov_y * 0.5).tan();
    (self.forward
      + self.right * (ndc.x * tan_half * self.aspect)
      + self.up * (ndc.y * tan_half))
      .normalize()
  }

  /// Same camera expressed in another space (e.g. a point cloud's model
  /// space given the inverse of its model matrix).
  ///
  /// Near and far distances follow the transform's scale along the view
  /// axis.
  pub fn transformed(&self, transform: &Affine3A) -> Self {
    let forward = transform.transform_vector3(self.forward);
    let scale = forward.length();
    let scale = if scale > f32::EPSILON { scale } else { 1.0 };
    Self {
      position: transform.transform_point3(self.position),
      right: transform.transform_vector3(self.right).normalize_or(self.right),
      up: transform.transform_vector3(self.up).normalize_or(self.up),
      forward: forward / scale,
      fov_y: self.fov_y,
      aspect: self.aspect,
      near: self.near * scale,
      far: self.far * scale,
    }
  }
}

impl Frustum {
  /// Picking frustum for a selection rectangle seen through `camera`.
  pub fn from_selection(camera: &CameraPose, rect: &SelectionRect) -> Self {
    let [lb, lt, rb, rt] = rect.corners().map(|ndc| camera.ray_direction(ndc));
    Frustum::new(
      camera.position,
      camera.forward,
      camera.near,
      camera.far,
      lb,
      lt,
      rb,
      rt,
    )
  }
}

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

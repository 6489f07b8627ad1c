//! Static neuron point cloud and its placement in body space.

use glam::{Affine3A, Vec3};

use crate::octree::Aabb;
use crate::types::Bounds2;

/// Neuron positions in their own (file) coordinate frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NeuronCloud {
  points: Vec<Vec3>,
  bounds: Option<Aabb>,
}

impl NeuronCloud {
  pub fn new(points: Vec<Vec3>) -> Self {
    let bounds = Aabb::from_points(&points, 0.0);
    Self { points, bounds }
  }

  #[inline]
  pub fn points(&self) -> &[Vec3] {
    &self.points
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.points.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.points.is_empty()
  }

  /// Tight bounds, None for an empty cloud.
  pub fn bounds(&self) -> Option<Aabb> {
    self.bounds
  }

  /// Placement mapping this cloud's XY extent onto `target`.
  ///
  /// The cloud is centered at the origin, scaled per axis so its XY range
  /// matches the target's, and moved to the target center. Z keeps its scale.
  /// Axes with zero extent on either side keep scale 1.
  pub fn placement_into(&self, target: Bounds2) -> Placement {
    let Some(bounds) = self.bounds else {
      return Placement::identity();
    };
    let source = bounds.size().truncate();
    let dest = target.size();
    let axis_scale = |d: f32, s: f32| if s > f32::EPSILON && d > f32::EPSILON { d / s } else { 1.0 };

    Placement {
      scale: Vec3::new(axis_scale(dest.x, source.x), axis_scale(dest.y, source.y), 1.0),
      offset0: -bounds.center(),
      offset1: target.center().extend(0.0),
    }
  }

  /// Model matrix fitting the cloud's XY extent into `[-1, 1]` around the
  /// origin, for viewing and picking.
  pub fn view_normalization(&self) -> Affine3A {
    let Some(bounds) = self.bounds else {
      return Affine3A::IDENTITY;
    };
    let extent = bounds.size().truncate().max_element();
    let scale = if extent > f32::EPSILON { 2.0 / extent } else { 1.0 };
    let center = bounds.center().truncate();
    Affine3A::from_scale(Vec3::splat(scale)) * Affine3A::from_translation((-center).extend(0.0))
  }
}

/// `p' = offset1 + scale * (p + offset0)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
  pub scale: Vec3,
  pub offset0: Vec3,
  pub offset1: Vec3,
}

impl Placement {
  pub fn identity() -> Self {
    Self {
      scale: Vec3::ONE,
      offset0: Vec3::ZERO,
      offset1: Vec3::ZERO,
    }
  }

  #[inline]
  pub fn apply(&self, p: Vec3) -> Vec3 {
    self.offset1 + self.scale * (p + self.offset0)
  }
}

#[cfg(test)]
#[path = "neuron_test.rs"]
mod neuron_test;

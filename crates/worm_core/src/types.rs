//! Core data types shared across the registration pipeline.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 3D coordinate used for neuron samples, curve samples and warped output.
pub type Point3 = glam::Vec3;

/// Anatomical segment of the worm body.
///
/// Components partition the body-contour vertex sequence into contiguous,
/// non-decreasing index ranges: Head, then VentralCord, then Tail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
  Head,
  VentralCord,
  Tail,
}

impl Component {
  /// All components in body order.
  pub const ALL: [Component; 3] = [Component::Head, Component::VentralCord, Component::Tail];

  /// Dense index (0..3) for per-component tables.
  #[inline]
  pub fn index(self) -> usize {
    match self {
      Component::Head => 0,
      Component::VentralCord => 1,
      Component::Tail => 2,
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      Component::Head => "head",
      Component::VentralCord => "ventral_cord",
      Component::Tail => "tail",
    }
  }
}

impl fmt::Display for Component {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Planar axis-aligned bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds2 {
  pub min: Vec2,
  pub max: Vec2,
}

impl Bounds2 {
  /// Create bounds with inverted extents (ready for encapsulation).
  pub fn empty() -> Self {
    Self {
      min: Vec2::splat(f32::INFINITY),
      max: Vec2::splat(f32::NEG_INFINITY),
    }
  }

  pub fn new(min: Vec2, max: Vec2) -> Self {
    Self { min, max }
  }

  /// Expand bounds to include a point.
  #[inline]
  pub fn encapsulate(&mut self, point: Vec2) {
    self.min = self.min.min(point);
    self.max = self.max.max(point);
  }

  /// Expand bounds to include another bounds.
  pub fn union(&mut self, other: &Bounds2) {
    if other.is_valid() {
      self.encapsulate(other.min);
      self.encapsulate(other.max);
    }
  }

  /// Check if bounds are valid (min <= max on both axes).
  pub fn is_valid(&self) -> bool {
    self.min.x <= self.max.x && self.min.y <= self.max.y
  }

  /// Size of the bounds, zero when empty.
  pub fn size(&self) -> Vec2 {
    if self.is_valid() {
      self.max - self.min
    } else {
      Vec2::ZERO
    }
  }

  pub fn center(&self) -> Vec2 {
    if self.is_valid() {
      (self.min + self.max) * 0.5
    } else {
      Vec2::ZERO
    }
  }
}

impl Default for Bounds2 {
  fn default() -> Self {
    Self::empty()
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

//! RegistrationConfig - tunables for fitting, selection and warping.

use serde::{Deserialize, Serialize};

use crate::types::Component;

/// Default number of samples taken along a fitted polynomial.
pub const DEFAULT_CURVE_SAMPLES: usize = 1000;

/// Component boundaries as fractions (0..1) of the body-contour vertex count.
///
/// Bounds are kept non-decreasing in body order:
/// `head.0 <= head.1 <= ventral_cord.0 <= ... <= tail.1`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentRatios {
  pub head: [f32; 2],
  pub ventral_cord: [f32; 2],
  pub tail: [f32; 2],
}

impl ComponentRatios {
  /// Ratio pair `[start, end)` of a component.
  pub fn get(&self, component: Component) -> [f32; 2] {
    match component {
      Component::Head => self.head,
      Component::VentralCord => self.ventral_cord,
      Component::Tail => self.tail,
    }
  }

  /// Set a component's ratios and re-validate all bounds.
  pub fn set(&mut self, component: Component, start: f32, end: f32) {
    let slot = match component {
      Component::Head => &mut self.head,
      Component::VentralCord => &mut self.ventral_cord,
      Component::Tail => &mut self.tail,
    };
    *slot = [start, end];
    self.validate();
  }

  /// Clamp bounds to [0, 1] and raise every bound to at least its
  /// predecessor in body order.
  pub fn validate(&mut self) {
    let mut floor = 0.0f32;
    for slot in [&mut self.head, &mut self.ventral_cord, &mut self.tail] {
      for bound in slot.iter_mut() {
        let value = if bound.is_finite() { *bound } else { floor };
        *bound = value.clamp(0.0, 1.0).max(floor);
        floor = *bound;
      }
    }
  }

  /// Copy with bounds validated.
  pub fn validated(mut self) -> Self {
    self.validate();
    self
  }
}

impl Default for ComponentRatios {
  fn default() -> Self {
    Self {
      head: [0.0, 0.2],
      ventral_cord: [0.2, 0.8],
      tail: [0.8, 1.0],
    }
  }
}

/// Parameters for the unconstrained (whole-cloud) RANSAC fit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RansacParams {
  /// Polynomial order.
  pub order: usize,
  /// Number of random trials.
  pub search_times: usize,
  /// Max distance from the sampled curve for a point to count as inlier.
  pub inlier_half_width: f32,
  /// Seed for the trial sampler; equal seeds give equal fits.
  pub seed: u64,
}

impl Default for RansacParams {
  fn default() -> Self {
    Self {
      order: 3,
      search_times: 100,
      inlier_half_width: 1.0,
      seed: 0,
    }
  }
}

/// Configuration for the registration engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
  /// Samples taken along the fitted polynomial over the cloud's X range.
  pub curve_samples: usize,

  /// Leaf occupancy that triggers an octree split (> 1).
  pub octree_max_dat_num: usize,

  /// Squared distance under which an inserted point counts as duplicate.
  pub duplicate_tolerance: f32,

  /// Lateral shift of the ventral cord line, as a fraction of the local
  /// contour half-width. Sign picks the side.
  pub ventral_offset_ratio: f32,

  /// Component boundaries along the body.
  pub components: ComponentRatios,

  /// Whole-cloud fit parameters.
  pub ransac: RansacParams,
}

impl Default for RegistrationConfig {
  fn default() -> Self {
    Self {
      curve_samples: DEFAULT_CURVE_SAMPLES,
      octree_max_dat_num: 8,
      duplicate_tolerance: f32::EPSILON,
      ventral_offset_ratio: 0.5,
      components: ComponentRatios::default(),
      ransac: RansacParams::default(),
    }
  }
}

impl RegistrationConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_curve_samples(mut self, samples: usize) -> Self {
    self.curve_samples = samples;
    self
  }

  pub fn with_octree_max_dat_num(mut self, max_dat_num: usize) -> Self {
    self.octree_max_dat_num = max_dat_num;
    self
  }

  pub fn with_ventral_offset_ratio(mut self, ratio: f32) -> Self {
    self.ventral_offset_ratio = ratio;
    self
  }

  pub fn with_components(mut self, components: ComponentRatios) -> Self {
    self.components = components.validated();
    self
  }

  pub fn with_ransac(mut self, ransac: RansacParams) -> Self {
    self.ransac = ransac;
    self
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

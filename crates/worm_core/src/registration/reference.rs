//! Per-component reference lines taken from one body frame.

use glam::Vec3;

use crate::body::{BodyFrame, ComponentRanges};
use crate::centerline::{ArcAnchor, Centerline};
use crate::types::Component;

/// Body centerline section with the local contour half-width per vertex.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReferenceLine {
  line: Centerline,
  half_widths: Vec<f32>,
}

impl ReferenceLine {
  pub fn new(points: Vec<Vec3>, half_widths: Vec<f32>) -> Self {
    debug_assert_eq!(points.len(), half_widths.len());
    Self {
      line: Centerline::new(points),
      half_widths,
    }
  }

  #[inline]
  pub fn line(&self) -> &Centerline {
    &self.line
  }

  /// Half-width interpolated at an anchor. Zero on an empty line.
  pub fn half_width_at(&self, anchor: ArcAnchor) -> f32 {
    let Some(last) = self.half_widths.len().checked_sub(1) else {
      return 0.0;
    };
    let a = self.half_widths[anchor.index.min(last)];
    let b = self.half_widths[(anchor.index + 1).min(last)];
    a + (b - a) * anchor.t
  }
}

/// Reference lines of every component for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceLines {
  lines: [ReferenceLine; 3],
}

impl ReferenceLines {
  /// Head and Tail follow the contour centerline over their index range.
  /// The ventral cord line is the centerline shifted by
  /// `ventral_offset_ratio` times the local half-width vector. An empty
  /// range falls back to the whole body.
  pub fn build(frame: &BodyFrame, ranges: &ComponentRanges, ventral_offset_ratio: f32) -> Self {
    let samples = frame.samples();
    let lines = Component::ALL.map(|component| {
      let mut range = ranges.get(component);
      if range.is_empty() || range.end > samples.len() {
        range = 0..samples.len();
      }
      let section = &samples[range];
      let shift = match component {
        Component::VentralCord => ventral_offset_ratio,
        Component::Head | Component::Tail => 0.0,
      };

      let points = section
        .iter()
        .map(|s| (s.center + s.half_width * shift).extend(0.0))
        .collect();
      let half_widths = section.iter().map(|s| s.half_width.length()).collect();
      ReferenceLine::new(points, half_widths)
    });
    Self { lines }
  }

  #[inline]
  pub fn get(&self, component: Component) -> &ReferenceLine {
    &self.lines[component.index()]
  }
}

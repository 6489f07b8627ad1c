//! Body-contour time series.
//!
//! Every time step is a list of left/right contour pairs along the worm.
//! Each pair reduces to a [`ContourSample`]: its midpoint on the body
//! centerline and the half-width vector pointing to the left contour.

use std::ops::Range;

use glam::Vec2;

use crate::config::ComponentRatios;
use crate::error::LoadError;
use crate::types::{Bounds2, Component};

/// One centerline vertex of the body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContourSample {
  pub center: Vec2,
  /// `0.5 * (left - right)`.
  pub half_width: Vec2,
}

impl ContourSample {
  pub fn from_pair(left: Vec2, right: Vec2) -> Self {
    Self {
      center: (left + right) * 0.5,
      half_width: (left - right) * 0.5,
    }
  }
}

/// Body geometry at one time step.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyFrame {
  samples: Vec<ContourSample>,
  bounds: Bounds2,
}

impl BodyFrame {
  /// Bounds are taken over the samples' contour points.
  pub fn new(samples: Vec<ContourSample>) -> Self {
    let mut bounds = Bounds2::empty();
    for s in &samples {
      bounds.encapsulate(s.center + s.half_width);
      bounds.encapsulate(s.center - s.half_width);
    }
    Self { samples, bounds }
  }

  /// Build from raw segments, pairing the first point of segment `2k` with
  /// the first point of segment `2k + 1`.
  ///
  /// Bounds cover every segment point. A trailing unpaired segment is
  /// ignored.
  pub fn from_segments(segments: &[[Vec2; 2]]) -> Self {
    let mut bounds = Bounds2::empty();
    for p in segments.iter().flatten() {
      bounds.encapsulate(*p);
    }
    let samples = segments
      .chunks_exact(2)
      .map(|pair| ContourSample::from_pair(pair[0][0], pair[1][0]))
      .collect();
    Self { samples, bounds }
  }

  #[inline]
  pub fn samples(&self) -> &[ContourSample] {
    &self.samples
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.samples.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.samples.is_empty()
  }

  pub fn bounds(&self) -> Bounds2 {
    self.bounds
  }
}

/// Validated sequence of body frames with equal vertex counts.
#[derive(Clone, Debug, PartialEq)]
pub struct BodySequence {
  frames: Vec<BodyFrame>,
  bounds: Bounds2,
}

impl BodySequence {
  /// Fails when there are no frames, the first frame has no samples, or
  /// frames disagree on their sample count.
  pub fn new(frames: Vec<BodyFrame>) -> Result<Self, LoadError> {
    let first = frames.first().ok_or(LoadError::EmptyContour)?;
    if first.is_empty() {
      return Err(LoadError::EmptyContour);
    }
    let expected = first.len();
    if let Some((time_step, frame)) = frames.iter().enumerate().find(|(_, f)| f.len() != expected) {
      return Err(LoadError::InconsistentSegmentCount {
        time_step,
        expected: expected * 2,
        found: frame.len() * 2,
      });
    }

    let mut bounds = Bounds2::empty();
    for frame in &frames {
      bounds.union(&frame.bounds());
    }
    Ok(Self { frames, bounds })
  }

  #[inline]
  pub fn frames(&self) -> &[BodyFrame] {
    &self.frames
  }

  pub fn frame(&self, time_step: usize) -> Option<&BodyFrame> {
    self.frames.get(time_step)
  }

  #[inline]
  pub fn time_steps(&self) -> usize {
    self.frames.len()
  }

  /// Centerline vertices per frame.
  #[inline]
  pub fn vertex_count(&self) -> usize {
    self.frames.first().map_or(0, BodyFrame::len)
  }

  /// XY extent over every frame.
  pub fn bounds(&self) -> Bounds2 {
    self.bounds
  }
}

/// Half-open vertex index range of each component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentRanges {
  ranges: [Range<usize>; 3],
}

impl ComponentRanges {
  /// Round each ratio bound to the nearest vertex index.
  ///
  /// Ratios are validated first, so the ranges come out non-decreasing in
  /// body order.
  pub fn from_ratios(ratios: &ComponentRatios, vertex_count: usize) -> Self {
    let ratios = ratios.validated();
    let to_index = |ratio: f32| ((ratio * vertex_count as f32).round() as usize).min(vertex_count);
    let ranges = Component::ALL.map(|component| {
      let [start, end] = ratios.get(component);
      let start = to_index(start);
      start..to_index(end).max(start)
    });
    Self { ranges }
  }

  pub fn get(&self, component: Component) -> Range<usize> {
    self.ranges[component.index()].clone()
  }
}

#[cfg(test)]
#[path = "body_test.rs"]
mod body_test;

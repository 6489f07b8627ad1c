//! RegistrationEngine - selection, fitting and per-time-step warping.
//!
//! # Pipeline
//!
//! 1. **Select**: frustum picks claim neuron indices for a component
//! 2. **Fit**: a polynomial centerline through the claimed points (or a
//!    RANSAC search over the whole cloud)
//! 3. **Encode**: every neuron becomes (component, arc fraction, offset,
//!    curve tangent) relative to the fitted curve
//! 4. **Warp**: for every time step the encodings are re-projected onto that
//!    step's component reference lines
//!
//! Registration output depends only on the engine state, so committing twice
//! without changes yields bit-identical frames.
//!
//! # Module Structure
//!
//! - [`reference`]: per-component reference lines of a body frame
//! - [`encoding`]: point encoding against the fitted curve
//! - [`warp`]: re-projection onto a reference line

pub mod encoding;
pub mod reference;
pub mod warp;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

pub use encoding::{encode, CurveSpan, PointEncoding};
pub use reference::{ReferenceLine, ReferenceLines};
pub use warp::{rotation_between, warp};

use crate::body::{BodySequence, ComponentRanges};
use crate::centerline::Centerline;
use crate::config::{RansacParams, RegistrationConfig};
use crate::curve::{CurveFitter, PolyCurve};
use crate::frustum::Frustum;
use crate::metrics::RegistrationMetrics;
use crate::neuron::NeuronCloud;
use crate::octree::{Aabb, PointOctree};
use crate::selection::InlierSelection;
use crate::types::Component;

/// Warped neuron positions for every time step.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Registration {
  frames: Vec<Vec<Vec3>>,
  encodings: Vec<PointEncoding>,
}

impl Registration {
  /// One position per neuron per time step.
  pub fn frames(&self) -> &[Vec<Vec3>] {
    &self.frames
  }

  pub fn frame(&self, time_step: usize) -> Option<&[Vec3]> {
    self.frames.get(time_step).map(Vec::as_slice)
  }

  pub fn encodings(&self) -> &[PointEncoding] {
    &self.encodings
  }

  pub fn time_steps(&self) -> usize {
    self.frames.len()
  }

  pub fn point_count(&self) -> usize {
    self.frames.first().map_or(0, Vec::len)
  }

  pub fn is_empty(&self) -> bool {
    self.frames.is_empty()
  }

  pub fn into_frames(self) -> Vec<Vec<Vec3>> {
    self.frames
  }
}

/// Owns the datasets, the selection index and the fitted curve.
pub struct RegistrationEngine {
  config: RegistrationConfig,
  body: BodySequence,
  neurons: NeuronCloud,
  octree: PointOctree<u32>,
  selection: InlierSelection,
  curve: Option<PolyCurve>,
  curve_samples: Vec<Vec3>,
  encodings: Vec<PointEncoding>,
  metrics: RegistrationMetrics,
}

impl RegistrationEngine {
  /// Build the engine and index the neuron cloud for selection.
  ///
  /// Points within `duplicate_tolerance` of an earlier point are not
  /// indexed and so cannot be picked, but are still registered.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "registration::new"))]
  pub fn new(body: BodySequence, neurons: NeuronCloud, mut config: RegistrationConfig) -> Self {
    config.components.validate();

    let bounds = neurons
      .bounds()
      .map(|b| {
        let padding = b.size().max_element() * 1e-3 + 1e-6;
        Aabb::new(b.min - Vec3::splat(padding), b.max + Vec3::splat(padding))
      })
      .unwrap_or_else(|| Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE));

    let mut octree = PointOctree::new(bounds, config.octree_max_dat_num);
    let mut duplicates = 0usize;
    for (i, p) in neurons.points().iter().enumerate() {
      if !octree.insert_with_tolerance(*p, i as u32, config.duplicate_tolerance) {
        duplicates += 1;
      }
    }

    #[cfg(feature = "tracing")]
    {
      if duplicates > 0 {
        tracing::warn!(duplicates, "duplicate neuron positions excluded from selection");
      }
      tracing::debug!(
        neurons = neurons.len(),
        time_steps = body.time_steps(),
        vertices = body.vertex_count(),
        "registration engine ready"
      );
    }
    #[cfg(not(feature = "tracing"))]
    let _ = duplicates;

    Self {
      selection: InlierSelection::new(neurons.len()),
      config,
      body,
      neurons,
      octree,
      curve: None,
      curve_samples: Vec::new(),
      encodings: Vec::new(),
      metrics: RegistrationMetrics::new(),
    }
  }

  pub fn config(&self) -> &RegistrationConfig {
    &self.config
  }

  pub fn body(&self) -> &BodySequence {
    &self.body
  }

  pub fn neurons(&self) -> &NeuronCloud {
    &self.neurons
  }

  pub fn octree(&self) -> &PointOctree<u32> {
    &self.octree
  }

  pub fn selection(&self) -> &InlierSelection {
    &self.selection
  }

  pub fn curve(&self) -> Option<&PolyCurve> {
    self.curve.as_ref()
  }

  /// Encodings of the last registration; empty after a fit or clear.
  pub fn encodings(&self) -> &[PointEncoding] {
    &self.encodings
  }

  pub fn metrics(&self) -> &RegistrationMetrics {
    &self.metrics
  }

  /// Current component index ranges on the body contour.
  pub fn component_ranges(&self) -> ComponentRanges {
    ComponentRanges::from_ratios(&self.config.components, self.body.vertex_count())
  }

  /// Update one component's ratio bounds; all bounds are re-validated to
  /// stay monotone.
  pub fn set_component_ratio(&mut self, component: Component, start: f32, end: f32) {
    self.config.components.set(component, start, end);
  }

  /// Claim every unclaimed neuron inside `frustum` for `component`.
  ///
  /// Returns the newly claimed indices, ascending. Points owned by another
  /// component are left alone.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "registration::select"))]
  pub fn select(&mut self, frustum: &Frustum, component: Component) -> Vec<u32> {
    let mut claimed = Vec::new();
    for bucket in self.octree.query_frustum(frustum) {
      for (pos, index) in bucket.iter() {
        if frustum.contains(*pos) && self.selection.claim(*index, component) {
          claimed.push(*index);
        }
      }
    }
    claimed.sort_unstable();

    #[cfg(feature = "tracing")]
    tracing::debug!(%component, claimed = claimed.len(), "selection");
    self.metrics.record_selection(claimed.len());
    claimed
  }

  /// Release every claimed inlier.
  pub fn unselect_inliers(&mut self) {
    self.selection.clear();
  }

  /// Drop the fitted curve and any registration derived from it.
  pub fn clear_curve(&mut self) {
    self.curve = None;
    self.curve_samples.clear();
    self.encodings.clear();
  }

  /// Least-squares fit through the union of all inlier sets.
  ///
  /// Keeps the previous curve and returns false when the fit is degenerate.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "registration::fit_curve"))]
  pub fn fit_curve(&mut self, order: usize) -> bool {
    #[cfg(feature = "metrics")]
    let start = web_time::Instant::now();

    let indices = self.selection.union();
    let fitter = CurveFitter::new(self.neurons.points(), self.config.curve_samples);
    let fitted = fitter.fit_indices(order, &indices);
    let accepted = fitted.is_some();
    if let Some(curve) = fitted {
      self.accept_curve(curve);
    } else {
      #[cfg(feature = "tracing")]
      tracing::warn!(order, inliers = indices.len(), "degenerate fit, keeping previous curve");
    }

    #[cfg(feature = "metrics")]
    self.metrics.record_fit(start.elapsed().as_micros() as u64, accepted);
    accepted
  }

  /// RANSAC fit over the whole cloud, seeded from `params.seed`.
  ///
  /// Keeps the previous curve and returns false when every trial was
  /// singular or the cloud is too small.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "registration::fit_curve_ransac"))]
  pub fn fit_curve_ransac(&mut self, params: &RansacParams) -> bool {
    #[cfg(feature = "metrics")]
    let start = web_time::Instant::now();

    let mut rng = StdRng::seed_from_u64(params.seed);
    let fitter = CurveFitter::new(self.neurons.points(), self.config.curve_samples);
    let fit = fitter.fit_ransac(params.order, params.search_times, params.inlier_half_width, &mut rng);
    let accepted = fit.is_some();
    match fit {
      Some(fit) => {
        #[cfg(feature = "tracing")]
        tracing::debug!(
          inliers = fit.inlier_count,
          trials_skipped = fit.trials_skipped,
          "ransac fit"
        );
        self.metrics.record_ransac(fit.inlier_count, fit.trials_skipped);
        self.accept_curve(fit.curve);
      }
      None => {
        #[cfg(feature = "tracing")]
        tracing::warn!(order = params.order, "ransac found no fit, keeping previous curve");
      }
    }

    #[cfg(feature = "metrics")]
    self.metrics.record_fit(start.elapsed().as_micros() as u64, accepted);
    accepted
  }

  fn accept_curve(&mut self, curve: PolyCurve) {
    let fitter = CurveFitter::new(self.neurons.points(), self.config.curve_samples);
    self.curve_samples = fitter.sample(&curve);
    self.curve = Some(curve);
    self.encodings.clear();
  }

  /// Encode every neuron against the curve and warp it onto each time step.
  ///
  /// Empty when there is no curve, no neuron or no body vertex.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "registration::register"))]
  pub fn register(&mut self) -> Registration {
    if self.curve_samples.is_empty() || self.neurons.is_empty() || self.body.vertex_count() == 0 {
      self.encodings.clear();
      return Registration::default();
    }

    #[cfg(feature = "metrics")]
    let start = web_time::Instant::now();

    let ranges = self.component_ranges();
    let ventral = self.config.ventral_offset_ratio;
    let lines: Vec<ReferenceLines> = self
      .body
      .frames()
      .iter()
      .map(|frame| ReferenceLines::build(frame, &ranges, ventral))
      .collect();

    let curve = Centerline::new(self.curve_samples.clone());
    let encodings = encode(self.neurons.points(), &curve, &self.selection, &lines[0]);

    let frames = lines
      .iter()
      .map(|frame_lines| {
        encodings
          .iter()
          .map(|e| warp(e, frame_lines.get(e.component)))
          .collect()
      })
      .collect();

    #[cfg(feature = "metrics")]
    self.metrics.record_register_timing(start.elapsed().as_micros() as u64);

    self.encodings = encodings.clone();
    Registration { frames, encodings }
  }

  /// Un-registered positions: the cloud placed into the body's XY bounds,
  /// repeated for every time step.
  pub fn preview_positions(&self) -> Vec<Vec<Vec3>> {
    let placement = self.neurons.placement_into(self.body.bounds());
    let placed: Vec<Vec3> = self.neurons.points().iter().map(|p| placement.apply(*p)).collect();
    vec![placed; self.body.time_steps()]
  }

  /// Fitted curve samples in body space, for display.
  pub fn curve_vertices(&self) -> Vec<Vec3> {
    let placement = self.neurons.placement_into(self.body.bounds());
    self.curve_samples.iter().map(|p| placement.apply(*p)).collect()
  }
}

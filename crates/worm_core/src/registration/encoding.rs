//! Arc-length + offset encoding of neuron points against the fitted curve.

use glam::{Vec2, Vec3};
use serde::Serialize;

use super::reference::ReferenceLines;
use crate::centerline::{ArcAnchor, Centerline};
use crate::selection::InlierSelection;
use crate::types::Component;

/// How one neuron point sits relative to the fitted curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PointEncoding {
  /// Component whose reference line carries the point.
  pub component: Component,
  /// True when no component claimed the point.
  pub outlier: bool,
  /// Nearest curve sample.
  pub curve_index: usize,
  /// Euclidean distance to that sample.
  pub curve_distance: f32,
  /// Arc-length fraction of `curve_index` within the component's span.
  pub arc_fraction: f32,
  /// Point minus its curve sample.
  pub offset: Vec3,
  /// Unit curve tangent at `curve_index`.
  pub curve_tangent: Vec2,
  /// Largest inlier distance of the span; divides the reference half-width
  /// to scale offsets.
  pub span_max_distance: f32,
  /// Anchor on the first time step's reference line.
  #[serde(skip)]
  pub reference: ArcAnchor,
}

/// Curve index range covered by a set of points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveSpan {
  pub lo: usize,
  pub hi: usize,
  pub max_distance: f32,
}

impl CurveSpan {
  fn over(nearest: &[(usize, f32)], indices: impl IntoIterator<Item = usize>) -> Option<Self> {
    indices
      .into_iter()
      .filter_map(|i| nearest.get(i))
      .fold(None, |span: Option<CurveSpan>, &(index, dist)| {
        Some(match span {
          None => CurveSpan {
            lo: index,
            hi: index,
            max_distance: dist,
          },
          Some(s) => CurveSpan {
            lo: s.lo.min(index),
            hi: s.hi.max(index),
            max_distance: s.max_distance.max(dist),
          },
        })
      })
  }
}

/// Encode every point against `curve`.
///
/// Claimed points use their component's inlier span. Unclaimed points are
/// anchored to the ventral cord: its span when it has inliers, otherwise the
/// whole curve. Returns an empty table when the curve has no samples.
pub fn encode(
  points: &[Vec3],
  curve: &Centerline,
  selection: &InlierSelection,
  first_frame: &ReferenceLines,
) -> Vec<PointEncoding> {
  if curve.is_empty() {
    return Vec::new();
  }

  let nearest: Vec<(usize, f32)> = points
    .iter()
    .filter_map(|p| curve.nearest(*p))
    .collect();

  let spans = Component::ALL.map(|component| {
    CurveSpan::over(
      &nearest,
      selection.inliers(component).iter().map(|&i| i as usize),
    )
  });
  let outlier_span = spans[Component::VentralCord.index()].unwrap_or_else(|| {
    CurveSpan {
      lo: 0,
      hi: curve.len() - 1,
      max_distance: nearest.iter().map(|&(_, d)| d).fold(0.0, f32::max),
    }
  });

  points
    .iter()
    .zip(&nearest)
    .enumerate()
    .map(|(i, (p, &(curve_index, curve_distance)))| {
      let owner = selection.component_of(i as u32);
      let component = owner.unwrap_or(Component::VentralCord);
      let span = owner
        .and_then(|c| spans[c.index()])
        .unwrap_or(outlier_span);

      let arc_fraction = curve.fraction_in_span(curve_index, span.lo, span.hi);
      let reference = first_frame
        .get(component)
        .line()
        .locate(arc_fraction)
        .unwrap_or_default();

      PointEncoding {
        component,
        outlier: owner.is_none(),
        curve_index,
        curve_distance,
        arc_fraction,
        offset: *p - curve.points()[curve_index],
        curve_tangent: curve.tangent_at(curve_index),
        span_max_distance: span.max_distance,
        reference,
      }
    })
    .collect()
}

#[cfg(test)]
#[path = "encoding_test.rs"]
mod encoding_test;

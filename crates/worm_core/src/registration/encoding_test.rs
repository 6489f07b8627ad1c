use glam::{Vec2, Vec3};

use super::*;
use crate::body::{BodyFrame, ComponentRanges, ContourSample};
use crate::config::ComponentRatios;

/// Horizontal curve samples at x = 0, 1, ..., 10.
fn horizontal_curve() -> Centerline {
  Centerline::new((0..=10).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect())
}

fn first_frame() -> ReferenceLines {
  let frame = BodyFrame::new(
    (0..10)
      .map(|i| ContourSample {
        center: Vec2::new(i as f32, 0.0),
        half_width: Vec2::new(0.0, 1.0),
      })
      .collect(),
  );
  let ranges = ComponentRanges::from_ratios(&ComponentRatios::default(), 10);
  ReferenceLines::build(&frame, &ranges, 0.0)
}

#[test]
fn test_claimed_points_use_component_span() {
  let points = [
    Vec3::new(0.0, 0.5, 0.0),
    Vec3::new(2.0, -1.0, 0.0),
    Vec3::new(1.0, 0.2, 0.5),
  ];
  let mut selection = InlierSelection::new(points.len());
  selection.claim(0, Component::Head);
  selection.claim(1, Component::Head);
  selection.claim(2, Component::Head);

  let encodings = encode(&points, &horizontal_curve(), &selection, &first_frame());
  assert_eq!(encodings.len(), 3);

  // Head span covers curve indices 0..=2, max distance 1.
  let middle = &encodings[2];
  assert_eq!(middle.component, Component::Head);
  assert!(!middle.outlier);
  assert_eq!(middle.curve_index, 1);
  assert!((middle.arc_fraction - 0.5).abs() < 1e-6);
  assert_eq!(middle.offset, Vec3::new(0.0, 0.2, 0.5));
  assert!((middle.curve_distance - 0.29f32.sqrt()).abs() < 1e-6);
  assert_eq!(middle.span_max_distance, 1.0);
  assert_eq!(middle.curve_tangent, Vec2::X);

  assert_eq!(encodings[0].arc_fraction, 0.0);
  assert_eq!(encodings[1].arc_fraction, 1.0);
}

#[test]
fn test_outliers_use_whole_curve_without_ventral_inliers() {
  let points = [Vec3::new(5.0, 2.0, 0.0), Vec3::new(10.0, -4.0, 0.0)];
  let selection = InlierSelection::new(points.len());

  let encodings = encode(&points, &horizontal_curve(), &selection, &first_frame());
  let first = &encodings[0];
  assert!(first.outlier);
  assert_eq!(first.component, Component::VentralCord);
  assert!((first.arc_fraction - 0.5).abs() < 1e-6);
  assert_eq!(first.span_max_distance, 4.0);
  assert_eq!(encodings[1].arc_fraction, 1.0);
}

#[test]
fn test_outliers_follow_ventral_span() {
  let points = [
    Vec3::new(4.0, 0.1, 0.0),
    Vec3::new(8.0, 0.3, 0.0),
    Vec3::new(6.0, 3.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
  ];
  let mut selection = InlierSelection::new(points.len());
  selection.claim(0, Component::VentralCord);
  selection.claim(1, Component::VentralCord);

  let encodings = encode(&points, &horizontal_curve(), &selection, &first_frame());
  let inside = &encodings[2];
  assert!(inside.outlier);
  assert!((inside.arc_fraction - 0.5).abs() < 1e-6);
  assert!((inside.span_max_distance - 0.3).abs() < 1e-6);
  // Before the span clamps to its start.
  assert_eq!(encodings[3].arc_fraction, 0.0);
}

#[test]
fn test_reference_anchor_on_first_frame() {
  let points = [Vec3::new(5.0, 0.0, 0.0)];
  let selection = InlierSelection::new(1);
  let lines = first_frame();
  let encodings = encode(&points, &horizontal_curve(), &selection, &lines);

  let anchor = encodings[0].reference;
  let on_line = lines.get(Component::VentralCord).line().point_at(anchor);
  // Whole-curve fraction 0.5 on the ventral line spanning x = 2..7.
  assert!((on_line - Vec3::new(4.5, 0.0, 0.0)).length() < 1e-5, "{:?}", on_line);
}

#[test]
fn test_empty_curve_yields_no_encodings() {
  let points = [Vec3::ZERO];
  let selection = InlierSelection::new(1);
  let encodings = encode(&points, &Centerline::default(), &selection, &first_frame());
  assert!(encodings.is_empty());
}

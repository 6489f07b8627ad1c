use glam::{Vec2, Vec3};

use super::*;

/// L-shaped line: (0,0) -> (2,0) -> (2,2), total length 4.
fn elbow() -> Centerline {
  Centerline::new(vec![
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(2.0, 0.0, 0.0),
    Vec3::new(2.0, 2.0, 0.0),
  ])
}

#[test]
fn test_arc_lengths_accumulate() {
  let line = elbow();
  assert_eq!(line.arc_lengths(), &[0.0, 1.0, 2.0, 4.0]);
  assert_eq!(line.total_length(), 4.0);
}

#[test]
fn test_arc_ignores_depth() {
  let line = Centerline::new(vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(3.0, 4.0, 10.0)]);
  assert_eq!(line.total_length(), 5.0);
}

#[test]
fn test_nearest_first_minimum_wins() {
  let line = elbow();
  let (index, dist) = line.nearest(Vec3::new(0.5, 1.0, 2.0)).unwrap();
  // (0,0) and (1,0) are equidistant; the earlier one wins.
  assert_eq!(index, 0);
  assert!((dist - 5.25f32.sqrt()).abs() < 1e-6);
  assert!(Centerline::default().nearest(Vec3::ZERO).is_none());
}

#[test]
fn test_nearest_counts_depth() {
  let line = Centerline::new(vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 3.0, 0.0)]);
  // Straight above the first vertex, but closer to the second in 3D.
  let (index, dist) = line.nearest(Vec3::new(0.0, 0.0, 5.0)).unwrap();
  assert_eq!(index, 0);
  assert_eq!(dist, 5.0);
  let (index, dist) = line.nearest(Vec3::new(0.0, 2.0, 0.0)).unwrap();
  assert_eq!(index, 1);
  assert_eq!(dist, 1.0);
}

#[test]
fn test_fraction_in_span() {
  let line = elbow();
  assert_eq!(line.fraction_in_span(1, 0, 2), 0.5);
  assert_eq!(line.fraction_in_span(3, 1, 3), 1.0);
  // Outside the span clamps.
  assert_eq!(line.fraction_in_span(0, 1, 3), 0.0);
  // Degenerate span.
  assert_eq!(line.fraction_in_span(2, 2, 2), 0.0);
  // Indices past the end clamp to the last vertex.
  assert_eq!(line.fraction_in_span(99, 0, 99), 1.0);
}

#[test]
fn test_locate_interior_and_ends() {
  let line = elbow();

  let start = line.locate(0.0).unwrap();
  assert_eq!(start, ArcAnchor { index: 0, t: 0.0 });

  let mid = line.locate(0.75).unwrap();
  assert_eq!(mid.index, 2);
  assert!((mid.t - 0.5).abs() < 1e-6);
  assert_eq!(line.point_at(mid), Vec3::new(2.0, 1.0, 0.0));

  let end = line.locate(1.0).unwrap();
  assert_eq!(end.index, 2);
  assert_eq!(end.t, 1.0);
  assert_eq!(line.point_at(end), Vec3::new(2.0, 2.0, 0.0));
}

#[test]
fn test_locate_clamps_fraction() {
  let line = elbow();
  assert_eq!(line.locate(-3.0), line.locate(0.0));
  assert_eq!(line.locate(7.0), line.locate(1.0));
  assert_eq!(line.locate(f32::NAN), line.locate(0.0));
}

#[test]
fn test_zero_length_line_anchors_to_first_vertex() {
  let line = Centerline::new(vec![Vec3::new(1.0, 1.0, 0.0); 3]);
  let anchor = line.locate(0.6).unwrap();
  assert_eq!(anchor, ArcAnchor::default());
  assert_eq!(line.point_at(anchor), Vec3::new(1.0, 1.0, 0.0));

  let single = Centerline::new(vec![Vec3::X]);
  assert_eq!(single.point_at(single.locate(0.5).unwrap()), Vec3::X);
  assert!(Centerline::default().locate(0.5).is_none());
}

#[test]
fn test_tangents() {
  let line = elbow();
  assert_eq!(line.tangent_at(0), Vec2::X);
  assert_eq!(line.tangent_at(1), Vec2::X);
  assert_eq!(line.tangent_at(3), Vec2::Y);

  // Central difference at the corner: (2,2) - (1,0).
  let corner = line.tangent_at(2);
  assert!((corner - Vec2::new(1.0, 2.0).normalize()).length() < 1e-6);

  assert_eq!(Centerline::new(vec![Vec3::ZERO]).tangent_at(0), Vec2::ZERO);
}

#[test]
fn test_tangent_at_anchor_interpolates() {
  let line = elbow();
  let tangent = line.tangent_at_anchor(ArcAnchor { index: 2, t: 1.0 });
  assert!((tangent - Vec2::Y).length() < 1e-6);
  let tangent = line.tangent_at_anchor(ArcAnchor { index: 0, t: 0.5 });
  assert!((tangent - Vec2::X).length() < 1e-6);
}

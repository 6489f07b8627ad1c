use glam::Vec2;

use super::*;

fn frame_of(count: usize) -> BodyFrame {
  BodyFrame::new(
    (0..count)
      .map(|i| ContourSample {
        center: Vec2::new(i as f32, 0.0),
        half_width: Vec2::new(0.0, 1.0),
      })
      .collect(),
  )
}

#[test]
fn test_sample_from_pair() {
  let sample = ContourSample::from_pair(Vec2::new(1.0, 3.0), Vec2::new(1.0, -1.0));
  assert_eq!(sample.center, Vec2::new(1.0, 1.0));
  assert_eq!(sample.half_width, Vec2::new(0.0, 2.0));
}

#[test]
fn test_frame_from_segments_pairs_first_points() {
  let segments = [
    [Vec2::new(0.0, 1.0), Vec2::new(5.0, 5.0)],
    [Vec2::new(0.0, -1.0), Vec2::new(-5.0, 0.0)],
    [Vec2::new(2.0, 2.0), Vec2::new(0.0, 0.0)],
    [Vec2::new(2.0, 0.0), Vec2::new(0.0, 0.0)],
  ];
  let frame = BodyFrame::from_segments(&segments);
  assert_eq!(frame.len(), 2);
  assert_eq!(frame.samples()[0].center, Vec2::new(0.0, 0.0));
  assert_eq!(frame.samples()[1].center, Vec2::new(2.0, 1.0));
  assert_eq!(frame.samples()[1].half_width, Vec2::new(0.0, 1.0));
  // Bounds include the second point of each segment too.
  assert_eq!(frame.bounds(), Bounds2::new(Vec2::new(-5.0, -1.0), Vec2::new(5.0, 5.0)));
}

#[test]
fn test_sequence_rejects_empty() {
  assert!(matches!(BodySequence::new(vec![]), Err(LoadError::EmptyContour)));
  assert!(matches!(
    BodySequence::new(vec![frame_of(0)]),
    Err(LoadError::EmptyContour)
  ));
}

#[test]
fn test_sequence_rejects_mismatched_frames() {
  let result = BodySequence::new(vec![frame_of(3), frame_of(3), frame_of(2)]);
  match result {
    Err(LoadError::InconsistentSegmentCount {
      time_step,
      expected,
      found,
    }) => {
      assert_eq!(time_step, 2);
      assert_eq!(expected, 6);
      assert_eq!(found, 4);
    }
    other => panic!("unexpected {:?}", other),
  }
}

#[test]
fn test_sequence_bounds_cover_all_frames() {
  let moved = BodyFrame::new(vec![ContourSample {
    center: Vec2::new(10.0, 10.0),
    half_width: Vec2::new(1.0, 0.0),
  }]);
  let still = BodyFrame::new(vec![ContourSample {
    center: Vec2::ZERO,
    half_width: Vec2::new(0.0, 1.0),
  }]);
  let body = BodySequence::new(vec![still, moved]).unwrap();
  assert_eq!(body.time_steps(), 2);
  assert_eq!(body.vertex_count(), 1);
  assert_eq!(body.bounds(), Bounds2::new(Vec2::new(0.0, -1.0), Vec2::new(11.0, 10.0)));
}

#[test]
fn test_component_ranges_default_ratios() {
  let ranges = ComponentRanges::from_ratios(&ComponentRatios::default(), 10);
  assert_eq!(ranges.get(Component::Head), 0..2);
  assert_eq!(ranges.get(Component::VentralCord), 2..8);
  assert_eq!(ranges.get(Component::Tail), 8..10);
}

#[test]
fn test_component_ranges_stay_monotone() {
  let ratios = ComponentRatios {
    head: [0.0, 0.9],
    ventral_cord: [0.3, 0.5],
    tail: [0.2, 2.0],
  };
  let ranges = ComponentRanges::from_ratios(&ratios, 20);
  let head = ranges.get(Component::Head);
  let vc = ranges.get(Component::VentralCord);
  let tail = ranges.get(Component::Tail);
  assert!(head.end <= vc.start && vc.end <= tail.start);
  assert_eq!(tail.end, 20);
  assert!(vc.is_empty());
}

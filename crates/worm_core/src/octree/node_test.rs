use super::*;

// =========================================================================
// Octant encoding
// =========================================================================

/// Every octant bit maps to exactly one axis: X = bit 2, Y = bit 1, Z = bit 0.
#[test]
fn test_octant_bit_layout() {
  let mid = Vec3::ZERO;
  assert_eq!(octant_of(mid, Vec3::new(-1.0, -1.0, -1.0)), 0b000);
  assert_eq!(octant_of(mid, Vec3::new(1.0, -1.0, -1.0)), 0b100);
  assert_eq!(octant_of(mid, Vec3::new(-1.0, 1.0, -1.0)), 0b010);
  assert_eq!(octant_of(mid, Vec3::new(-1.0, -1.0, 1.0)), 0b001);
  assert_eq!(octant_of(mid, Vec3::new(1.0, 1.0, 1.0)), 0b111);
}

/// A coordinate equal to the midpoint belongs to the upper half.
#[test]
fn test_octant_midpoint_goes_high() {
  assert_eq!(octant_of(Vec3::ZERO, Vec3::ZERO), 0b111);
  assert_eq!(octant_of(Vec3::ZERO, Vec3::new(0.0, -0.5, -0.5)), 0b100);
}

/// The octant a point maps to always contains that point.
#[test]
fn test_octant_extent_contains_point() {
  let aabb = Aabb::new(Vec3::splat(-2.0), Vec3::splat(2.0));
  let points = [
    Vec3::new(-1.5, 0.3, 1.9),
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(1.9, -1.9, -0.1),
    Vec3::new(-0.1, 1.0, 0.0),
  ];
  for p in points {
    let octant = octant_of(aabb.center(), p);
    assert!(
      aabb.octant(octant).contains_point(p),
      "{:?} not inside octant {:03b}",
      p,
      octant
    );
  }
}

#[test]
fn test_new_node_is_empty_leaf() {
  let node: OctreeNode<u32> = OctreeNode::new(Aabb::new(Vec3::ZERO, Vec3::ONE), 3);
  assert!(node.is_leaf());
  assert_eq!(node.child_count(), 0);
  assert!(node.entries.is_empty());
  assert_eq!(node.depth, 3);
}

#[test]
fn test_node_with_child_is_internal() {
  let mut node: OctreeNode<u32> = OctreeNode::new(Aabb::new(Vec3::ZERO, Vec3::ONE), 0);
  node.children[5] = Some(NodeId::from_index(1));
  assert!(!node.is_leaf());
  assert_eq!(node.child_count(), 1);
}

#[test]
fn test_node_id_roundtrip() {
  assert_eq!(NodeId::ROOT.index(), 0);
  assert_eq!(NodeId::from_index(42).index(), 42);
}

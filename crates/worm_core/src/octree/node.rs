//! OctreeNode - arena slot holding either a leaf bucket or child links.

use glam::Vec3;
use smallvec::SmallVec;

use super::Aabb;

/// Initial leaf bucket capacity before spilling to the heap.
pub const DEFAULT_DAT_CAP: usize = 2;

/// Leaf bucket of `(position, payload)` entries.
///
/// Grows by doubling; only replaced wholesale when its node is split.
pub type Bucket<T> = SmallVec<[(Vec3, T); DEFAULT_DAT_CAP]>;

/// Index of a node in the octree arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(u32);

impl NodeId {
  /// The root always occupies the first arena slot.
  pub const ROOT: NodeId = NodeId(0);

  #[inline]
  pub(crate) fn from_index(index: usize) -> Self {
    debug_assert!(index <= u32::MAX as usize, "octree arena overflow");
    Self(index as u32)
  }

  #[inline]
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

/// Octree node.
///
/// A node is a leaf iff all eight child links are empty. Internal nodes
/// always have an empty bucket.
#[derive(Clone, Debug)]
pub struct OctreeNode<T> {
  /// Spatial extent of this node.
  pub bounds: Aabb,
  /// Distance from the root (root = 0).
  pub depth: u32,
  /// Entries stored at this node (leaves only).
  pub entries: Bucket<T>,
  /// Child links indexed by octant.
  pub children: [Option<NodeId>; 8],
}

impl<T> OctreeNode<T> {
  /// Create an empty leaf.
  pub fn new(bounds: Aabb, depth: u32) -> Self {
    Self {
      bounds,
      depth,
      entries: SmallVec::new(),
      children: [None; 8],
    }
  }

  #[inline]
  pub fn is_leaf(&self) -> bool {
    self.children.iter().all(Option::is_none)
  }

  /// Number of present child links.
  pub fn child_count(&self) -> usize {
    self.children.iter().flatten().count()
  }
}

/// Octant of `pos` relative to the midpoint `mid`.
///
/// Bit layout: X (bit 2), Y (bit 1), Z (bit 0). A coordinate `>= mid` sets
/// its bit.
#[inline]
pub fn octant_of(mid: Vec3, pos: Vec3) -> u8 {
  (((pos.x >= mid.x) as u8) << 2) | (((pos.y >= mid.y) as u8) << 1) | (pos.z >= mid.z) as u8
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;

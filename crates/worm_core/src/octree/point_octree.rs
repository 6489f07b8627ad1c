//! PointOctree - adaptive spatial index over `(position, payload)` pairs.
//!
//! # Splitting
//!
//! Leaves hold up to `max_dat_num` entries. Inserting into a full leaf turns
//! it into an internal node and redistributes its entries (plus the new one)
//! into child leaves keyed by octant. When every entry falls into the same
//! octant, the split cascades one level down and tries again, so each split
//! ends with the entries separated across at least two leaves.
//!
//! Coincident points never reach a split: inserts within the duplicate
//! tolerance of an existing point are dropped up front.

use std::collections::VecDeque;
use std::fmt;

use glam::Vec3;

use super::node::{octant_of, NodeId, OctreeNode};
use super::{Aabb, OctreeStats};
use crate::frustum::Frustum;

/// Default leaf occupancy before a split.
pub const DEFAULT_MAX_DAT_NUM: usize = 8;

/// Default squared distance for duplicate suppression and lookups.
pub const DEFAULT_SQR_TOLERANCE: f32 = f32::EPSILON;

/// Deepest level a cascading split may create.
///
/// Distinct points closer than f32 resolution at this depth share an
/// overfull leaf instead of splitting forever.
pub const MAX_DEPTH: u32 = 48;

/// Adaptive point octree.
pub struct PointOctree<T> {
  nodes: Vec<OctreeNode<T>>,
  max_dat_num: usize,
  len: usize,
}

impl<T> PointOctree<T> {
  /// Create an empty octree covering `bounds`.
  ///
  /// # Panics
  /// Debug-asserts that `max_dat_num > 1`. Release builds raise smaller
  /// values to 2.
  pub fn new(bounds: Aabb, max_dat_num: usize) -> Self {
    debug_assert!(max_dat_num > 1, "max_dat_num must be > 1");
    Self {
      nodes: vec![OctreeNode::new(bounds, 0)],
      max_dat_num: max_dat_num.max(2),
      len: 0,
    }
  }

  /// Root extent. Positions outside it are never stored.
  pub fn bounds(&self) -> Aabb {
    self.nodes[NodeId::ROOT.index()].bounds
  }

  pub fn max_dat_num(&self) -> usize {
    self.max_dat_num
  }

  /// Number of stored points.
  pub fn len(&self) -> usize {
    self.len
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Arena node by id.
  pub fn node(&self, id: NodeId) -> &OctreeNode<T> {
    &self.nodes[id.index()]
  }

  /// Drop every node and entry, keeping the root extent.
  pub fn clear(&mut self) {
    let bounds = self.bounds();
    self.nodes.clear();
    self.nodes.push(OctreeNode::new(bounds, 0));
    self.len = 0;
  }

  /// Insert with the default duplicate tolerance.
  pub fn insert(&mut self, pos: Vec3, payload: T) -> bool {
    self.insert_with_tolerance(pos, payload, DEFAULT_SQR_TOLERANCE)
  }

  /// Insert a point.
  ///
  /// Returns false (and stores nothing) when `pos` lies outside the root
  /// bounds or within `max_sqr_err` squared distance of a stored point.
  pub fn insert_with_tolerance(&mut self, pos: Vec3, payload: T, max_sqr_err: f32) -> bool {
    if !self.bounds().contains_point(pos) {
      return false;
    }
    if self.query(pos, max_sqr_err).is_some() {
      return false;
    }

    let mut current = NodeId::ROOT;
    loop {
      let node = &self.nodes[current.index()];
      if node.is_leaf() {
        if node.entries.len() < self.max_dat_num {
          self.nodes[current.index()].entries.push((pos, payload));
        } else if node.depth >= MAX_DEPTH {
          #[cfg(feature = "tracing")]
          tracing::warn!(depth = node.depth, "octree leaf at max depth, storing overfull");
          self.nodes[current.index()].entries.push((pos, payload));
        } else {
          self.split_leaf(current, pos, payload);
        }
        self.len += 1;
        return true;
      }

      let octant = octant_of(node.bounds.center(), pos);
      let next = node.children[octant as usize];
      match next {
        Some(child) => current = child,
        None => {
          let child = self.push_child(current, octant);
          self.nodes[child.index()].entries.push((pos, payload));
          self.len += 1;
          return true;
        }
      }
    }
  }

  /// Closest stored point to `pos` within `max_sqr_err` squared distance.
  ///
  /// Descends by octant to the leaf covering `pos` and scans its bucket; the
  /// first entry reaching the strict minimum wins. Returns None outside the
  /// root bounds, at a missing child, or when no entry is close enough.
  pub fn query(&self, pos: Vec3, max_sqr_err: f32) -> Option<(Vec3, &T)> {
    if !self.bounds().contains_point(pos) {
      return None;
    }

    let mut current = NodeId::ROOT;
    loop {
      let node = &self.nodes[current.index()];
      if node.is_leaf() {
        let mut best: Option<(f32, usize)> = None;
        for (idx, (entry_pos, _)) in node.entries.iter().enumerate() {
          let sqr_err = entry_pos.distance_squared(pos);
          if sqr_err <= max_sqr_err && best.map_or(true, |(min, _)| sqr_err < min) {
            best = Some((sqr_err, idx));
          }
        }
        return best.map(|(_, idx)| {
          let (entry_pos, payload) = &node.entries[idx];
          (*entry_pos, payload)
        });
      }
      current = node.children[octant_of(node.bounds.center(), pos) as usize]?;
    }
  }

  /// Every non-empty leaf bucket whose extent intersects `frustum`.
  ///
  /// Subtrees failing the conservative box test are pruned. Buckets may
  /// hold entries outside the frustum; callers needing exact picking test
  /// each entry with [`Frustum::contains`].
  pub fn query_frustum(&self, frustum: &Frustum) -> Vec<&[(Vec3, T)]> {
    let mut buckets = Vec::new();
    let mut stack = vec![NodeId::ROOT];

    while let Some(id) = stack.pop() {
      let node = &self.nodes[id.index()];
      if !frustum.intersects_aabb(node.bounds.min, node.bounds.max) {
        continue;
      }
      if node.is_leaf() {
        if !node.entries.is_empty() {
          buckets.push(node.entries.as_slice());
        }
      } else {
        stack.extend(node.children.iter().flatten().copied());
      }
    }

    buckets
  }

  /// Iterate over every stored entry (arena order).
  pub fn iter(&self) -> impl Iterator<Item = &(Vec3, T)> {
    self.nodes.iter().flat_map(|node| node.entries.iter())
  }

  /// Walk the tree post-order and gather structural statistics.
  ///
  /// Tracks `(node, next child octant)` pairs on an explicit stack.
  pub fn stats(&self) -> OctreeStats {
    let mut stats = OctreeStats::default();
    let mut stack: Vec<(NodeId, u8)> = vec![(NodeId::ROOT, 0)];

    while let Some(top) = stack.last_mut() {
      let (id, next_child) = *top;
      if next_child == 8 {
        stack.pop();
        let node = &self.nodes[id.index()];
        stats.nodes += 1;
        stats.max_depth = stats.max_depth.max(node.depth);
        if node.is_leaf() {
          stats.leaves += 1;
          stats.entries += node.entries.len();
          stats.max_leaf_entries = stats.max_leaf_entries.max(node.entries.len());
        } else {
          stats.internal_entries += node.entries.len();
        }
        continue;
      }
      top.1 += 1;
      if let Some(child) = self.nodes[id.index()].children[next_child as usize] {
        stack.push((child, 0));
      }
    }

    stats
  }

  fn push_child(&mut self, parent: NodeId, octant: u8) -> NodeId {
    let parent_node = &self.nodes[parent.index()];
    let bounds = parent_node.bounds.octant(octant);
    let depth = parent_node.depth + 1;

    let id = NodeId::from_index(self.nodes.len());
    self.nodes.push(OctreeNode::new(bounds, depth));
    self.nodes[parent.index()].children[octant as usize] = Some(id);
    id
  }

  /// Split a full leaf, cascading while all entries share one octant.
  fn split_leaf(&mut self, leaf: NodeId, pos: Vec3, payload: T) {
    let mut entries = std::mem::take(&mut self.nodes[leaf.index()].entries);
    entries.push((pos, payload));

    let mut split_at = leaf;
    loop {
      let node = &self.nodes[split_at.index()];
      let mid = node.bounds.center();
      let first = octant_of(mid, entries[0].0);
      if entries.iter().any(|(p, _)| octant_of(mid, *p) != first) {
        break;
      }
      if node.depth >= MAX_DEPTH {
        #[cfg(feature = "tracing")]
        tracing::warn!(
          depth = node.depth,
          entries = entries.len(),
          "octree split cannot separate points, storing overfull leaf"
        );
        self.nodes[split_at.index()].entries = entries;
        return;
      }
      split_at = self.push_child(split_at, first);
    }

    let mid = self.nodes[split_at.index()].bounds.center();
    for (entry_pos, entry_payload) in entries {
      let octant = octant_of(mid, entry_pos);
      let child = match self.nodes[split_at.index()].children[octant as usize] {
        Some(child) => child,
        None => self.push_child(split_at, octant),
      };
      self.nodes[child.index()].entries.push((entry_pos, entry_payload));
    }
  }
}

/// Breadth-first dump, one tree layer per line.
///
/// Internal nodes print as `[octant]`, missing children as `|_octant_|`,
/// leaves as `<octant>(x,y,z):payload; ...`.
impl<T: fmt::Display> fmt::Display for PointOctree<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut queue: VecDeque<(Option<NodeId>, u8, u32)> = VecDeque::new();
    queue.push_back((Some(NodeId::ROOT), 0, 0));
    let mut layer = 0;

    while let Some((id, octant, depth)) = queue.pop_front() {
      if depth != layer {
        writeln!(f)?;
        layer = depth;
      }
      let Some(id) = id else {
        write!(f, " |_{}_| ", octant)?;
        continue;
      };
      let node = &self.nodes[id.index()];
      if node.is_leaf() {
        write!(f, "|<{}>", octant)?;
        for (idx, (p, payload)) in node.entries.iter().enumerate() {
          if idx > 0 {
            write!(f, "; ")?;
          }
          write!(f, "({},{},{}):{}", p.x, p.y, p.z, payload)?;
        }
        write!(f, "| ")?;
      } else {
        write!(f, " |[{}]| ", octant)?;
        for (child_octant, child) in node.children.iter().enumerate() {
          queue.push_back((*child, child_octant as u8, depth + 1));
        }
      }
    }
    writeln!(f)
  }
}

#[cfg(test)]
#[path = "point_octree_test.rs"]
mod point_octree_test;

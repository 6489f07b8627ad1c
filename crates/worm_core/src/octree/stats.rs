//! Structural statistics for a point octree.

/// Statistics gathered by walking every node of a [`PointOctree`].
///
/// [`PointOctree`]: super::PointOctree
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OctreeStats {
	/// Total nodes in the arena reachable from the root.
	pub nodes: usize,
	/// Nodes without children.
	pub leaves: usize,
	/// Entries stored across all leaves.
	pub entries: usize,
	/// Deepest node (root = 0).
	pub max_depth: u32,
	/// Largest leaf bucket.
	pub max_leaf_entries: usize,
	/// Entries found on internal nodes. Always 0 for a well-formed tree.
	pub internal_entries: usize,
}

impl OctreeStats {
	/// Internal nodes (nodes - leaves).
	#[inline]
	pub fn internal_nodes(&self) -> usize {
		self.nodes - self.leaves
	}

	/// Check the split invariant against a leaf capacity.
	#[inline]
	pub fn is_well_formed(&self, max_dat_num: usize) -> bool {
		self.internal_entries == 0 && self.max_leaf_entries <= max_dat_num
	}
}

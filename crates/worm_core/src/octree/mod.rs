//! Point octree for spatial lookup over neuron samples.
//!
//! Nodes live in a single growable arena and reference their children by
//! index. Every traversal (insert, lookup, frustum query, statistics) runs on
//! an explicit stack or queue, so tree depth never translates into call
//! stack depth.
//!
//! # Module Structure
//!
//! - [`bounds`]: `Aabb` - node extents and octant subdivision
//! - [`node`]: `OctreeNode` - leaf bucket or child links, octant encoding
//! - [`point_octree`]: `PointOctree` - insert / query / frustum query
//! - [`stats`]: `OctreeStats` - structural statistics

pub mod bounds;
pub mod node;
pub mod point_octree;
pub mod stats;

// Re-exports
pub use bounds::Aabb;
pub use node::{octant_of, Bucket, NodeId, OctreeNode};
pub use point_octree::{PointOctree, DEFAULT_MAX_DAT_NUM, DEFAULT_SQR_TOLERANCE, MAX_DEPTH};
pub use stats::OctreeStats;

//! Axis-aligned bounding box for octree node extents.

use glam::Vec3;

/// Axis-aligned bounding box.
///
/// Used for octree node extents and frustum culling. Both corners are
/// inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
	/// Minimum corner (inclusive).
	pub min: Vec3,
	/// Maximum corner (inclusive).
	pub max: Vec3,
}

impl Aabb {
	/// Create a new AABB from min and max corners.
	///
	/// # Panics
	/// Debug-asserts that min <= max on all axes.
	pub fn new(min: Vec3, max: Vec3) -> Self {
		debug_assert!(
			min.x <= max.x && min.y <= max.y && min.z <= max.z,
			"AABB min must be <= max on all axes"
		);
		Self { min, max }
	}

	/// Create a new AABB from center and half-extents.
	pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
		Self {
			min: center - half_extents,
			max: center + half_extents,
		}
	}

	/// Smallest box holding every point, grown by `padding` on each side.
	///
	/// Returns None for an empty point set.
	pub fn from_points(points: &[Vec3], padding: f32) -> Option<Self> {
		let first = *points.first()?;
		let (min, max) = points
			.iter()
			.fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
		Some(Self {
			min: min - Vec3::splat(padding),
			max: max + Vec3::splat(padding),
		})
	}

	/// Check if this AABB contains a point.
	#[inline]
	pub fn contains_point(&self, point: Vec3) -> bool {
		point.x >= self.min.x
			&& point.x <= self.max.x
			&& point.y >= self.min.y
			&& point.y <= self.max.y
			&& point.z >= self.min.z
			&& point.z <= self.max.z
	}

	/// Get the size of the AABB (max - min).
	#[inline]
	pub fn size(&self) -> Vec3 {
		self.max - self.min
	}

	/// Get the center of the AABB.
	#[inline]
	pub fn center(&self) -> Vec3 {
		(self.min + self.max) * 0.5
	}

	/// Extent of one octant around the midpoint.
	///
	/// Octant bits: X (bit 2), Y (bit 1), Z (bit 0); a set bit selects the
	/// upper half of that axis.
	pub fn octant(&self, octant: u8) -> Aabb {
		let mid = self.center();
		let mut min = self.min;
		let mut max = mid;
		for axis in 0..3 {
			if octant & (0b100 >> axis) != 0 {
				min[axis] = mid[axis];
				max[axis] = self.max[axis];
			}
		}
		Aabb { min, max }
	}
}

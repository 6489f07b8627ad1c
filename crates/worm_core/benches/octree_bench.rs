//! Benchmarks for the point octree - insert, lookup and frustum workloads.
//!
//! Workloads use uniformly scattered points in a unit cube, matching the
//! density of a typical neuron cloud after view normalization.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use worm_core::octree::{Aabb, PointOctree};
use worm_core::Frustum;

fn scatter(count: usize, seed: u64) -> Vec<Vec3> {
	let mut rng = StdRng::seed_from_u64(seed);
	(0..count)
		.map(|_| {
			Vec3::new(
				rng.random_range(-1.0..1.0),
				rng.random_range(-1.0..1.0),
				rng.random_range(-1.0..1.0),
			)
		})
		.collect()
}

fn build(points: &[Vec3], max_dat_num: usize) -> PointOctree<u32> {
	let mut tree = PointOctree::new(Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0)), max_dat_num);
	for (i, p) in points.iter().enumerate() {
		tree.insert(*p, i as u32);
	}
	tree
}

// ============================================================================
// Construction
// ============================================================================

fn bench_insert(c: &mut Criterion) {
	let mut group = c.benchmark_group("octree_insert");

	for count in [1_000usize, 10_000, 100_000] {
		let points = scatter(count, 7);
		group.throughput(Throughput::Elements(count as u64));
		group.bench_with_input(BenchmarkId::from_parameter(count), &points, |b, points| {
			b.iter(|| black_box(build(points, 8).len()))
		});
	}

	group.finish();
}

fn bench_max_dat_num(c: &mut Criterion) {
	let mut group = c.benchmark_group("octree_insert_leaf_capacity");
	let points = scatter(10_000, 11);
	group.throughput(Throughput::Elements(points.len() as u64));

	for max_dat_num in [2usize, 4, 8, 16, 32] {
		group.bench_with_input(
			BenchmarkId::from_parameter(max_dat_num),
			&max_dat_num,
			|b, &max_dat_num| b.iter(|| black_box(build(&points, max_dat_num).len())),
		);
	}

	group.finish();
}

// ============================================================================
// Queries
// ============================================================================

fn bench_query(c: &mut Criterion) {
	let points = scatter(10_000, 3);
	let tree = build(&points, 8);

	c.bench_function("octree_query_10k", |b| {
		b.iter(|| {
			let mut found = 0usize;
			for p in points.iter().step_by(10) {
				if tree.query(*p, 1e-9).is_some() {
					found += 1;
				}
			}
			black_box(found)
		})
	});
}

fn bench_query_frustum(c: &mut Criterion) {
	let mut group = c.benchmark_group("octree_query_frustum");
	let points = scatter(10_000, 5);
	let tree = build(&points, 8);

	for half in [0.1f32, 0.5, 1.0] {
		let frustum = Frustum::from_aabb(&Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(half)));
		group.bench_with_input(BenchmarkId::from_parameter(half), &frustum, |b, frustum| {
			b.iter(|| {
				let picked: usize = tree
					.query_frustum(frustum)
					.iter()
					.flat_map(|bucket| bucket.iter())
					.filter(|(p, _)| frustum.contains(*p))
					.count();
				black_box(picked)
			})
		});
	}

	group.finish();
}

criterion_group!(benches, bench_insert, bench_max_dat_num, bench_query, bench_query_frustum);
criterion_main!(benches);

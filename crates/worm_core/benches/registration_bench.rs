//! Benchmarks for curve fitting and per-time-step registration.

use std::f32::consts::PI;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use worm_core::{
	BodyFrame, BodySequence, Component, ContourSample, CurveFitter, Frustum, NeuronCloud,
	RegistrationConfig, RegistrationEngine,
};
use worm_core::octree::Aabb;

const VERTICES: usize = 100;

fn body(time_steps: usize) -> BodySequence {
	let frames = (0..time_steps)
		.map(|t| {
			let phase = t as f32 * 0.05;
			BodyFrame::new(
				(0..VERTICES)
					.map(|i| {
						let s = i as f32 / (VERTICES - 1) as f32;
						ContourSample {
							center: Vec2::new(s * 100.0, 5.0 * (2.0 * PI * s + phase).sin()),
							half_width: Vec2::new(0.0, 2.0 + (PI * s).sin()),
						}
					})
					.collect(),
			)
		})
		.collect();
	BodySequence::new(frames).expect("synthetic body is well formed")
}

fn neurons(count: usize) -> NeuronCloud {
	NeuronCloud::new(
		(0..count)
			.map(|i| {
				let x = i as f32 * 300.0 / count as f32;
				let y = 4.0 * ((i * 37 % 101) as f32 / 100.0 - 0.5) + 0.0002 * x * x;
				let z = (i % 7) as f32 - 3.0;
				Vec3::new(x, y, z)
			})
			.collect(),
	)
}

// ============================================================================
// Fitting
// ============================================================================

fn bench_ransac(c: &mut Criterion) {
	let mut group = c.benchmark_group("curve_ransac");
	let cloud = neurons(300);

	for search_times in [10usize, 50, 100] {
		group.bench_with_input(
			BenchmarkId::from_parameter(search_times),
			&search_times,
			|b, &search_times| {
				let fitter = CurveFitter::new(cloud.points(), 1000);
				b.iter(|| {
					let mut rng = StdRng::seed_from_u64(0);
					black_box(fitter.fit_ransac(3, search_times, 1.0, &mut rng))
				})
			},
		);
	}

	group.finish();
}

// ============================================================================
// Registration
// ============================================================================

fn bench_register(c: &mut Criterion) {
	let mut group = c.benchmark_group("register");

	for time_steps in [10usize, 100] {
		let mut engine = RegistrationEngine::new(body(time_steps), neurons(300), RegistrationConfig::default());
		let everything = Frustum::from_aabb(&Aabb::new(Vec3::splat(-1000.0), Vec3::splat(1000.0)));
		engine.select(&everything, Component::VentralCord);
		engine.fit_curve(3);

		group.throughput(Throughput::Elements((time_steps * 300) as u64));
		group.bench_function(BenchmarkId::from_parameter(time_steps), |b| {
			b.iter(|| black_box(engine.register().time_steps()))
		});
	}

	group.finish();
}

criterion_group!(benches, bench_ransac, bench_register);
criterion_main!(benches);

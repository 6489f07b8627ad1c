mod config;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec3;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use worm_core::{io, Frustum, RegistrationEngine};

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "register_neurons")]
#[command(about = "Register a neuron point cloud onto a time series of worm body contours")]
struct Args {
	/// Path to TOML config file
	#[arg(short, long)]
	config: PathBuf,

	/// Body contour file (worm_position.txt)
	#[arg(short, long)]
	body: PathBuf,

	/// Neuron position file (neuron_position.txt)
	#[arg(short, long)]
	neurons: PathBuf,

	/// Output JSON file
	#[arg(short, long)]
	output: PathBuf,

	/// Override the RANSAC seed from the config
	#[arg(long)]
	seed: Option<u64>,
}

#[derive(Serialize)]
struct Output<'a> {
	time_steps: usize,
	point_count: usize,
	curve: Vec<Vec3>,
	frames: &'a [Vec<Vec3>],
}

fn main() -> Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	let args = Args::parse();

	let mut config = Config::load(&args.config)?;
	if let Some(seed) = args.seed {
		config.registration.ransac.seed = seed;
	}

	let body = io::load_body_contours(&args.body)
		.with_context(|| format!("Failed to load body contours: {}", args.body.display()))?;
	let neurons = io::load_neuron_positions(&args.neurons)
		.with_context(|| format!("Failed to load neuron positions: {}", args.neurons.display()))?;

	info!(
		time_steps = body.time_steps(),
		vertices = body.vertex_count(),
		neurons = neurons.len(),
		"datasets loaded"
	);

	let ransac = config.registration.ransac;
	let mut engine = RegistrationEngine::new(body, neurons, config.registration.clone());

	// Cameras are given in the normalized view; selection runs in model space.
	let to_model = engine.neurons().view_normalization().inverse();
	for (i, selection) in config.selection.iter().enumerate() {
		let Some(rect) = selection.rect() else {
			warn!(index = i, "zero-area selection rectangle, skipping");
			continue;
		};
		let camera = selection.camera.pose().transformed(&to_model);
		let claimed = engine.select(&Frustum::from_selection(&camera, &rect), selection.component);
		info!(index = i, component = %selection.component, claimed = claimed.len(), "selection applied");
	}

	let fitted = if engine.selection().is_empty() {
		info!(order = ransac.order, search_times = ransac.search_times, "no inliers selected, fitting with RANSAC");
		engine.fit_curve_ransac(&ransac)
	} else {
		info!(order = config.curve_order, inliers = engine.selection().len(), "fitting through selected inliers");
		engine.fit_curve(config.curve_order)
	};
	if !fitted || engine.curve().is_none() {
		anyhow::bail!("Curve fit failed: not enough well-spread points for the requested order");
	}

	let registration = engine.register();
	let output = Output {
		time_steps: registration.time_steps(),
		point_count: registration.point_count(),
		curve: engine.curve_vertices(),
		frames: registration.frames(),
	};

	let file = File::create(&args.output)
		.with_context(|| format!("Failed to create output file: {}", args.output.display()))?;
	serde_json::to_writer(BufWriter::new(file), &output)
		.with_context(|| format!("Failed to write output file: {}", args.output.display()))?;

	let metrics = engine.metrics();
	info!(
		time_steps = output.time_steps,
		points = output.point_count,
		fits_accepted = metrics.fits_accepted,
		fits_rejected = metrics.fits_rejected,
		avg_fit_us = metrics.avg_fit_timing_us(),
		avg_register_us = metrics.avg_register_timing_us(),
		"registration written to {}",
		args.output.display()
	);

	Ok(())
}

use std::path::Path;

use anyhow::{Context, Result};
use glam::{Vec2, Vec3};
use serde::Deserialize;
use worm_core::{CameraPose, Component, RegistrationConfig, SelectionRect};

#[derive(Debug, Deserialize)]
pub struct Config {
	/// Engine tunables; every field falls back to its default.
	#[serde(default)]
	pub registration: RegistrationConfig,
	/// Order of the constrained fit used when selections are present.
	#[serde(default = "default_curve_order")]
	pub curve_order: usize,
	/// Screen-space picks applied in order. Earlier picks keep their points.
	#[serde(default)]
	pub selection: Vec<SelectionConfig>,
}

#[derive(Debug, Deserialize)]
pub struct SelectionConfig {
	pub component: Component,
	/// Dragged rectangle as `[x0, y0, x1, y1]` in normalized window
	/// coordinates, y up. Omitted means the whole viewport.
	#[serde(default)]
	pub rect: Option<[f32; 4]>,
	#[serde(default)]
	pub camera: CameraConfig,
}

/// Camera in the normalized view of the neuron cloud (centered on its XY
/// midpoint, largest XY extent mapped to 2).
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
	pub position: [f32; 3],
	pub forward: [f32; 3],
	pub up: [f32; 3],
	pub fov_y_deg: f32,
	pub aspect: f32,
	pub near: f32,
	pub far: f32,
}

impl Default for CameraConfig {
	fn default() -> Self {
		Self {
			position: [0.0, 0.0, 3.0],
			forward: [0.0, 0.0, -1.0],
			up: [0.0, 1.0, 0.0],
			fov_y_deg: 60.0,
			aspect: 1.0,
			near: 0.1,
			far: 100.0,
		}
	}
}

impl CameraConfig {
	pub fn pose(&self) -> CameraPose {
		CameraPose::new(
			Vec3::from_array(self.position),
			Vec3::from_array(self.forward),
			Vec3::from_array(self.up),
			self.fov_y_deg.to_radians(),
			self.aspect,
			self.near,
			self.far,
		)
	}
}

impl SelectionConfig {
	/// None when the rectangle has zero area.
	pub fn rect(&self) -> Option<SelectionRect> {
		match self.rect {
			Some([x0, y0, x1, y1]) => SelectionRect::from_drag(Vec2::new(x0, y0), Vec2::new(x1, y1)),
			None => Some(SelectionRect::full()),
		}
	}
}

fn default_curve_order() -> usize {
	3
}

impl Config {
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file: {}", path.display()))?;

		let config: Config = toml::from_str(&content)
			.with_context(|| format!("Failed to parse config file: {}", path.display()))?;

		config.validate()?;
		Ok(config)
	}

	fn validate(&self) -> Result<()> {
		if self.curve_order == 0 {
			anyhow::bail!("curve_order must be at least 1");
		}
		if self.registration.ransac.order == 0 {
			anyhow::bail!("registration.ransac.order must be at least 1");
		}
		if self.registration.curve_samples < 2 {
			anyhow::bail!("registration.curve_samples must be at least 2");
		}
		if self.registration.octree_max_dat_num < 2 {
			anyhow::bail!("registration.octree_max_dat_num must be at least 2");
		}

		for (i, selection) in self.selection.iter().enumerate() {
			if selection.rect.iter().flatten().any(|v| !(0.0..=1.0).contains(v)) {
				anyhow::bail!("selection[{}].rect must lie in [0, 1]", i);
			}
			let camera = &selection.camera;
			if !(camera.fov_y_deg > 0.0 && camera.fov_y_deg < 180.0) {
				anyhow::bail!("selection[{}].camera.fov_y_deg must be in (0, 180)", i);
			}
			if !(camera.near > 0.0 && camera.far > camera.near) {
				anyhow::bail!("selection[{}].camera needs 0 < near < far", i);
			}
			if camera.aspect <= 0.0 {
				anyhow::bail!("selection[{}].camera.aspect must be positive", i);
			}
			if Vec3::from_array(camera.forward).length_squared() == 0.0 {
				anyhow::bail!("selection[{}].camera.forward must be non-zero", i);
			}
		}

		Ok(())
	}
}

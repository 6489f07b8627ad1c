//! worm_core - geometry and numerics for worm neuron registration
//!
//! This crate aligns a static neuron point cloud to a time series of worm
//! body contours. Everything here is a plain data transform over explicit
//! inputs; windowing, rendering and file dialogs live in the caller.
//!
//! # Features
//!
//! - **Point octree**: arena-backed spatial index with duplicate suppression,
//!   tolerance lookup and frustum range queries
//! - **Frustum selection**: six-plane convex regions built from a camera pose
//!   and a dragged screen rectangle
//! - **Curve fitting**: RANSAC and constrained polynomial least squares
//! - **Registration**: arc-length + offset encoding of every neuron against the
//!   fitted centerline, warped onto each time step's body geometry
//!
//! # Example
//!
//! ```ignore
//! use worm_core::{io, Component, RegistrationConfig, RegistrationEngine};
//!
//! let body = io::load_body_contours("worm_position.txt")?;
//! let neurons = io::load_neuron_positions("neuron_position.txt")?;
//! let mut engine = RegistrationEngine::new(body, neurons, RegistrationConfig::default());
//!
//! engine.select(&frustum, Component::Head);
//! engine.fit_curve(3);
//! let registration = engine.register();
//!
//! println!("{} time steps, {} points each",
//!     registration.time_steps(), registration.point_count());
//! ```

pub mod types;
pub use types::{Bounds2, Component, Point3};

pub mod error;
pub use error::LoadError;

pub mod config;
pub use config::{ComponentRatios, RansacParams, RegistrationConfig};

// Frustum and camera-driven selection volumes
pub mod camera;
pub mod frustum;
pub use camera::{CameraPose, SelectionRect};
pub use frustum::Frustum;

// Point octree spatial index
pub mod octree;
pub use octree::{Aabb, PointOctree};

// Polyline with arc-length parameterization
pub mod centerline;
pub use centerline::{ArcAnchor, Centerline};

// RANSAC + least squares polynomial fitting
pub mod curve;
pub use curve::{CurveFitter, PolyCurve, RansacFit};

// Input datasets
pub mod body;
pub mod io;
pub mod neuron;
pub use body::{BodyFrame, BodySequence, ComponentRanges, ContourSample};
pub use neuron::{NeuronCloud, Placement};

pub mod selection;
pub use selection::InlierSelection;

// Centerline warping per time step
pub mod registration;
pub use registration::{PointEncoding, Registration, RegistrationEngine};

pub mod metrics;

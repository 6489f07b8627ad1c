//! Errors for structurally invalid input data.
//!
//! Degenerate geometry and empty queries are not errors; only the loaders
//! reject input.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load a body-contour or neuron-position dataset.
///
/// A failed load keeps no partial state.
#[derive(Debug, Error)]
pub enum LoadError {
  #[error("cannot open file {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("malformed or non-finite number {text:?} at byte {offset}")]
  Number { text: String, offset: usize },

  #[error("file is not valid: {0}")]
  Malformed(&'static str),

  #[error(
    "segments should be given in pairs to compute the central path of the worm \
     (time step {time_step} has {count})"
  )]
  OddSegmentCount { time_step: usize, count: usize },

  #[error("time step {time_step} has {found} segments, expected {expected}")]
  InconsistentSegmentCount {
    time_step: usize,
    expected: usize,
    found: usize,
  },

  #[error("body contour has no samples")]
  EmptyContour,
}

//! Text-format loaders for body contours and neuron positions.
//!
//! Both formats are scanned with a small character state machine. Anything
//! outside the brackets and parentheses the machine looks for (keys,
//! whitespace, newlines) is skipped.
//!
//! Body contours, one block per time step:
//!
//! ```text
//! worm_position: [
//!   [(x0,y0), (x1,y1)], [(x2,y2), (x3,y3)], ...
//! ]
//! ```
//!
//! Neuron positions, one record per neuron, with file axes `(a, b, c)`
//! mapping to body axes `x = b, y = c, z = a`:
//!
//! ```text
//! AVAL: (a, b, c)
//! ```

use std::path::Path;

use glam::{Vec2, Vec3};

use crate::body::{BodyFrame, BodySequence};
use crate::error::LoadError;
use crate::neuron::NeuronCloud;

/// Read and parse a body-contour file.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "io::load_body_contours"))]
pub fn load_body_contours(path: impl AsRef<Path>) -> Result<BodySequence, LoadError> {
  let body = parse_body_contours(&read(path.as_ref())?)?;
  #[cfg(feature = "tracing")]
  tracing::debug!(
    time_steps = body.time_steps(),
    vertices = body.vertex_count(),
    "loaded body contours"
  );
  Ok(body)
}

/// Read and parse a neuron-position file.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "io::load_neuron_positions"))]
pub fn load_neuron_positions(path: impl AsRef<Path>) -> Result<NeuronCloud, LoadError> {
  let cloud = parse_neuron_positions(&read(path.as_ref())?)?;
  #[cfg(feature = "tracing")]
  tracing::debug!(neurons = cloud.len(), "loaded neuron positions");
  Ok(cloud)
}

fn read(path: &Path) -> Result<String, LoadError> {
  std::fs::read_to_string(path).map_err(|source| LoadError::Io {
    path: path.to_path_buf(),
    source,
  })
}

/// Parse a finite number; `nan` and `inf` are rejected.
fn parse_number(text: &str, start: usize, end: usize) -> Result<f32, LoadError> {
  let raw = text[start..end].trim();
  match raw.parse::<f32>() {
    Ok(value) if value.is_finite() => Ok(value),
    _ => Err(LoadError::Number {
      text: raw.to_owned(),
      offset: start,
    }),
  }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum BodyState {
  /// Outside any block.
  Key,
  /// Inside a time-step block, between segments.
  Frame,
  /// Inside a segment, between points.
  Segment,
  X,
  Y,
}

/// Parse body-contour text.
///
/// Each segment must hold exactly two points and each block an even number
/// of segments, equal across blocks.
pub fn parse_body_contours(text: &str) -> Result<BodySequence, LoadError> {
  let mut frames: Vec<BodyFrame> = Vec::new();
  let mut expected_segments: Option<usize> = None;
  let mut segments: Vec<[Vec2; 2]> = Vec::new();
  let mut points: Vec<Vec2> = Vec::with_capacity(2);
  let mut x = 0.0f32;
  let mut start = 0;
  let mut state = BodyState::Key;

  for (i, c) in text.char_indices() {
    state = match (state, c) {
      (BodyState::Key, '[') => {
        segments.clear();
        BodyState::Frame
      }
      (BodyState::Frame, '[') => {
        points.clear();
        BodyState::Segment
      }
      (BodyState::Frame, ']') => {
        let time_step = frames.len();
        let count = segments.len();
        if count % 2 != 0 {
          return Err(LoadError::OddSegmentCount { time_step, count });
        }
        match expected_segments {
          Some(expected) if expected != count => {
            return Err(LoadError::InconsistentSegmentCount {
              time_step,
              expected,
              found: count,
            });
          }
          _ => expected_segments = Some(count),
        }
        frames.push(BodyFrame::from_segments(&segments));
        BodyState::Key
      }
      (BodyState::Segment, '(') => {
        start = i + 1;
        BodyState::X
      }
      (BodyState::Segment, ']') => {
        let [a, b] = points[..] else {
          return Err(LoadError::Malformed("each segment needs exactly two points"));
        };
        segments.push([a, b]);
        BodyState::Frame
      }
      (BodyState::X, ',') => {
        x = parse_number(text, start, i)?;
        start = i + 1;
        BodyState::Y
      }
      (BodyState::Y, ')') => {
        points.push(Vec2::new(x, parse_number(text, start, i)?));
        BodyState::Segment
      }
      (state, _) => state,
    };
  }

  if state != BodyState::Key {
    return Err(LoadError::Malformed("unterminated time-step block"));
  }
  if frames.is_empty() {
    return Err(LoadError::Malformed("no time-step block found"));
  }
  BodySequence::new(frames)
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum NeuronState {
  Key,
  Value,
  A,
  B,
  C,
}

/// Parse neuron-position text.
pub fn parse_neuron_positions(text: &str) -> Result<NeuronCloud, LoadError> {
  let mut points = Vec::new();
  let mut current = Vec3::ZERO;
  let mut start = 0;
  let mut state = NeuronState::Key;

  for (i, c) in text.char_indices() {
    state = match (state, c) {
      (NeuronState::Key, ':') => NeuronState::Value,
      (NeuronState::Value, '(') => {
        start = i + 1;
        NeuronState::A
      }
      (NeuronState::A, ',') => {
        current.z = parse_number(text, start, i)?;
        start = i + 1;
        NeuronState::B
      }
      (NeuronState::B, ',') => {
        current.x = parse_number(text, start, i)?;
        start = i + 1;
        NeuronState::C
      }
      (NeuronState::C, ')') => {
        current.y = parse_number(text, start, i)?;
        points.push(current);
        NeuronState::Key
      }
      (state, _) => state,
    };
  }

  if matches!(state, NeuronState::A | NeuronState::B | NeuronState::C) {
    return Err(LoadError::Malformed("unterminated neuron record"));
  }
  Ok(NeuronCloud::new(points))
}

#[cfg(test)]
#[path = "io_test.rs"]
mod io_test;

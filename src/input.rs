//! JSON Lines landmark input.
//!
//! Each non-empty line describes one frame:
//!
//! ```text
//! {"frame": 0, "landmarks": [[x0, y0], [x1, y1], ...]}
//! {"frame": 1, "landmarks": null}
//! ```
//!
//! `landmarks` follows MediaPipe pose indexing; `null` or an absent field
//! means no pose was detected. `frame` is optional; when given, skipped
//! indices are recorded as frames without a pose.

use std::io::BufRead;

use log::debug;
use serde::Deserialize;

use crate::{constants::MAX_FRAME_GAP, geometry::Point2D, landmarks::LandmarkFrame, Error, Result};

/// One decoded input line
#[derive(Debug, Clone, Deserialize)]
pub struct FrameInput {
    #[serde(default)]
    pub frame: Option<usize>,
    #[serde(default)]
    pub landmarks: Option<Vec<[f64; 2]>>,
}

/// Image size used to scale normalized coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageSize {
    pub width: f64,
    pub height: f64,
}

impl FrameInput {
    /// Convert the raw landmark list into a named frame
    ///
    /// # Errors
    ///
    /// Returns an error if the landmark list is incomplete or the image size is invalid
    pub fn to_frame(&self, scale: Option<ImageSize>) -> Result<Option<LandmarkFrame>> {
        let Some(raw) = &self.landmarks else {
            return Ok(None);
        };

        let points: Vec<Point2D> = raw.iter().map(|&[x, y]| Point2D::new(x, y)).collect();
        let frame = match scale {
            Some(size) => LandmarkFrame::from_normalized(&points, size.width, size.height)?,
            None => LandmarkFrame::from_mediapipe(&points)?,
        };
        Ok(Some(frame))
    }
}

/// Read every frame from a JSON Lines source, in frame order
///
/// # Errors
///
/// Returns an error on I/O failure, malformed JSON, incomplete landmark
/// lists, frame indices that do not increase, or frame indices that skip
/// more than [`MAX_FRAME_GAP`] frames
pub fn read_frames<R: BufRead>(reader: R, scale: Option<ImageSize>) -> Result<Vec<Option<LandmarkFrame>>> {
    let mut frames: Vec<Option<LandmarkFrame>> = Vec::new();

    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let input: FrameInput = serde_json::from_str(&line)?;
        let frame = input
            .to_frame(scale)
            .map_err(|e| Error::InvalidInput(format!("line {}: {e}", line_number + 1)))?;

        if let Some(index) = input.frame {
            if index < frames.len() {
                return Err(Error::InvalidInput(format!(
                    "line {}: frame {index} is not after frame {}",
                    line_number + 1,
                    frames.len() - 1
                )));
            }
            if index - frames.len() > MAX_FRAME_GAP {
                return Err(Error::InvalidInput(format!(
                    "line {}: frame {index} skips more than {MAX_FRAME_GAP} frames",
                    line_number + 1
                )));
            }
            if index > frames.len() {
                debug!("Frames {}..{} absent from input, recorded without pose", frames.len(), index);
                frames.resize(index, None);
            }
        }

        frames.push(frame);
    }

    Ok(frames)
}

//! Named body landmarks and per-frame landmark sets.
//!
//! Frames are produced by an external pose estimator. Only the joints the
//! form rules consume are named here; indices follow the MediaPipe pose
//! topology so a raw 33-point result can be mapped directly.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{constants::NUM_POSE_LANDMARKS, geometry::Point2D, Error, Result};

/// Body joints consumed by the form rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Landmark {
    Nose,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
}

impl Landmark {
    /// Every named landmark, in MediaPipe index order
    pub const ALL: [Self; 9] = [
        Self::Nose,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftHip,
        Self::RightHip,
    ];

    /// Index of this joint in a MediaPipe pose result
    #[must_use]
    pub const fn mediapipe_index(self) -> usize {
        match self {
            Self::Nose => 0,
            Self::LeftShoulder => 11,
            Self::RightShoulder => 12,
            Self::LeftElbow => 13,
            Self::RightElbow => 14,
            Self::LeftWrist => 15,
            Self::RightWrist => 16,
            Self::LeftHip => 23,
            Self::RightHip => 24,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nose => "NOSE",
            Self::LeftShoulder => "LEFT_SHOULDER",
            Self::RightShoulder => "RIGHT_SHOULDER",
            Self::LeftElbow => "LEFT_ELBOW",
            Self::RightElbow => "RIGHT_ELBOW",
            Self::LeftWrist => "LEFT_WRIST",
            Self::RightWrist => "RIGHT_WRIST",
            Self::LeftHip => "LEFT_HIP",
            Self::RightHip => "RIGHT_HIP",
        }
    }
}

impl fmt::Display for Landmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Left/right limb selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Self; 2] = [Self::Left, Self::Right];

    #[must_use]
    pub const fn shoulder(self) -> Landmark {
        match self {
            Self::Left => Landmark::LeftShoulder,
            Self::Right => Landmark::RightShoulder,
        }
    }

    #[must_use]
    pub const fn elbow(self) -> Landmark {
        match self {
            Self::Left => Landmark::LeftElbow,
            Self::Right => Landmark::RightElbow,
        }
    }

    #[must_use]
    pub const fn wrist(self) -> Landmark {
        match self {
            Self::Left => Landmark::LeftWrist,
            Self::Right => Landmark::RightWrist,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Landmark coordinates for a single time instant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkFrame {
    points: BTreeMap<Landmark, Point2D>,
}

impl LandmarkFrame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, landmark: Landmark, point: Point2D) -> Self {
        self.points.insert(landmark, point);
        self
    }

    pub fn insert(&mut self, landmark: Landmark, point: Point2D) -> Option<Point2D> {
        self.points.insert(landmark, point)
    }

    #[must_use]
    pub fn get(&self, landmark: Landmark) -> Option<Point2D> {
        self.points.get(&landmark).copied()
    }

    /// Look up a landmark a rule cannot do without
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingLandmark` if the frame does not carry it
    pub fn require(&self, landmark: Landmark) -> Result<Point2D> {
        self.get(landmark).ok_or(Error::MissingLandmark(landmark))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Landmark, Point2D)> + '_ {
        self.points.iter().map(|(&landmark, &point)| (landmark, point))
    }

    /// Build a frame from a full MediaPipe-indexed landmark list
    ///
    /// # Errors
    ///
    /// Returns an error if the list is shorter than the MediaPipe pose topology
    pub fn from_mediapipe(points: &[Point2D]) -> Result<Self> {
        if points.len() < NUM_POSE_LANDMARKS {
            return Err(Error::InvalidInput(format!(
                "Expected {NUM_POSE_LANDMARKS} pose landmarks, got {}",
                points.len()
            )));
        }

        let points = Landmark::ALL
            .iter()
            .map(|&landmark| (landmark, points[landmark.mediapipe_index()]))
            .collect();

        Ok(Self { points })
    }

    /// Build a frame from normalized `[0, 1]` coordinates scaled to image size
    ///
    /// # Errors
    ///
    /// Returns an error if the image size is not positive or the list is too short
    pub fn from_normalized(points: &[Point2D], width: f64, height: f64) -> Result<Self> {
        if !(width > 0.0 && height > 0.0) {
            return Err(Error::InvalidInput(format!(
                "Image size must be positive, got {width}x{height}"
            )));
        }

        let scaled: Vec<Point2D> = points.iter().map(|p| Point2D::new(p.x * width, p.y * height)).collect();
        Self::from_mediapipe(&scaled)
    }
}

impl FromIterator<(Landmark, Point2D)> for LandmarkFrame {
    fn from_iter<I: IntoIterator<Item = (Landmark, Point2D)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indexed_points() -> Vec<Point2D> {
        (0..NUM_POSE_LANDMARKS).map(|i| Point2D::new(i as f64, (i * 2) as f64)).collect()
    }

    #[test]
    fn test_from_mediapipe() {
        let frame = LandmarkFrame::from_mediapipe(&indexed_points()).unwrap();

        assert_eq!(frame.len(), Landmark::ALL.len());
        assert_eq!(frame.get(Landmark::Nose), Some(Point2D::new(0.0, 0.0)));
        assert_eq!(frame.get(Landmark::LeftElbow), Some(Point2D::new(13.0, 26.0)));
        assert_eq!(frame.get(Landmark::RightHip), Some(Point2D::new(24.0, 48.0)));
    }

    #[test]
    fn test_from_mediapipe_too_short() {
        let points = vec![Point2D::default(); 20];
        assert!(LandmarkFrame::from_mediapipe(&points).is_err());
    }

    #[test]
    fn test_from_normalized() {
        let mut points = vec![Point2D::default(); NUM_POSE_LANDMARKS];
        points[Landmark::LeftWrist.mediapipe_index()] = Point2D::new(0.5, 0.25);

        let frame = LandmarkFrame::from_normalized(&points, 640.0, 480.0).unwrap();
        assert_eq!(frame.get(Landmark::LeftWrist), Some(Point2D::new(320.0, 120.0)));

        assert!(LandmarkFrame::from_normalized(&points, 0.0, 480.0).is_err());
    }

    #[test]
    fn test_require_missing() {
        let frame = LandmarkFrame::new().with(Landmark::LeftShoulder, Point2D::new(1.0, 1.0));

        assert!(frame.require(Landmark::LeftShoulder).is_ok());
        match frame.require(Landmark::LeftWrist) {
            Err(Error::MissingLandmark(Landmark::LeftWrist)) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_side_joints() {
        assert_eq!(Side::Left.elbow(), Landmark::LeftElbow);
        assert_eq!(Side::Right.wrist(), Landmark::RightWrist);
        assert_eq!(Side::Right.to_string(), "right");
        assert_eq!(Landmark::LeftShoulder.to_string(), "LEFT_SHOULDER");
    }
}

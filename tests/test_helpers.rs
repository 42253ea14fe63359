//! Helper functions and utilities for tests

#![allow(dead_code)]

use exercise_form::{
    constants::NUM_POSE_LANDMARKS,
    geometry::Point2D,
    landmarks::{Landmark, LandmarkFrame},
};

const UPPER_ARM: f64 = 100.0;
const FOREARM: f64 = 80.0;

/// Wrist position giving `angle` degrees at an elbow directly below its shoulder
fn wrist(elbow: Point2D, angle: f64) -> Point2D {
    let radians = angle.to_radians();
    Point2D::new(elbow.x + FOREARM * radians.sin(), elbow.y - FOREARM * radians.cos())
}

/// Points for both arms with level shoulders and the given elbow angles
pub fn arm_points(left_angle: f64, right_angle: f64) -> Vec<(Landmark, Point2D)> {
    let left_shoulder = Point2D::new(200.0, 100.0);
    let right_shoulder = Point2D::new(400.0, 100.0);
    let left_elbow = Point2D::new(left_shoulder.x, left_shoulder.y + UPPER_ARM);
    let right_elbow = Point2D::new(right_shoulder.x, right_shoulder.y + UPPER_ARM);

    vec![
        (Landmark::Nose, Point2D::new(300.0, 40.0)),
        (Landmark::LeftShoulder, left_shoulder),
        (Landmark::LeftElbow, left_elbow),
        (Landmark::LeftWrist, wrist(left_elbow, left_angle)),
        (Landmark::RightShoulder, right_shoulder),
        (Landmark::RightElbow, right_elbow),
        (Landmark::RightWrist, wrist(right_elbow, right_angle)),
        (Landmark::LeftHip, Point2D::new(220.0, 350.0)),
        (Landmark::RightHip, Point2D::new(380.0, 350.0)),
    ]
}

/// Landmark frame with the given elbow angles
pub fn arm_frame(left_angle: f64, right_angle: f64) -> LandmarkFrame {
    arm_points(left_angle, right_angle).into_iter().collect()
}

/// Full MediaPipe-indexed landmark list with the given elbow angles
pub fn mediapipe_points(left_angle: f64, right_angle: f64) -> Vec<[f64; 2]> {
    let mut points = vec![[0.0, 0.0]; NUM_POSE_LANDMARKS];
    for (landmark, point) in arm_points(left_angle, right_angle) {
        points[landmark.mediapipe_index()] = [point.x, point.y];
    }
    points
}

/// One JSON Lines input record; `None` angles mean no pose
pub fn jsonl_line(frame: usize, angles: Option<(f64, f64)>) -> String {
    let landmarks = match angles {
        Some((left, right)) => serde_json::to_string(&mediapipe_points(left, right)).unwrap(),
        None => "null".to_string(),
    };
    format!("{{\"frame\": {frame}, \"landmarks\": {landmarks}}}")
}

/// Elbow angle of a curl with period `period` frames, extended at frame 0
pub fn curl_angle(frame: usize, period: usize) -> f64 {
    let phase = 2.0 * std::f64::consts::PI * frame as f64 / period as f64;
    100.0 + 70.0 * phase.cos()
}

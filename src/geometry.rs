//! Planar geometry over landmark coordinates.
//!
//! Coordinates are unit-agnostic: pixels, normalized image space or anything
//! else, as long as both axes share a scale.

use serde::{Deserialize, Serialize};

/// A 2D coordinate
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Angle at vertex `b` formed by the rays `b -> a` and `b -> c`, in degrees.
///
/// Uses cos(θ) = (u1 · u2) over the unit vectors of both rays. The cosine is
/// clamped to [-1, 1] before `acos`, so the result always lies in [0, 180].
///
/// Returns 0.0 when either segment has zero length, or when a segment is too
/// long to represent. Callers must not read a 0° result as "fully flexed"
/// without checking for coincident landmarks.
#[must_use]
pub fn angle_at(a: Point2D, b: Point2D, c: Point2D) -> f64 {
    let (Some(u1), Some(u2)) = (unit_vector(a.x - b.x, a.y - b.y), unit_vector(c.x - b.x, c.y - b.y)) else {
        return 0.0;
    };

    let dot = u1.0.mul_add(u2.0, u1.1 * u2.1);
    let cos_angle = dot.clamp(-1.0, 1.0);

    cos_angle.acos().to_degrees().clamp(0.0, 180.0)
}

/// Direction of `(x, y)` with unit length, `None` for zero or non-finite vectors.
///
/// Components are rescaled by their largest magnitude first so the norm
/// neither overflows nor underflows.
fn unit_vector(x: f64, y: f64) -> Option<(f64, f64)> {
    let scale = x.abs().max(y.abs());
    if scale == 0.0 || !x.is_finite() || !y.is_finite() {
        return None;
    }

    let (x, y) = (x / scale, y / scale);
    let norm = x.hypot(y);
    Some((x / norm, y / norm))
}

/// Euclidean distance between two points
#[must_use]
pub fn distance(a: Point2D, b: Point2D) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Absolute vertical offset between two points
#[must_use]
pub fn vertical_offset(a: Point2D, b: Point2D) -> f64 {
    (a.y - b.y).abs()
}

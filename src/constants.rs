//! Constants used throughout the crate

/// Number of landmarks in a MediaPipe pose result
pub const NUM_POSE_LANDMARKS: usize = 33;

/// Largest run of absent frame indices accepted between two input lines
pub const MAX_FRAME_GAP: usize = 1_000_000;

/// Default frames per second assumption
pub const DEFAULT_FPS: f64 = 30.0;

/// Debounce window expressed in seconds, converted to frames with the source fps
pub const MIN_GAP_SECONDS: f64 = 0.3;

/// Elbow rule thresholds (degrees)
pub const DEFAULT_ELBOW_TOP_THRESH: f64 = 50.0;
pub const DEFAULT_ELBOW_BOTTOM_THRESH: f64 = 150.0;

/// Extension rule threshold (degrees)
pub const DEFAULT_EXTENSION_THRESH: f64 = 160.0;

/// Offset tolerances for distance based rules (coordinate units)
pub const DEFAULT_ALIGNMENT_TOLERANCE: f64 = 25.0;
pub const DEFAULT_SYMMETRY_TOLERANCE: f64 = 30.0;

/// Rep counter hysteresis defaults
pub const DEFAULT_UP_THRESH: f64 = 60.0;
pub const DEFAULT_DOWN_THRESH: f64 = 150.0;
pub const DEFAULT_MIN_GAP: usize = 10;

/// Local polynomial filter defaults
pub const DEFAULT_SAVGOL_WINDOW: usize = 11;
pub const DEFAULT_SAVGOL_POLY_ORDER: usize = 2;
pub const MIN_SAVGOL_WINDOW: usize = 5;

/// Exponential moving average default
pub const DEFAULT_EMA_ALPHA: f64 = 0.2;

/// Numeric precision epsilon
pub const EPSILON: f64 = 1e-10;

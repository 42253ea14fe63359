//! Exercise form analysis over body-pose landmarks.
//!
//! This library consumes named 2D body landmarks per frame (as produced by an
//! external pose estimator) and provides:
//! - Joint-angle geometry
//! - Per-frame form rules for a small set of exercises
//! - Gap filling and smoothing of angle series (Savitzky-Golay or EMA)
//! - A hysteresis rep counter that tolerates jitter and partial motions
//!
//! The pipeline consists of:
//! 1. Evaluating the exercise's rules on each frame, recording the joint angle
//! 2. Counting reps live on the raw angles
//! 3. Smoothing the full angle series once the session ends
//! 4. Counting reps again on the smoothed series for the final report
//!
//! # Examples
//!
//! ## Counting reps on an angle series
//!
//! ```
//! use exercise_form::rep_counter::{count_reps, RepCounterConfig};
//!
//! let series = [170.0, 150.0, 100.0, 55.0, 30.0, 45.0, 100.0, 155.0, 170.0];
//! let config = RepCounterConfig { min_gap: 2, ..RepCounterConfig::default() };
//!
//! let summary = count_reps(&series, &config);
//! assert_eq!(summary.count, 1);
//! assert_eq!(summary.events, vec![7]);
//! ```
//!
//! ## Smoothing a series with gaps
//!
//! ```
//! use exercise_form::filters::{create_smoother, smooth_series};
//!
//! # fn main() -> exercise_form::Result<()> {
//! let smoother = create_smoother("savgol:5:2")?;
//! let raw = [None, Some(170.0), Some(120.0), None, Some(40.0), Some(90.0), Some(165.0)];
//!
//! let outcome = smooth_series(&raw, smoother.as_ref());
//! assert_eq!(outcome.len(), raw.len());
//! assert!(outcome.is_smoothed());
//! # Ok(())
//! # }
//! ```
//!
//! ## Analyzing a session
//!
//! ```
//! use exercise_form::{config::Config, landmarks::LandmarkFrame, session::SessionAnalyzer};
//!
//! # fn main() -> exercise_form::Result<()> {
//! let mut session = SessionAnalyzer::from_config(&Config::default())?;
//!
//! // Frames come from a pose estimator; `None` means no pose was detected
//! let frames: Vec<Option<LandmarkFrame>> = vec![None, None];
//! for frame in &frames {
//!     let record = session.process_frame(frame.as_ref());
//!     assert!(!record.pose_detected);
//! }
//!
//! let report = session.finish();
//! assert_eq!(report.summary().frames, 2);
//! # Ok(())
//! # }
//! ```

/// Joint-angle and distance geometry
pub mod geometry;

/// Named body landmarks and per-frame landmark sets
pub mod landmarks;

/// Per-frame form rules
pub mod form_rules;

/// Supported exercises and their rule sets
pub mod exercise;

/// Gap filling and smoothing of angle series
pub mod filters;

/// Hysteresis rep counting
pub mod rep_counter;

/// Session pipeline tying rules, smoothing and counting together
pub mod session;

/// JSON Lines landmark input
pub mod input;

/// CSV and YAML export
pub mod export;

/// Utility functions for numeric conversions
pub mod utils;

/// Error types and result handling
pub mod error;

/// Constants used throughout the library
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};

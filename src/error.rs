//! Error types for the exercise form library.

use thiserror::Error;

use crate::landmarks::Landmark;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV export failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Landmark input could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Summary could not be serialized
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A rule needed a landmark the frame does not carry
    #[error("Landmark {0} missing from frame")]
    MissingLandmark(Landmark),

    /// Exercise identifier has no associated rule set
    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    /// Smoother initialization error
    #[error("Filter error: {0}")]
    FilterError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;

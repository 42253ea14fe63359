//! Checked float to integer conversions

use crate::{Error, Result};

/// Convert a non-negative integral f64 to usize
///
/// # Errors
///
/// Returns an error if the value is not finite, negative, fractional or
/// larger than `usize::MAX`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)] // Checked above
pub fn f64_to_usize(value: f64) -> Result<usize> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > usize::MAX as f64 {
        return Err(Error::InvalidInput(format!(
            "Value {value} cannot be safely converted to usize"
        )));
    }
    Ok(value as usize)
}

/// Convert a frame count to f64 for statistics
#[must_use]
#[allow(clippy::cast_precision_loss)] // Frame counts stay far below 2^52
pub const fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

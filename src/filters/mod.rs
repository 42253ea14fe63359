//! Batch smoothing for angle series.
//!
//! A series first has its missing samples resolved (see [`gap_fill`]) and is
//! then passed through a [`SeriesSmoother`]. Smoothing is best effort: when a
//! smoother cannot produce a result the gap-filled series is returned as a
//! [`SmoothOutcome::Degraded`] together with the reason.

/// Missing sample resolution
pub mod gap_fill;

/// Savitzky-Golay local polynomial filter
pub mod savitzky_golay;

/// Exponential moving average
pub mod exponential;

use log::{debug, warn};
use thiserror::Error;

use crate::{
    constants::{DEFAULT_EMA_ALPHA, DEFAULT_SAVGOL_POLY_ORDER, DEFAULT_SAVGOL_WINDOW},
    Error, Result,
};

/// Why a smoother fell back to the gap-filled series
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DegradeReason {
    /// Series too short for the minimum filter window
    #[error("window {window} is below the minimum of {min}")]
    WindowTooShort { window: usize, min: usize },

    /// Polynomial degree cannot be fitted in the window
    #[error("polynomial order {poly_order} must be less than window {window}")]
    PolyOrderTooHigh { poly_order: usize, window: usize },

    /// Least-squares fit is numerically unusable
    #[error("ill-conditioned fit: {0}")]
    IllConditioned(String),

    /// Filter produced NaN or infinite values
    #[error("filter produced non-finite values")]
    NonFinite,
}

/// Result of smoothing one series
#[derive(Debug, Clone, PartialEq)]
pub enum SmoothOutcome {
    /// Gap-filled and filtered
    Smoothed(Vec<f64>),
    /// Gap-filled only
    Degraded { series: Vec<f64>, reason: DegradeReason },
    /// No valid sample at all, nothing to resolve
    AllMissing { len: usize },
}

impl SmoothOutcome {
    /// Resolved values, `None` if the whole series was missing
    #[must_use]
    pub fn values(&self) -> Option<&[f64]> {
        match self {
            Self::Smoothed(series) | Self::Degraded { series, .. } => Some(series),
            Self::AllMissing { .. } => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Smoothed(series) | Self::Degraded { series, .. } => series.len(),
            Self::AllMissing { len } => *len,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub const fn is_smoothed(&self) -> bool {
        matches!(self, Self::Smoothed(_))
    }

    /// Why smoothing was skipped, if it was
    #[must_use]
    pub const fn degrade_reason(&self) -> Option<&DegradeReason> {
        match self {
            Self::Degraded { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// Series with the same length as the input, missing entries only when
    /// the whole series was missing
    #[must_use]
    pub fn into_samples(self) -> Vec<Option<f64>> {
        match self {
            Self::Smoothed(series) | Self::Degraded { series, .. } => series.into_iter().map(Some).collect(),
            Self::AllMissing { len } => vec![None; len],
        }
    }
}

/// Trait for batch smoothers over gap-free series
pub trait SeriesSmoother: Send + Sync {
    /// Smooth a series that contains no missing values
    ///
    /// # Errors
    ///
    /// Returns the reason the series could not be smoothed
    fn smooth(&self, values: &[f64]) -> std::result::Result<Vec<f64>, DegradeReason>;

    /// Get smoother name
    fn name(&self) -> &str;
}

/// Pass-through smoother, leaves the gap-filled series untouched
pub struct NoSmoothing;

impl SeriesSmoother for NoSmoothing {
    fn smooth(&self, values: &[f64]) -> std::result::Result<Vec<f64>, DegradeReason> {
        Ok(values.to_vec())
    }

    fn name(&self) -> &str {
        "NoSmoothing"
    }
}

/// Resolve missing samples and smooth the result
#[must_use]
pub fn smooth_series(values: &[Option<f64>], smoother: &dyn SeriesSmoother) -> SmoothOutcome {
    let Some(filled) = gap_fill::fill_gaps(values) else {
        debug!("Series of {} samples has no valid value, left unsmoothed", values.len());
        return SmoothOutcome::AllMissing { len: values.len() };
    };

    match smoother.smooth(&filled) {
        Ok(series) => SmoothOutcome::Smoothed(series),
        Err(reason) => {
            match reason {
                DegradeReason::WindowTooShort { .. } => debug!("{} skipped: {}", smoother.name(), reason),
                _ => warn!("{} failed, using gap-filled series: {}", smoother.name(), reason),
            }
            SmoothOutcome::Degraded { series: filled, reason }
        }
    }
}

/// Create a smoother by type name
///
/// Accepts an optional colon separated parameter list:
/// `savgol[:window[:poly_order]]`, `ema[:alpha]`, `none`.
///
/// # Errors
///
/// Returns an error for unknown names or invalid parameters
pub fn create_smoother(descriptor: &str) -> Result<Box<dyn SeriesSmoother>> {
    let mut parts = descriptor.split(':');
    let name = parts.next().unwrap_or_default().trim().to_lowercase();
    let params: Vec<&str> = parts.collect();

    let param = |index: usize, label: &str| -> Result<Option<f64>> {
        params
            .get(index)
            .map(|raw| {
                raw.trim()
                    .parse::<f64>()
                    .map_err(|_| Error::FilterError(format!("Invalid {label} '{raw}' in '{descriptor}'")))
            })
            .transpose()
    };

    match name.as_str() {
        "none" | "nosmoothing" => Ok(Box::new(NoSmoothing)),
        "savgol" | "savitzky_golay" | "savitzkygolay" => {
            let window = param(0, "window")?.unwrap_or(DEFAULT_SAVGOL_WINDOW as f64);
            let poly_order = param(1, "polynomial order")?.unwrap_or(DEFAULT_SAVGOL_POLY_ORDER as f64);
            let window = crate::utils::safe_cast::f64_to_usize(window)?;
            let poly_order = crate::utils::safe_cast::f64_to_usize(poly_order)?;
            savitzky_golay::validate_params(window, poly_order)?;
            Ok(Box::new(savitzky_golay::SavitzkyGolay::new(window, poly_order)))
        }
        "ema" | "exponential" => {
            let alpha = param(0, "alpha")?.unwrap_or(DEFAULT_EMA_ALPHA);
            exponential::validate_alpha(alpha)?;
            Ok(Box::new(exponential::ExponentialSmoother::new(alpha)))
        }
        _ => Err(Error::FilterError(format!("Unknown smoother type: {descriptor}"))),
    }
}

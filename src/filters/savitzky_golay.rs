use nalgebra::{DMatrix, DVector};

use super::{DegradeReason, SeriesSmoother};
use crate::{
    constants::{EPSILON, MIN_SAVGOL_WINDOW},
    Error, Result,
};

/// Reciprocal condition number below which a fit is rejected
const MIN_INVERSE_CONDITION: f64 = 1e-12;

/// Savitzky-Golay local polynomial filter
///
/// Interior samples take the value of the least-squares polynomial fitted to
/// the centred window. The first and last `window / 2` samples are evaluated
/// on the polynomial fitted to the first and last full window.
pub struct SavitzkyGolay {
    window: usize,
    poly_order: usize,
}

/// Check filter parameters without panicking
///
/// # Errors
///
/// Returns an error if the window is not odd and positive, or if the
/// polynomial order does not fit the window
pub fn validate_params(window: usize, poly_order: usize) -> Result<()> {
    if window == 0 || window % 2 == 0 {
        return Err(Error::FilterError(format!(
            "Savitzky-Golay window must be odd and greater than 0, got {window}"
        )));
    }
    if poly_order >= window {
        return Err(Error::FilterError(format!(
            "Savitzky-Golay polynomial order {poly_order} must be less than window {window}"
        )));
    }
    Ok(())
}

impl SavitzkyGolay {
    /// Create a new Savitzky-Golay filter
    ///
    /// # Panics
    ///
    /// Panics if `window` is zero or even, or if `poly_order >= window`
    #[must_use]
    pub fn new(window: usize, poly_order: usize) -> Self {
        assert!(window > 0, "Window size must be greater than 0");
        assert!(window % 2 == 1, "Window size must be odd, got {}", window);
        assert!(poly_order < window, "Polynomial order must be less than window size, got {}", poly_order);
        Self { window, poly_order }
    }

    #[must_use]
    pub const fn window(&self) -> usize {
        self.window
    }

    #[must_use]
    pub const fn poly_order(&self) -> usize {
        self.poly_order
    }

    /// Window actually used for a series of `len` samples: the configured
    /// width clamped to the largest odd number not above `len`
    #[must_use]
    pub fn effective_window(&self, len: usize) -> usize {
        let largest_odd = if len % 2 == 1 { len } else { len.saturating_sub(1) };
        self.window.min(largest_odd)
    }

    /// Least-squares projection for a centred window: row `j` maps window
    /// samples to the coefficient of `x^j`, with `x = 0` at the window centre
    fn projection(window: usize, poly_order: usize) -> std::result::Result<DMatrix<f64>, DegradeReason> {
        let half = (window / 2) as f64;
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)] // degree < window
        let design = DMatrix::from_fn(window, poly_order + 1, |row, col| (row as f64 - half).powi(col as i32));

        let svd = design.svd(true, true);
        let largest = svd.singular_values.max();
        let smallest = svd.singular_values.min();
        if !(smallest > largest * MIN_INVERSE_CONDITION) {
            return Err(DegradeReason::IllConditioned(format!(
                "singular values span {smallest:e}..{largest:e}"
            )));
        }

        svd.pseudo_inverse(EPSILON)
            .map_err(|e| DegradeReason::IllConditioned(e.to_string()))
    }

    fn evaluate(coefficients: &DVector<f64>, x: f64) -> f64 {
        coefficients.iter().rev().fold(0.0, |acc, &c| acc.mul_add(x, c))
    }
}

impl SeriesSmoother for SavitzkyGolay {
    fn smooth(&self, values: &[f64]) -> std::result::Result<Vec<f64>, DegradeReason> {
        let n = values.len();
        let window = self.effective_window(n);
        if window < MIN_SAVGOL_WINDOW {
            return Err(DegradeReason::WindowTooShort {
                window,
                min: MIN_SAVGOL_WINDOW,
            });
        }
        if self.poly_order >= window {
            return Err(DegradeReason::PolyOrderTooHigh {
                poly_order: self.poly_order,
                window,
            });
        }

        let projection = Self::projection(window, self.poly_order)?;
        let half = window / 2;
        let mut smoothed = vec![0.0; n];

        let centre = projection.row(0);
        for i in half..n - half {
            smoothed[i] = values[i - half..=i + half]
                .iter()
                .zip(centre.iter())
                .map(|(v, c)| v * c)
                .sum();
        }

        let head = &projection * DVector::from_column_slice(&values[..window]);
        for (i, slot) in smoothed[..half].iter_mut().enumerate() {
            *slot = Self::evaluate(&head, i as f64 - half as f64);
        }

        let tail_start = n - window;
        let tail = &projection * DVector::from_column_slice(&values[tail_start..]);
        for (i, slot) in smoothed.iter_mut().enumerate().skip(n - half) {
            *slot = Self::evaluate(&tail, (i - tail_start) as f64 - half as f64);
        }

        if smoothed.iter().all(|v| v.is_finite()) {
            Ok(smoothed)
        } else {
            Err(DegradeReason::NonFinite)
        }
    }

    fn name(&self) -> &str {
        "SavitzkyGolay"
    }
}

use super::{DegradeReason, SeriesSmoother};
use crate::{Error, Result};

/// Check an exponential smoothing factor without panicking
///
/// # Errors
///
/// Returns an error if alpha is not in (0, 1]
pub fn validate_alpha(alpha: f64) -> Result<()> {
    if alpha > 0.0 && alpha <= 1.0 {
        Ok(())
    } else {
        Err(Error::FilterError(format!("Alpha must be in (0, 1], got {alpha}")))
    }
}

/// Streaming exponential smoothing of one scalar signal
pub struct ExponentialFilter {
    alpha: f64,
    last: Option<f64>,
}

impl ExponentialFilter {
    pub fn new(alpha: f64) -> Self {
        assert!(alpha > 0.0 && alpha <= 1.0, "Alpha must be in (0, 1]");
        Self { alpha, last: None }
    }

    pub fn apply(&mut self, value: f64) -> f64 {
        let filtered = match self.last {
            Some(last) => self.alpha * value + (1.0 - self.alpha) * last,
            None => value,
        };

        self.last = Some(filtered);
        filtered
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Batch exponential moving average: `out[0] = in[0]`,
/// `out[i] = alpha * in[i] + (1 - alpha) * out[i - 1]`
pub struct ExponentialSmoother {
    alpha: f64,
}

impl ExponentialSmoother {
    pub fn new(alpha: f64) -> Self {
        assert!(alpha > 0.0 && alpha <= 1.0, "Alpha must be in (0, 1]");
        Self { alpha }
    }

    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl SeriesSmoother for ExponentialSmoother {
    fn smooth(&self, values: &[f64]) -> std::result::Result<Vec<f64>, DegradeReason> {
        let mut filter = ExponentialFilter::new(self.alpha);
        let smoothed: Vec<f64> = values.iter().map(|&v| filter.apply(v)).collect();

        if smoothed.iter().all(|v| v.is_finite()) {
            Ok(smoothed)
        } else {
            Err(DegradeReason::NonFinite)
        }
    }

    fn name(&self) -> &str {
        "ExponentialSmoother"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_filter() {
        let mut filter = ExponentialFilter::new(0.5);

        // First value passes through
        assert_eq!(filter.apply(10.0), 10.0);

        // Second value is smoothed
        assert_eq!(filter.apply(20.0), 15.0); // 0.5 * 20 + 0.5 * 10

        filter.reset();
        assert_eq!(filter.apply(30.0), 30.0);
    }

    #[test]
    fn test_alpha_bounds() {
        // High alpha = less smoothing
        let mut filter1 = ExponentialFilter::new(0.9);
        filter1.apply(10.0);
        assert!((filter1.apply(20.0) - 19.0).abs() < 0.001); // 0.9 * 20 + 0.1 * 10

        // Low alpha = more smoothing
        let mut filter2 = ExponentialFilter::new(0.1);
        filter2.apply(10.0);
        assert!((filter2.apply(20.0) - 11.0).abs() < 0.001); // 0.1 * 20 + 0.9 * 10
    }

    #[test]
    fn test_batch_default_alpha() {
        let smoother = ExponentialSmoother::new(0.2);
        let smoothed = smoother.smooth(&[100.0, 50.0, 50.0]).unwrap();

        assert_eq!(smoothed[0], 100.0);
        assert!((smoothed[1] - 90.0).abs() < 1e-9); // 0.2 * 50 + 0.8 * 100
        assert!((smoothed[2] - 82.0).abs() < 1e-9); // 0.2 * 50 + 0.8 * 90
    }

    #[test]
    fn test_empty_series() {
        let smoother = ExponentialSmoother::new(0.2);
        assert_eq!(smoother.smooth(&[]), Ok(vec![]));
    }

    #[test]
    fn test_validate_alpha() {
        assert!(validate_alpha(0.2).is_ok());
        assert!(validate_alpha(1.0).is_ok());
        assert!(validate_alpha(0.0).is_err());
        assert!(validate_alpha(1.5).is_err());
        assert!(validate_alpha(f64::NAN).is_err());
    }
}

//! Numeric helpers shared by the session pipeline.

pub mod safe_cast;

use safe_cast::usize_to_f64;

/// Arithmetic mean of the finite values, `None` if there are none
#[must_use]
pub fn finite_mean(values: &[f64]) -> Option<f64> {
    let (sum, count) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    (count > 0).then(|| sum / usize_to_f64(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_mean() {
        assert_eq!(finite_mean(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
        assert_eq!(finite_mean(&[f64::NAN, 10.0, f64::INFINITY, 20.0]), Some(15.0));
    }

    #[test]
    fn test_finite_mean_empty() {
        assert_eq!(finite_mean(&[]), None);
        assert_eq!(finite_mean(&[f64::NAN]), None);
    }
}

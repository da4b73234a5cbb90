//! Validation for operation arguments.

use crate::error::{ChronaError, Result};

/// Validates a sweep window: finite and non-negative.
///
/// # Examples
///
/// ```
/// use chrona::compute::validation::validate_window;
///
/// assert!(validate_window(0.0).is_ok());
/// assert!(validate_window(5.0).is_ok());
/// assert!(validate_window(-1.0).is_err());
/// assert!(validate_window(f64::NAN).is_err());
/// ```
pub fn validate_window(window: f64) -> Result<()> {
    if !window.is_finite() {
        log::warn!("Rejecting sweep window that is not finite: {}", window);
        return Err(ChronaError::InvalidInput(format!(
            "Window must be finite, got: {}",
            window
        )));
    }

    if window < 0.0 {
        return Err(ChronaError::InvalidInput(format!(
            "Window must be non-negative, got: {}",
            window
        )));
    }

    Ok(())
}

/// Validates a size filter range: finite, non-negative, `min <= max`.
pub fn validate_size_range(min: f64, max: Option<f64>) -> Result<()> {
    if !min.is_finite() || min < 0.0 {
        return Err(ChronaError::InvalidInput(format!(
            "Minimum size must be finite and non-negative, got: {}",
            min
        )));
    }

    if let Some(max) = max {
        if max.is_nan() {
            return Err(ChronaError::InvalidInput(
                "Maximum size must not be NaN".to_string(),
            ));
        }
        if max < min {
            return Err(ChronaError::InvalidInput(format!(
                "Size range is inverted: min {} > max {}",
                min, max
            )));
        }
    }

    Ok(())
}

/// Validates a dilation amount: finite (negative amounts are legal and
/// shrink; inversion is caught when the new bounds are constructed).
pub fn validate_dilation(amount: f64) -> Result<()> {
    if !amount.is_finite() {
        log::warn!("Rejecting dilation amount that is not finite: {}", amount);
        return Err(ChronaError::InvalidInput(format!(
            "Dilation amount must be finite, got: {}",
            amount
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_bounds() {
        assert!(validate_window(0.0).is_ok());
        assert!(validate_window(1e9).is_ok());
        assert!(validate_window(-0.001).is_err());
        assert!(validate_window(f64::INFINITY).is_err());
    }

    #[test]
    fn test_size_range() {
        assert!(validate_size_range(0.0, None).is_ok());
        assert!(validate_size_range(10.0, Some(10.0)).is_ok());
        assert!(validate_size_range(10.0, Some(5.0)).is_err());
        assert!(validate_size_range(-1.0, None).is_err());
        assert!(validate_size_range(0.0, Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_dilation() {
        assert!(validate_dilation(-5.0).is_ok());
        assert!(validate_dilation(f64::NAN).is_err());
    }
}

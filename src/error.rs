use thiserror::Error;

pub type Result<T> = std::result::Result<T, InvalidInputError>;

/// The only failure the engine reports. Raised before any downstream stage runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid input: {reason}")]
pub struct InvalidInputError {
    pub reason: String,
}

impl InvalidInputError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

pub(crate) fn invalid(reason: impl Into<String>) -> InvalidInputError {
    InvalidInputError::new(reason)
}

/// Rejects NaN/inf and anything below zero.
pub(crate) fn ensure_non_negative(value: f64, what: &str) -> Result<f64> {
    if !value.is_finite() {
        return Err(invalid(format!("{what} must be a finite number, got {value}")));
    }
    if value < 0.0 {
        return Err(invalid(format!("{what} must not be negative, got {value}")));
    }
    Ok(value)
}

/// Divisors and Poisson rates: finite and strictly above zero.
pub(crate) fn ensure_positive(value: f64, what: &str) -> Result<f64> {
    if !value.is_finite() {
        return Err(invalid(format!("{what} must be a finite number, got {value}")));
    }
    if value <= 0.0 {
        return Err(invalid(format!("{what} must be greater than zero, got {value}")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_reason() {
        let err = InvalidInputError::new("games played must be greater than zero");
        assert_eq!(
            err.to_string(),
            "invalid input: games played must be greater than zero"
        );
    }

    #[test]
    fn positive_rejects_zero_and_nan() {
        assert!(ensure_positive(0.0, "baseline").is_err());
        assert!(ensure_positive(f64::NAN, "baseline").is_err());
        assert!(ensure_positive(-1.0, "baseline").is_err());
        assert_eq!(ensure_positive(1.4, "baseline").unwrap(), 1.4);
    }

    #[test]
    fn non_negative_accepts_zero() {
        assert_eq!(ensure_non_negative(0.0, "goals").unwrap(), 0.0);
        assert!(ensure_non_negative(-0.1, "goals").is_err());
        assert!(ensure_non_negative(f64::INFINITY, "goals").is_err());
    }
}

//! Error types for the trajectory engine.
//!
//! Only malformed input and mathematically ill-posed motion are errors.
//! A block that stops partway is a valid outcome and is encoded as a
//! [`BoundaryTime::Never`](crate::BoundaryTime::Never) boundary instead.

use thiserror::Error;

/// Errors returned by [`Trajectory::recompute`](crate::Trajectory::recompute)
/// and [`Trajectory::evaluate`](crate::Trajectory::evaluate).
///
/// # Recovery Strategies
///
/// | Error Variant | Recovery Strategy |
/// |--------------|-------------------|
/// | [`InvalidInput`](Error::InvalidInput) | Fix the offending field and recompute |
/// | [`DegenerateMotion`](Error::DegenerateMotion) | Use a non-zero gravity or incline |
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A physical input, scenario constant, or query time is out of range.
    #[error("invalid input: {field} = {value} ({reason})")]
    InvalidInput {
        /// Name of the rejected field.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Which constraint the value violates.
        reason: &'static str,
    },

    /// The closed-form solution does not exist for this configuration.
    #[error("degenerate motion: {0}")]
    DegenerateMotion(String),
}

impl Error {
    pub(crate) const fn invalid(field: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidInput {
            field,
            value,
            reason,
        }
    }
}

/// Result alias for trajectory operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Rejects NaN and infinities.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::invalid(field, value, "must be finite"))
    }
}

/// Requires a finite, strictly positive value.
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<f64> {
    let value = ensure_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(Error::invalid(field, value, "must be greater than zero"))
    }
}

/// Requires a finite, non-negative value.
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<f64> {
    let value = ensure_finite(field, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::invalid(field, value, "must not be negative"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let e = Error::invalid("block_mass", -1.0, "must be greater than zero");
        let msg = e.to_string();
        assert!(msg.contains("invalid input"));
        assert!(msg.contains("block_mass"));
        assert!(msg.contains("-1"));
    }

    #[test]
    fn test_degenerate_display() {
        let e = Error::DegenerateMotion("no landing".to_string());
        assert_eq!(e.to_string(), "degenerate motion: no landing");
    }

    #[test]
    fn test_ensure_positive() {
        assert_eq!(ensure_positive("k", 2.0), Ok(2.0));
        assert!(ensure_positive("k", 0.0).is_err());
        assert!(ensure_positive("k", f64::NAN).is_err());
    }

    #[test]
    fn test_ensure_non_negative() {
        assert_eq!(ensure_non_negative("mu", 0.0), Ok(0.0));
        assert!(ensure_non_negative("mu", -0.1).is_err());
        assert!(ensure_non_negative("mu", f64::INFINITY).is_err());
    }
}

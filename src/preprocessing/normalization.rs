//! Numeric normalization utilities
//!
//! Every score the engine emits lives in [0, 1]. These helpers are applied at
//! each point where an intermediate value could leave that range or turn into
//! NaN, so degenerate values are absorbed instead of propagated.
//!
//! # Example
//!
//! ```
//! use mindguard::preprocessing::normalization::clamp_unit;
//!
//! assert_eq!(clamp_unit(1.7), 1.0);
//! assert_eq!(clamp_unit(-0.2), 0.0);
//! assert_eq!(clamp_unit(f32::NAN), 0.0);
//! ```

use crate::error::AnalysisError;

/// Numerical stability epsilon for divisions
pub const EPSILON: f32 = 1e-10;

/// Clamp a value to [0, 1], mapping NaN to 0
///
/// Infinities saturate to the nearest bound.
#[inline]
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Replace any non-finite value with 0
#[inline]
pub fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Risk-style clamp: non-finite values (including +inf) count as zero risk
///
/// Used where a malformed score must not be mistaken for maximum risk.
#[inline]
pub fn sanitize_risk(value: f32) -> f32 {
    clamp_unit(finite_or_zero(value))
}

/// Scale values in place so they sum to 1
///
/// # Errors
///
/// Returns `AnalysisError::NumericalError`, leaving the slice untouched, if the
/// sum is not a positive finite number.
pub fn normalize_sum(values: &mut [f32]) -> Result<(), AnalysisError> {
    let total: f32 = values.iter().sum();
    if !total.is_finite() || total <= EPSILON {
        return Err(AnalysisError::NumericalError(format!(
            "cannot normalize {} values with total {}",
            values.len(),
            total
        )));
    }

    for value in values.iter_mut() {
        *value /= total;
    }
    Ok(())
}

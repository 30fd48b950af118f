//! Common validation utilities
//!
//! Pure functions shared by the reading validator.

use crate::{
    errors::{ValidationError, ValidationResult},
    reading::Quantity,
    traits::Validatable,
};

/// Reject NaN and infinities
pub fn check_finite(quantity: Quantity, value: f64) -> ValidationResult<()> {
    if value.is_valid() {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue { quantity })
    }
}

/// Check if a value is within the specified inclusive range
pub fn check_range(quantity: Quantity, value: f64, min: f64, max: f64) -> ValidationResult<()> {
    if value < min || value > max {
        Err(ValidationError::OutOfRange {
            quantity,
            value,
            min,
            max,
        })
    } else {
        Ok(())
    }
}

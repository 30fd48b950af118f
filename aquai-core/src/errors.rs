//! Error Types for Water-Quality Reading Validation
//!
//! ## Design Philosophy
//!
//! Readings arrive from three places (the simulator, manual entry and sensor
//! hardware) and every one of them is validated before any scorer sees it.
//! The scorers are plain arithmetic, so a NaN that slips through would be
//! carried silently into the severity score, the classification and the
//! disease probabilities. Validation therefore fails fast and names the
//! offending quantity.
//!
//! Errors are small and `Copy`: each variant carries the quantity and the
//! numbers involved, never an owned string.
//!
//! ## Error Categories
//!
//! ### Physical Violations
//! - `OutOfRange`: value outside what the quantity can physically be
//!   (negative coliform counts, pH of 15)
//! - `InvalidValue`: NaN or infinity
//!
//! ### Cross-Quantity Violations
//! - `CrossValidationFailed`: quantities disagree (fecal coliform above total
//!   coliform)
//!
//! ### Caller Errors
//! - `InvalidRange`: a simulator range with `min > max`
//! - `InvalidLocation`: latitude/longitude outside the globe
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use aquai_core::{ValidationError, Validator, WaterReadingValidator, SensorReading};
//!
//! fn accept(reading: &SensorReading, validator: &WaterReadingValidator) -> bool {
//!     match validator.validate(reading) {
//!         Ok(()) => true,
//!         Err(ValidationError::InvalidValue { quantity }) => {
//!             // Sensor produced garbage for one channel
//!             let _ = quantity;
//!             false
//!         }
//!         Err(_) => false,
//!     }
//! }
//! ```

use thiserror::Error;

use crate::reading::Quantity;

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation errors for a single reading
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ValidationError {
    /// Value outside physical limits
    #[error("{quantity} value {value} outside range [{min}, {max}]")]
    OutOfRange {
        /// Quantity that failed validation
        quantity: Quantity,
        /// The rejected value
        value: f64,
        /// Minimum acceptable value
        min: f64,
        /// Maximum acceptable value
        max: f64,
    },

    /// Value makes no numeric sense (NaN, infinity)
    #[error("{quantity} is not a finite number")]
    InvalidValue {
        /// Quantity holding the non-finite value
        quantity: Quantity,
    },

    /// Two quantities contradict each other
    #[error("Cross-validation failed: {reason}")]
    CrossValidationFailed {
        /// Human-readable description of the contradiction
        reason: &'static str,
    },

    /// A range was given with its bounds swapped
    #[error("Invalid range: min {min} is greater than max {max}")]
    InvalidRange {
        /// Lower bound as given
        min: f64,
        /// Upper bound as given
        max: f64,
    },

    /// Coordinates outside [-90, 90] x [-180, 180]
    #[error("Invalid location: lat {lat}, lng {lng}")]
    InvalidLocation {
        /// Latitude as given
        lat: f64,
        /// Longitude as given
        lng: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_quantity() {
        let err = ValidationError::OutOfRange {
            quantity: Quantity::Acidity,
            value: 15.0,
            min: 0.0,
            max: 14.0,
        };
        assert_eq!(err.to_string(), "acidity value 15 outside range [0, 14]");

        let err = ValidationError::InvalidValue { quantity: Quantity::FecalColiform };
        assert_eq!(err.to_string(), "fecal_coliform is not a finite number");
    }
}

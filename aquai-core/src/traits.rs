//! Core traits for validators
//!
//! Keep them simple: a validator takes a value by reference and either
//! accepts it or says which constraint it broke.

use crate::errors::ValidationResult;
use crate::reading::Quantity;

/// Core validator trait
pub trait Validator {
    /// The type of value this validator handles
    type Value: ?Sized;

    /// Validate a single value
    fn validate(&self, value: &Self::Value) -> ValidationResult<()>;
}

/// Physical constraints for one quantity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantityConstraints {
    /// Quantity the limits apply to
    pub quantity: Quantity,

    /// Minimum valid value
    pub min_value: f64,

    /// Maximum valid value
    pub max_value: f64,
}

impl QuantityConstraints {
    /// Limits `[min_value, max_value]` for `quantity`
    pub const fn new(quantity: Quantity, min_value: f64, max_value: f64) -> Self {
        Self {
            quantity,
            min_value,
            max_value,
        }
    }
}

/// Trait for values that can be checked for numeric validity
pub trait Validatable {
    /// Check if the value is a usable number (not NaN, infinite, etc)
    fn is_valid(&self) -> bool;
}

impl Validatable for f64 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

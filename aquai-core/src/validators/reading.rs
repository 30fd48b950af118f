//! Whole-reading validator
//!
//! Validates a [`SensorReading`] against:
//! - numeric validity of every quantity
//! - physical range of every quantity
//! - coliform ordering (fecal is a subset of total)
//! - coordinates on the globe

use crate::{
    constants::physics::{
        ACIDITY_MAX_PH, ACIDITY_MIN_PH, MAX_LATITUDE_DEG, MAX_LONGITUDE_DEG,
        NON_NEGATIVE_MIN, UNBOUNDED_MAX, WATER_TEMP_MAX_C, WATER_TEMP_MIN_C,
    },
    errors::{ValidationError, ValidationResult},
    reading::{Location, Quantity, SensorReading},
    traits::{QuantityConstraints, Validatable, Validator},
};

use super::utils;

/// Validator for complete water-quality readings
#[derive(Debug, Clone)]
pub struct WaterReadingValidator {
    /// One entry per quantity
    constraints: Vec<QuantityConstraints>,

    /// Reject readings where fecal coliform exceeds total coliform
    enforce_coliform_order: bool,
}

impl Default for WaterReadingValidator {
    fn default() -> Self {
        let constraints = Quantity::ALL
            .iter()
            .map(|&quantity| match quantity {
                Quantity::Acidity => {
                    QuantityConstraints::new(quantity, ACIDITY_MIN_PH, ACIDITY_MAX_PH)
                }
                Quantity::Temperature => {
                    QuantityConstraints::new(quantity, WATER_TEMP_MIN_C, WATER_TEMP_MAX_C)
                }
                _ => QuantityConstraints::new(quantity, NON_NEGATIVE_MIN, UNBOUNDED_MAX),
            })
            .collect();

        Self {
            constraints,
            enforce_coliform_order: true,
        }
    }
}

impl WaterReadingValidator {
    /// Accept readings whose total coliform is below fecal coliform
    ///
    /// Some laboratories report the two counts from different dilutions, which
    /// can invert them at low counts.
    pub fn allow_coliform_inversion(mut self) -> Self {
        self.enforce_coliform_order = false;
        self
    }

    /// Replace the limits for one quantity
    pub fn with_limits(mut self, quantity: Quantity, min: f64, max: f64) -> ValidationResult<Self> {
        if !min.is_valid() || !max.is_valid() || min > max {
            return Err(ValidationError::InvalidRange { min, max });
        }

        for constraint in self.constraints.iter_mut() {
            if constraint.quantity == quantity {
                constraint.min_value = min;
                constraint.max_value = max;
            }
        }
        Ok(self)
    }

    /// Limits in force for one quantity
    pub fn constraints_for(&self, quantity: Quantity) -> Option<QuantityConstraints> {
        self.constraints
            .iter()
            .find(|constraint| constraint.quantity == quantity)
            .copied()
    }

    fn validate_location(location: &Location) -> ValidationResult<()> {
        let on_globe = location.lat.is_valid()
            && location.lng.is_valid()
            && location.lat.abs() <= MAX_LATITUDE_DEG
            && location.lng.abs() <= MAX_LONGITUDE_DEG;

        if on_globe {
            Ok(())
        } else {
            Err(ValidationError::InvalidLocation {
                lat: location.lat,
                lng: location.lng,
            })
        }
    }
}

impl Validator for WaterReadingValidator {
    type Value = SensorReading;

    fn validate(&self, reading: &SensorReading) -> ValidationResult<()> {
        // Numbers first, so a NaN is reported as such and not as out of range
        for quantity in Quantity::ALL {
            utils::check_finite(quantity, reading.value(quantity))?;
        }

        for constraint in &self.constraints {
            utils::check_range(
                constraint.quantity,
                reading.value(constraint.quantity),
                constraint.min_value,
                constraint.max_value,
            )?;
        }

        if self.enforce_coliform_order && reading.fecal_coliform > reading.total_coliform {
            return Err(ValidationError::CrossValidationFailed {
                reason: "fecal coliform exceeds total coliform",
            });
        }

        Self::validate_location(&reading.location)
    }
}

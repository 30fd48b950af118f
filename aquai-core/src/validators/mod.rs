//! Reading Validators
//!
//! ## Overview
//!
//! Every reading is validated once, before scoring. Validation is layered the
//! same way for every quantity:
//!
//! ### 1. Numeric Validity
//! NaN and infinities are rejected outright; they would otherwise poison
//! every downstream score.
//!
//! ### 2. Range Validation
//! What a water sample can physically measure:
//! - pH within [0, 14]
//! - concentrations, counts and conductivity never negative
//! - temperature within [-5, 100] °C
//!
//! ### 3. Cross-Quantity Validation
//! Fecal coliform is a subset of total coliform, so a sample can never report
//! more fecal than total coliform.
//!
//! ### 4. Location
//! Coordinates must lie on the globe.
//!
//! ## Usage Example
//!
//! ```rust
//! use aquai_core::{SensorReading, Validator, WaterReadingValidator};
//!
//! let validator = WaterReadingValidator::default();
//! let reading = SensorReading::builder().acidity(7.1).build();
//! validator.validate(&reading)?;
//! # Ok::<(), aquai_core::ValidationError>(())
//! ```

mod reading;
mod utils;

pub use reading::WaterReadingValidator;
pub use utils::{check_finite, check_range};

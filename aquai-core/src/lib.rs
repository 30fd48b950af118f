//! Core reading model for AQUAI
//!
//! Describes a water-quality reading, validates it, and produces synthetic
//! reading streams when no station hardware is attached.
//!
//! ```no_run
//! use aquai_core::{
//!     Location, RngSource, ReadingSimulator, SimulatorConfig, SystemTime, Validator,
//!     WaterReadingValidator, WaterSourceCategory,
//! };
//!
//! let mut simulator = ReadingSimulator::new(
//!     SimulatorConfig::default(),
//!     RngSource::from_entropy(),
//!     SystemTime,
//! );
//! let reading = simulator.next_reading(&Location::default(), WaterSourceCategory::River)?;
//! WaterReadingValidator::default().validate(&reading)?;
//! # Ok::<(), aquai_core::ValidationError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod constants;
pub mod errors;
pub mod history;
pub mod random;
pub mod reading;
pub mod simulator;
pub mod time;
pub mod traits;
pub mod validators;

// Public API
pub use errors::{ValidationError, ValidationResult};
pub use history::BoundedHistory;
pub use random::{RandomSource, RngSource, SequenceSource};
pub use reading::{
    Location, Quantity, ReadingBuilder, ReadingOrigin, SensorReading, WaterSourceCategory,
};
pub use simulator::{
    next_rolling_value, reading_id, ManualEntry, ReadingSimulator, RollingState, SimulatorConfig,
};
pub use time::{FixedTime, SystemTime, TimeSource, Timestamp};
pub use traits::{QuantityConstraints, Validatable, Validator};
pub use validators::WaterReadingValidator;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}

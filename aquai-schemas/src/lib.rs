//! Reference Tables and Calibration for AQUAI
//!
//! ## Overview
//!
//! Two presentation-side collaborators of the scoring pipeline live here:
//!
//! - [`SourceLimits`]: the regulatory limits for each
//!   [`aquai_core::WaterSourceCategory`], used to flag a reading against the
//!   norms of its source.
//! - [`calibrate`]: descriptive statistics and advisory weights computed from
//!   uploaded monitoring sheets.
//!
//! Neither feeds back into the scorers at runtime.
//!
//! ## Usage Example
//!
//! ```no_run
//! use aquai_core::{SystemTime, WaterSourceCategory};
//! use aquai_schemas::{calibrate, Dataset, SourceLimits};
//!
//! let dataset = Dataset::from_path("yamuna_2023.csv")?;
//! let stats = calibrate(&dataset, WaterSourceCategory::River, &SystemTime)?;
//! println!("pH weight {:.2} over {} rows", stats.ph_weight, stats.data_points);
//!
//! let limits = SourceLimits::for_category(WaterSourceCategory::River);
//! assert_eq!(limits.bod, 3.0);
//! # Ok::<(), aquai_schemas::CalibrationError>(())
//! ```

#![deny(unsafe_code)]

pub mod calibration;
pub mod limits;

pub use calibration::{
    calibrate, calibrate_files, virtual_path, CalibrationColumn, CalibrationError,
    CalibrationStats, ColumnMatcher, Dataset,
};
pub use limits::{Exceedance, SourceLimits};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}

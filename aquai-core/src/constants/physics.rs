//! Physical Limits for Water-Quality Readings
//!
//! Limits a reading must satisfy before it is scored. These are the bounds of
//! what can be measured in a water sample, not regulatory targets.

// ===== ACIDITY =====

/// Lowest pH on the conventional scale.
pub const ACIDITY_MIN_PH: f64 = 0.0;

/// Highest pH on the conventional scale.
pub const ACIDITY_MAX_PH: f64 = 14.0;

// ===== TEMPERATURE =====

/// Coldest liquid sample accepted (°C).
///
/// Supercooled or saline water can sit a few degrees below zero.
pub const WATER_TEMP_MIN_C: f64 = -5.0;

/// Hottest sample accepted (°C).
///
/// Boiling point at sea level.
pub const WATER_TEMP_MAX_C: f64 = 100.0;

// ===== CONCENTRATIONS AND COUNTS =====

/// Lower bound for every concentration, count and conductivity.
pub const NON_NEGATIVE_MIN: f64 = 0.0;

/// Upper bound used for unbounded quantities.
pub const UNBOUNDED_MAX: f64 = f64::MAX;

// ===== COORDINATES =====

/// Latitude bound in degrees.
pub const MAX_LATITUDE_DEG: f64 = 90.0;

/// Longitude bound in degrees.
pub const MAX_LONGITUDE_DEG: f64 = 180.0;

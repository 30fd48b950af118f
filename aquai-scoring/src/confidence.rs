//! Confidence estimate for a classification
//!
//! Starts at 0.98 and loses 0.10 for a severity above 85 and 0.05 for a pH
//! outside [5, 9.5]. A heuristic trust signal, not a statistical interval.

use aquai_core::SensorReading;

/// Confidence with no penalty applied
pub const BASE_CONFIDENCE: f64 = 0.98;

/// Lowest confidence the estimator can return
pub const MIN_CONFIDENCE: f64 = 0.83;

// Penalties are tallied in hundredths so the bounds come out exact.
const BASE_HUNDREDTHS: u32 = 98;
const HIGH_SEVERITY_PENALTY: u32 = 10;
const EXTREME_ACIDITY_PENALTY: u32 = 5;

const HIGH_SEVERITY_ABOVE: f64 = 85.0;
const ACIDITY_TRUST_BAND: (f64, f64) = (5.0, 9.5);

/// Confidence in [0.83, 0.98]
pub fn confidence(reading: &SensorReading, severity: f64) -> f64 {
    let mut hundredths = BASE_HUNDREDTHS;

    if severity > HIGH_SEVERITY_ABOVE {
        hundredths -= HIGH_SEVERITY_PENALTY;
    }

    let (low, high) = ACIDITY_TRUST_BAND;
    if reading.acidity < low || reading.acidity > high {
        hundredths -= EXTREME_ACIDITY_PENALTY;
    }

    f64::from(hundredths) / 100.0
}

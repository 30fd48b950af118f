//! Severity Scoring
//!
//! Maps a reading to a 0–100 chemical/physical degradation score. Two
//! formulas exist and are kept apart; [`crate::policy`] decides which one a
//! session uses.
//!
//! ## Threshold-Additive
//!
//! Fixed penalties for each indicator outside its target, plus up to 5 points
//! of jitter:
//!
//! | Indicator           | Condition        | Penalty |
//! |---------------------|------------------|---------|
//! | pH                  | outside 6.5–8.5  | 15      |
//! | dissolved oxygen    | below 4 mg/l     | 20      |
//! | BOD                 | above 3 mg/l     | 15      |
//! | BOD                 | above 10 mg/l    | 25      |
//! | fecal coliform      | above 2500 MPN   | 20      |
//! | fecal coliform      | above 10000 MPN  | 30      |
//! | nitrate             | above 10 mg/l    | 10      |
//!
//! ## Continuous-Deviation
//!
//! ```text
//! severity = 12·|pH − 7.2| + 1.8·turbidity + TDS/120 + 2.5·nitrate
//! ```
//!
//! Biological indicators are deliberately absent; they are scored on their
//! own axis by [`crate::bio_hazard`].
//!
//! Both results are clamped to [5, 100]: no reading is ever reported as
//! perfectly clean.

use aquai_core::SensorReading;

/// Lowest severity ever reported
pub const SEVERITY_FLOOR: f64 = 5.0;

/// Highest severity ever reported
pub const SEVERITY_CEILING: f64 = 100.0;

/// Upper bound of the threshold-additive jitter term
pub const MAX_JITTER: f64 = 5.0;

/// Acceptable pH band for the threshold policy
pub const ACIDITY_TARGET: (f64, f64) = (6.5, 8.5);

/// Ideal pH for the continuous policy
pub const ACIDITY_IDEAL: f64 = 7.2;

const ACIDITY_PENALTY: f64 = 15.0;
const LOW_OXYGEN_MG_L: f64 = 4.0;
const LOW_OXYGEN_PENALTY: f64 = 20.0;
const BOD_ELEVATED_MG_L: f64 = 3.0;
const BOD_HIGH_MG_L: f64 = 10.0;
const BOD_ELEVATED_PENALTY: f64 = 15.0;
const BOD_HIGH_PENALTY: f64 = 25.0;
const FECAL_ELEVATED_MPN: f64 = 2_500.0;
const FECAL_HIGH_MPN: f64 = 10_000.0;
const FECAL_ELEVATED_PENALTY: f64 = 20.0;
const FECAL_HIGH_PENALTY: f64 = 30.0;
const NITRATE_LIMIT_MG_L: f64 = 10.0;
const NITRATE_PENALTY: f64 = 10.0;

const ACIDITY_WEIGHT: f64 = 12.0;
const TURBIDITY_WEIGHT: f64 = 1.8;
const TDS_DIVISOR: f64 = 120.0;
const NITRATE_WEIGHT: f64 = 2.5;

/// Clamp a raw score into [5, 100]
pub fn clamp_severity(raw: f64) -> f64 {
    if raw.is_nan() {
        return SEVERITY_CEILING;
    }
    raw.clamp(SEVERITY_FLOOR, SEVERITY_CEILING)
}

/// Sum of threshold penalties, before jitter and clamping
pub fn threshold_penalties(reading: &SensorReading) -> f64 {
    let mut score = 0.0;

    let (low, high) = ACIDITY_TARGET;
    if reading.acidity < low || reading.acidity > high {
        score += ACIDITY_PENALTY;
    }

    if reading.dissolved_oxygen < LOW_OXYGEN_MG_L {
        score += LOW_OXYGEN_PENALTY;
    }

    if reading.bod > BOD_HIGH_MG_L {
        score += BOD_HIGH_PENALTY;
    } else if reading.bod > BOD_ELEVATED_MG_L {
        score += BOD_ELEVATED_PENALTY;
    }

    if reading.fecal_coliform > FECAL_HIGH_MPN {
        score += FECAL_HIGH_PENALTY;
    } else if reading.fecal_coliform > FECAL_ELEVATED_MPN {
        score += FECAL_ELEVATED_PENALTY;
    }

    if reading.nitrate > NITRATE_LIMIT_MG_L {
        score += NITRATE_PENALTY;
    }

    score
}

/// Threshold-additive severity with an explicit jitter in [0, 5]
pub fn threshold_additive_severity(reading: &SensorReading, jitter: f64) -> f64 {
    let jitter = if jitter.is_finite() {
        jitter.clamp(0.0, MAX_JITTER)
    } else {
        0.0
    };
    clamp_severity(threshold_penalties(reading) + jitter)
}

/// Continuous-deviation severity
pub fn continuous_deviation_severity(reading: &SensorReading) -> f64 {
    let raw = ACIDITY_WEIGHT * (reading.acidity - ACIDITY_IDEAL).abs()
        + TURBIDITY_WEIGHT * reading.turbidity
        + reading.tds / TDS_DIVISOR
        + NITRATE_WEIGHT * reading.nitrate;
    clamp_severity(raw)
}

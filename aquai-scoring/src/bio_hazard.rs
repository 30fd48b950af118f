//! Biological hazard score
//!
//! ```text
//! bio = 5.5·BOD + 14·log10(fecal + 1) + 6·max(0, 7.5 − DO)
//! ```
//!
//! clamped to [0, 100]. The log term compresses coliform counts spanning
//! several orders of magnitude; an oxygen deficit below 7.5 mg/l amplifies the
//! score.

use aquai_core::SensorReading;

/// Upper bound of the bio-hazard axis
pub const BIO_HAZARD_CEILING: f64 = 100.0;

const BOD_WEIGHT: f64 = 5.5;
const FECAL_LOG_WEIGHT: f64 = 14.0;
const OXYGEN_DEFICIT_WEIGHT: f64 = 6.0;
const OXYGEN_SATURATION_MG_L: f64 = 7.5;

/// Bio-hazard score in [0, 100]
pub fn bio_hazard_score(reading: &SensorReading) -> f64 {
    let fecal = reading.fecal_coliform.max(0.0);
    let deficit = (OXYGEN_SATURATION_MG_L - reading.dissolved_oxygen).max(0.0);

    let raw = BOD_WEIGHT * reading.bod
        + FECAL_LOG_WEIGHT * (fecal + 1.0).log10()
        + OXYGEN_DEFICIT_WEIGHT * deficit;

    if raw.is_nan() {
        return BIO_HAZARD_CEILING;
    }
    raw.clamp(0.0, BIO_HAZARD_CEILING)
}

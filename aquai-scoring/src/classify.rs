//! Safety classification
//!
//! Memoryless mapping from a severity score, and optionally the raw reading,
//! to a [`SafetyStatus`]. Every classifier is monotonic in severity.

use aquai_core::SensorReading;

use crate::status::SafetyStatus;

/// Severity cut points for one classifier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeverityThresholds {
    /// Severity strictly above this is CRITICAL
    pub critical_above: f64,
    /// Severity strictly above this is at least WARNING
    pub warning_above: f64,
}

impl SeverityThresholds {
    /// Cut points of the threshold-additive dashboard
    pub const THRESHOLD_ADDITIVE: Self = Self {
        critical_above: 75.0,
        warning_above: 30.0,
    };

    /// Cut points of the continuous-deviation dashboard
    pub const CONTINUOUS_DEVIATION: Self = Self {
        critical_above: 75.0,
        warning_above: 35.0,
    };
}

/// Raw-reading triggers that force an elevated tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawOverrides {
    pub critical_fecal_above: f64,
    pub critical_bod_above: f64,
    pub critical_oxygen_below: f64,
    pub warning_fecal_above: f64,
    pub warning_bod_above: f64,
}

impl Default for RawOverrides {
    fn default() -> Self {
        Self {
            critical_fecal_above: 5_000.0,
            critical_bod_above: 15.0,
            critical_oxygen_below: 2.0,
            warning_fecal_above: 1_000.0,
            warning_bod_above: 3.0,
        }
    }
}

impl RawOverrides {
    /// Tier forced by the reading alone, if any
    pub fn forced_tier(&self, reading: &SensorReading) -> Option<SafetyStatus> {
        if reading.fecal_coliform > self.critical_fecal_above
            || reading.bod > self.critical_bod_above
            || reading.dissolved_oxygen < self.critical_oxygen_below
        {
            Some(SafetyStatus::Critical)
        } else if reading.fecal_coliform > self.warning_fecal_above
            || reading.bod > self.warning_bod_above
        {
            Some(SafetyStatus::Warning)
        } else {
            None
        }
    }
}

/// Classify on severity alone
pub fn classify_by_severity(severity: f64, thresholds: &SeverityThresholds) -> SafetyStatus {
    if severity > thresholds.critical_above {
        SafetyStatus::Critical
    } else if severity > thresholds.warning_above {
        SafetyStatus::Warning
    } else {
        SafetyStatus::Safe
    }
}

/// Classify on severity, escalated by raw-reading triggers
///
/// The result is the higher of the severity tier and the forced tier.
pub fn classify_with_overrides(
    severity: f64,
    reading: &SensorReading,
    thresholds: &SeverityThresholds,
    overrides: &RawOverrides,
) -> SafetyStatus {
    let by_severity = classify_by_severity(severity, thresholds);
    match overrides.forced_tier(reading) {
        Some(forced) => by_severity.max(forced),
        None => by_severity,
    }
}

//! Scoring Policies
//!
//! Two dashboards scored readings differently and the formulas are not
//! reconciled here. Each one is a named strategy behind [`ScoringPolicy`]:
//!
//! | Policy                 | Severity                     | Bio-hazard | Classifier                  | History |
//! |------------------------|------------------------------|------------|-----------------------------|---------|
//! | `threshold-additive`   | fixed penalties + jitter     | none       | severity 75/30 + raw tiers  | 30      |
//! | `continuous-deviation` | weighted distance from ideal | yes        | severity 75/35              | 50      |
//!
//! Confidence uses the same estimator under both policies.

use core::fmt;
use core::str::FromStr;

use aquai_core::{RandomSource, SensorReading};
use serde::{Deserialize, Serialize};

use crate::bio_hazard::bio_hazard_score;
use crate::classify::{classify_by_severity, classify_with_overrides, RawOverrides, SeverityThresholds};
use crate::confidence::confidence;
use crate::prediction::LocalScores;
use crate::severity::{continuous_deviation_severity, threshold_additive_severity, MAX_JITTER};
use crate::status::SafetyStatus;
use crate::ScoringError;

/// Selectable policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    #[default]
    ThresholdAdditive,
    ContinuousDeviation,
}

impl PolicyKind {
    pub const fn name(&self) -> &'static str {
        match self {
            PolicyKind::ThresholdAdditive => "threshold-additive",
            PolicyKind::ContinuousDeviation => "continuous-deviation",
        }
    }

    /// History window the dashboard used with this policy
    pub const fn default_history_capacity(&self) -> usize {
        match self {
            PolicyKind::ThresholdAdditive => 30,
            PolicyKind::ContinuousDeviation => 50,
        }
    }

    /// Policy with its stock thresholds
    pub fn build(&self) -> Box<dyn ScoringPolicy> {
        match self {
            PolicyKind::ThresholdAdditive => Box::new(ThresholdAdditive::default()),
            PolicyKind::ContinuousDeviation => Box::new(ContinuousDeviation::default()),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "threshold-additive" | "threshold" => Ok(PolicyKind::ThresholdAdditive),
            "continuous-deviation" | "continuous" => Ok(PolicyKind::ContinuousDeviation),
            _ => Err(ScoringError::UnknownPolicy(s.to_string())),
        }
    }
}

/// One complete way of scoring a reading
pub trait ScoringPolicy: Send + Sync {
    fn kind(&self) -> PolicyKind;

    /// Severity in [5, 100]
    fn severity(&self, reading: &SensorReading, rng: &mut dyn RandomSource) -> f64;

    /// Bio-hazard in [0, 100], or `None` when the policy has no such axis
    fn bio_hazard(&self, reading: &SensorReading) -> Option<f64>;

    fn classify(&self, severity: f64, reading: &SensorReading) -> SafetyStatus;

    fn confidence(&self, reading: &SensorReading, severity: f64) -> f64 {
        confidence(reading, severity)
    }

    /// Run every local scorer in order
    fn score(
        &self,
        reading: &SensorReading,
        reliability_index: f64,
        rng: &mut dyn RandomSource,
    ) -> LocalScores {
        let severity_score = self.severity(reading, rng);
        let bio_hazard_score = self.bio_hazard(reading);
        let status = self.classify(severity_score, reading);
        let confidence = self.confidence(reading, severity_score);

        LocalScores {
            severity_score,
            bio_hazard_score,
            status,
            confidence,
            reliability_index,
        }
    }
}

/// Fixed penalties plus jitter, classified with raw-reading overrides
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdAdditive {
    pub thresholds: SeverityThresholds,
    pub overrides: RawOverrides,
}

impl Default for ThresholdAdditive {
    fn default() -> Self {
        Self {
            thresholds: SeverityThresholds::THRESHOLD_ADDITIVE,
            overrides: RawOverrides::default(),
        }
    }
}

impl ScoringPolicy for ThresholdAdditive {
    fn kind(&self) -> PolicyKind {
        PolicyKind::ThresholdAdditive
    }

    fn severity(&self, reading: &SensorReading, rng: &mut dyn RandomSource) -> f64 {
        let jitter = rng.next_in(0.0, MAX_JITTER);
        threshold_additive_severity(reading, jitter)
    }

    fn bio_hazard(&self, _reading: &SensorReading) -> Option<f64> {
        None
    }

    fn classify(&self, severity: f64, reading: &SensorReading) -> SafetyStatus {
        classify_with_overrides(severity, reading, &self.thresholds, &self.overrides)
    }
}

/// Continuous physical/chemical deviation with a separate bio-hazard axis
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousDeviation {
    pub thresholds: SeverityThresholds,
}

impl Default for ContinuousDeviation {
    fn default() -> Self {
        Self {
            thresholds: SeverityThresholds::CONTINUOUS_DEVIATION,
        }
    }
}

impl ScoringPolicy for ContinuousDeviation {
    fn kind(&self) -> PolicyKind {
        PolicyKind::ContinuousDeviation
    }

    fn severity(&self, reading: &SensorReading, _rng: &mut dyn RandomSource) -> f64 {
        continuous_deviation_severity(reading)
    }

    fn bio_hazard(&self, reading: &SensorReading) -> Option<f64> {
        Some(bio_hazard_score(reading))
    }

    fn classify(&self, severity: f64, _reading: &SensorReading) -> SafetyStatus {
        classify_by_severity(severity, &self.thresholds)
    }
}

//! Disease-Risk Estimation
//!
//! ## Local Estimator
//!
//! Three waterborne diseases, always in this order, each with its own cap:
//!
//! | Disease                | Probability                          | Cap  |
//! |------------------------|--------------------------------------|------|
//! | Cholera Outbreak Risk  | 1.2 · fecal / 10000                  | 0.99 |
//! | Typhoid Fever          | fecal / 15000 + BOD / 50             | 0.95 |
//! | Infectious Hepatitis   | total coliform / 20000               | 0.90 |
//!
//! ## Resolution
//!
//! The narrative service may return its own list. [`resolve_disease_risks`]
//! runs two explicit steps:
//!
//! 1. sanitize the service list: drop entries with a non-finite probability,
//!    clamp the rest to [0, 1], keep at most three;
//! 2. if nothing survives (or the service gave nothing), use the local
//!    estimator.
//!
//! The caller learns which source won through [`RiskSource`].

use aquai_core::SensorReading;
use serde::{Deserialize, Serialize};

/// Most entries a risk list carries
pub const MAX_DISEASE_RISKS: usize = 3;

/// One named disease with its probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseRisk {
    /// Disease name
    pub disease: String,
    /// Probability in [0, 1]
    pub probability: f64,
    /// Short explanation for the field log
    #[serde(default)]
    pub description: String,
}

impl DiseaseRisk {
    pub fn new(disease: impl Into<String>, probability: f64, description: impl Into<String>) -> Self {
        Self {
            disease: disease.into(),
            probability,
            description: description.into(),
        }
    }
}

/// Where a resolved risk list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RiskSource {
    /// Narrative service output
    Service,
    /// Local estimator
    LocalFallback,
}

/// Outcome of [`resolve_disease_risks`]
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRisks {
    pub risks: Vec<DiseaseRisk>,
    pub source: RiskSource,
}

const CHOLERA: &str = "Cholera Outbreak Risk";
const TYPHOID: &str = "Typhoid Fever";
const HEPATITIS: &str = "Infectious Hepatitis";

const CHOLERA_CAP: f64 = 0.99;
const TYPHOID_CAP: f64 = 0.95;
const HEPATITIS_CAP: f64 = 0.90;

const CHOLERA_FECAL_WEIGHT: f64 = 1.2;
const CHOLERA_FECAL_DIVISOR: f64 = 10_000.0;
const TYPHOID_FECAL_DIVISOR: f64 = 15_000.0;
const TYPHOID_BOD_DIVISOR: f64 = 50.0;
const HEPATITIS_TOTAL_DIVISOR: f64 = 20_000.0;

fn capped(raw: f64, cap: f64) -> f64 {
    if raw.is_nan() {
        return cap;
    }
    raw.clamp(0.0, cap)
}

/// Local risk list: exactly three entries, cholera first
pub fn local_disease_risks(reading: &SensorReading) -> Vec<DiseaseRisk> {
    let cholera = capped(
        CHOLERA_FECAL_WEIGHT * reading.fecal_coliform / CHOLERA_FECAL_DIVISOR,
        CHOLERA_CAP,
    );
    let typhoid = capped(
        reading.fecal_coliform / TYPHOID_FECAL_DIVISOR + reading.bod / TYPHOID_BOD_DIVISOR,
        TYPHOID_CAP,
    );
    let hepatitis = capped(reading.total_coliform / HEPATITIS_TOTAL_DIVISOR, HEPATITIS_CAP);

    vec![
        DiseaseRisk::new(
            CHOLERA,
            cholera,
            "Tracks high fecal coliform counts and low dissolved oxygen.",
        ),
        DiseaseRisk::new(
            TYPHOID,
            typhoid,
            "Elevated where domestic waste raises the organic load (high BOD).",
        ),
        DiseaseRisk::new(
            HEPATITIS,
            hepatitis,
            "Follows the overall level of biological contamination.",
        ),
    ]
}

/// Clean up a service-supplied list
pub fn sanitize_disease_risks(risks: Vec<DiseaseRisk>) -> Vec<DiseaseRisk> {
    risks
        .into_iter()
        .filter(|risk| risk.probability.is_finite())
        .map(|mut risk| {
            risk.probability = risk.probability.clamp(0.0, 1.0);
            risk
        })
        .take(MAX_DISEASE_RISKS)
        .collect()
}

/// Service list if it survives sanitizing, local estimate otherwise
pub fn resolve_disease_risks(
    service: Option<Vec<DiseaseRisk>>,
    reading: &SensorReading,
) -> ResolvedRisks {
    let sanitized = service.map(sanitize_disease_risks).unwrap_or_default();

    if sanitized.is_empty() {
        log::info!("disease risks for {} estimated locally", reading.id);
        ResolvedRisks {
            risks: local_disease_risks(reading),
            source: RiskSource::LocalFallback,
        }
    } else {
        ResolvedRisks {
            risks: sanitized,
            source: RiskSource::Service,
        }
    }
}

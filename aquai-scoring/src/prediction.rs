//! Scores and the packaged prediction

use serde::{Deserialize, Serialize};

use crate::disease::{DiseaseRisk, RiskSource};
use crate::status::SafetyStatus;

/// Scores computed locally, before any narrative enrichment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalScores {
    /// Severity in [5, 100]
    pub severity_score: f64,
    /// Bio-hazard in [0, 100] when the policy scores it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio_hazard_score: Option<f64>,
    pub status: SafetyStatus,
    /// Confidence in [0.83, 0.98]
    pub confidence: f64,
    /// Reliability in [0, 100] over the history before this reading
    pub reliability_index: f64,
}

/// Where the narrative text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NarrativeSource {
    /// Narrative service answered
    Service,
    /// Service failed or timed out; fixed text was used
    Fallback,
}

/// Complete result of one pipeline pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub severity_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio_hazard_score: Option<f64>,
    pub status: SafetyStatus,
    pub confidence: f64,
    pub reliability_index: f64,
    /// At most three entries, never empty
    pub disease_risks: Vec<DiseaseRisk>,
    pub ai_summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_cause: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterfactual: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_recommendation: Option<String>,
    /// Name of the scoring policy that produced the scores
    pub model_type: String,
    pub narrative_source: NarrativeSource,
    pub risk_source: RiskSource,
}

impl PredictionResult {
    /// The local scores this result carries
    pub fn scores(&self) -> LocalScores {
        LocalScores {
            severity_score: self.severity_score,
            bio_hazard_score: self.bio_hazard_score,
            status: self.status,
            confidence: self.confidence,
            reliability_index: self.reliability_index,
        }
    }

    /// Whether the narrative service failed for this result
    pub fn is_degraded(&self) -> bool {
        self.narrative_source == NarrativeSource::Fallback
    }
}

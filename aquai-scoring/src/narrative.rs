//! Narrative Service Capability
//!
//! The narrative service turns a reading and its local scores into
//! human-readable text and, optionally, its own disease-risk list. It is an
//! external collaborator: the pipeline calls it through [`NarrativeProvider`]
//! and treats every failure as a cue to use [`FallbackNarrative`].
//!
//! The request and response shapes are fixed and strongly typed; adapters
//! (see `aquai-connectors`) are responsible for mapping them to a wire
//! protocol.

use std::sync::Arc;
use std::time::Duration;

use aquai_core::SensorReading;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::disease::DiseaseRisk;
use crate::prediction::LocalScores;

/// Text used when the service cannot be reached
pub const FALLBACK_SUMMARY: &str =
    "The system detected critical biological contamination. Immediate boil-water advisory recommended.";

/// Narrative service failures; none of them reach the pipeline caller
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NarrativeError {
    #[error("narrative transport error: {0}")]
    Transport(String),

    #[error("narrative service returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed narrative response: {0}")]
    Malformed(String),

    #[error("narrative service timed out after {0:?}")]
    Timeout(Duration),

    #[error("narrative service unavailable: {0}")]
    Unavailable(String),
}

/// What the service is told about one reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeRequest {
    pub reading: SensorReading,
    pub scores: LocalScores,
}

impl NarrativeRequest {
    pub fn new(reading: &SensorReading, scores: LocalScores) -> Self {
        Self {
            reading: reading.clone(),
            scores,
        }
    }
}

/// What the service answers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeResponse {
    pub ai_summary: String,
    #[serde(default)]
    pub disease_risks: Vec<DiseaseRisk>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_cause: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterfactual: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_recommendation: Option<String>,
}

/// Fixed narrative substituted on service failure
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackNarrative {
    pub summary: String,
    pub root_cause: Option<String>,
    pub counterfactual: Option<String>,
    pub policy_recommendation: Option<String>,
}

impl Default for FallbackNarrative {
    fn default() -> Self {
        Self {
            summary: FALLBACK_SUMMARY.to_string(),
            root_cause: None,
            counterfactual: None,
            policy_recommendation: None,
        }
    }
}

impl FallbackNarrative {
    /// Fallback with a custom summary; blank text keeps the default
    pub fn with_summary(summary: impl Into<String>) -> Self {
        let summary = summary.into();
        if summary.trim().is_empty() {
            return Self::default();
        }
        Self {
            summary,
            ..Self::default()
        }
    }
}

/// External text-generation collaborator
#[async_trait]
pub trait NarrativeProvider: Send + Sync {
    /// Produce a narrative for one scored reading
    async fn narrate(&self, request: &NarrativeRequest) -> Result<NarrativeResponse, NarrativeError>;

    /// Short name used in log lines
    fn name(&self) -> &str {
        "narrative"
    }
}

#[async_trait]
impl<P: NarrativeProvider + ?Sized> NarrativeProvider for Arc<P> {
    async fn narrate(&self, request: &NarrativeRequest) -> Result<NarrativeResponse, NarrativeError> {
        (**self).narrate(request).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[async_trait]
impl<P: NarrativeProvider + ?Sized> NarrativeProvider for Box<P> {
    async fn narrate(&self, request: &NarrativeRequest) -> Result<NarrativeResponse, NarrativeError> {
        (**self).narrate(request).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Provider for stations running without a narrative service
///
/// Always fails, so every result carries the fallback narrative and the
/// local disease-risk estimate.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineNarrative;

#[async_trait]
impl NarrativeProvider for OfflineNarrative {
    async fn narrate(&self, _request: &NarrativeRequest) -> Result<NarrativeResponse, NarrativeError> {
        Err(NarrativeError::Unavailable("no narrative service configured".into()))
    }

    fn name(&self) -> &str {
        "offline"
    }
}

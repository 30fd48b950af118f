//! Heuristic Scoring for Water-Quality Readings
//!
//! ## Overview
//!
//! Turns a validated [`aquai_core::SensorReading`] into a
//! [`PredictionResult`]: a severity score, an optional biological hazard
//! score, a safety tier, a confidence estimate, a reliability index over
//! recent history, a disease-risk list, and narrative text.
//!
//! There is no trained model behind these numbers. Every score is a fixed,
//! documented formula; the two formula sets that grew up in separate
//! dashboards are kept apart as [`ThresholdAdditive`] and
//! [`ContinuousDeviation`] and selected through [`PolicyKind`].
//!
//! ## Layout
//!
//! | Module          | Responsibility                                   |
//! |-----------------|--------------------------------------------------|
//! | `severity`      | chemical/physical severity, both formulas        |
//! | `bio_hazard`    | biological contamination axis                    |
//! | `classify`      | severity (and raw tiers) to [`SafetyStatus`]     |
//! | `confidence`    | trust signal on the classification               |
//! | `reliability`   | share of SAFE readings in history                |
//! | `disease`       | local disease-risk estimate and resolution       |
//! | `policy`        | [`ScoringPolicy`] strategies                     |
//! | `narrative`     | [`NarrativeProvider`] capability and fallback    |
//! | `sink`          | [`LogSink`] capability                           |
//! | `pipeline`      | the [`Pipeline`] session tying it together       |
//!
//! ## Failure Model
//!
//! Only an invalid reading fails [`Pipeline::process`]. Narrative service
//! errors and timeouts degrade the text to [`FALLBACK_SUMMARY`] and the risk
//! list to the local estimate; log sink errors are logged and ignored.
//!
//! ```no_run
//! use aquai_core::SensorReading;
//! use aquai_scoring::{OfflineNarrative, Pipeline, PipelineConfig, PolicyKind};
//!
//! # async fn run() -> aquai_scoring::ScoringResult<()> {
//! let mut pipeline = Pipeline::new(
//!     PipelineConfig::new(PolicyKind::ContinuousDeviation),
//!     OfflineNarrative,
//! );
//! let result = pipeline.process(SensorReading::builder().build()).await?;
//! println!("{} ({:.0})", result.status, result.severity_score);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]

pub mod bio_hazard;
pub mod classify;
pub mod confidence;
pub mod disease;
pub mod narrative;
pub mod pipeline;
pub mod policy;
pub mod prediction;
pub mod reliability;
pub mod severity;
pub mod sink;
pub mod status;

use aquai_core::ValidationError;
use thiserror::Error;

pub use bio_hazard::bio_hazard_score;
pub use classify::{classify_by_severity, classify_with_overrides, RawOverrides, SeverityThresholds};
pub use confidence::confidence;
pub use disease::{
    local_disease_risks, resolve_disease_risks, sanitize_disease_risks, DiseaseRisk,
    ResolvedRisks, RiskSource,
};
pub use narrative::{
    FallbackNarrative, NarrativeError, NarrativeProvider, NarrativeRequest, NarrativeResponse,
    OfflineNarrative, FALLBACK_SUMMARY,
};
pub use pipeline::{HistoryEntry, Pipeline, PipelineConfig, PredictionHistory};
pub use policy::{ContinuousDeviation, PolicyKind, ScoringPolicy, ThresholdAdditive};
pub use prediction::{LocalScores, NarrativeSource, PredictionResult};
pub use reliability::{reliability_index, DEFAULT_RELIABILITY};
pub use severity::{continuous_deviation_severity, threshold_additive_severity};
pub use sink::{LogRecord, LogSink, SinkError};
pub use status::SafetyStatus;

/// Scoring errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScoringError {
    #[error("invalid reading: {0}")]
    InvalidReading(#[from] ValidationError),

    #[error("unknown scoring policy: {0}")]
    UnknownPolicy(String),
}

pub type ScoringResult<T> = Result<T, ScoringError>;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

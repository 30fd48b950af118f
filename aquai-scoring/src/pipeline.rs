//! Pipeline Orchestrator
//!
//! ## Sequence
//!
//! ```text
//! reading ──validate──▶ severity ─▶ bio-hazard ─▶ classify ─▶ confidence
//!                                                                │
//!              reliability (history before this reading) ◀───────┘
//!                                │
//!                  narrative service (bounded by a timeout)
//!                     │ ok                       │ error / timeout
//!          merge text + resolve risks     fallback text + local risks
//!                     └──────────┬───────────────┘
//!                       append to history ─▶ optional log sink
//! ```
//!
//! The only suspension points are the narrative call and the optional log
//! sink. Neither can fail `process`: once a reading has passed validation a
//! complete [`PredictionResult`] is always returned.
//!
//! ## Session Ownership
//!
//! A [`Pipeline`] is one dashboard session. It owns the bounded history and
//! the random source outright; `process` takes `&mut self`, so appends are
//! serialized by the borrow checker. Share a pipeline across tasks by wrapping
//! it in a `tokio::sync::Mutex`.

use std::time::Duration;

use aquai_core::{
    BoundedHistory, RandomSource, RngSource, SensorReading, Validator, WaterReadingValidator,
};

use crate::disease::resolve_disease_risks;
use crate::narrative::{FallbackNarrative, NarrativeError, NarrativeProvider, NarrativeRequest, NarrativeResponse};
use crate::policy::{PolicyKind, ScoringPolicy};
use crate::prediction::{LocalScores, NarrativeSource, PredictionResult};
use crate::reliability::reliability_index;
use crate::sink::{LogRecord, LogSink};
use crate::ScoringResult;

/// Default bound on one narrative call
pub const DEFAULT_NARRATIVE_TIMEOUT: Duration = Duration::from_secs(15);

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub policy: PolicyKind,
    pub history_capacity: usize,
    pub narrative_timeout: Duration,
    pub fallback: FallbackNarrative,
    pub validator: WaterReadingValidator,
    /// Forward results to an attached log sink
    pub forward_logs: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(PolicyKind::default())
    }
}

impl PipelineConfig {
    /// Configuration with the policy's stock history window
    pub fn new(policy: PolicyKind) -> Self {
        Self {
            policy,
            history_capacity: policy.default_history_capacity(),
            narrative_timeout: DEFAULT_NARRATIVE_TIMEOUT,
            fallback: FallbackNarrative::default(),
            validator: WaterReadingValidator::default(),
            forward_logs: true,
        }
    }

    /// Set history capacity (zero is raised to one)
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity.max(1);
        self
    }

    pub fn narrative_timeout(mut self, timeout: Duration) -> Self {
        self.narrative_timeout = timeout;
        self
    }

    pub fn narrative_timeout_secs(self, secs: u64) -> Self {
        self.narrative_timeout(Duration::from_secs(secs))
    }

    pub fn fallback(mut self, fallback: FallbackNarrative) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn validator(mut self, validator: WaterReadingValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn forward_logs(mut self, enabled: bool) -> Self {
        self.forward_logs = enabled;
        self
    }
}

/// One scored reading as retained in history
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub reading: SensorReading,
    pub prediction: PredictionResult,
}

/// Bounded, newest-first record of scored readings
pub type PredictionHistory = BoundedHistory<HistoryEntry>;

/// Scoring session
pub struct Pipeline<N> {
    config: PipelineConfig,
    policy: Box<dyn ScoringPolicy>,
    narrator: N,
    rng: Box<dyn RandomSource + Send + Sync>,
    history: PredictionHistory,
    sink: Option<Box<dyn LogSink>>,
}

impl<N: NarrativeProvider> Pipeline<N> {
    /// Session with an entropy-seeded random source and no log sink
    pub fn new(config: PipelineConfig, narrator: N) -> Self {
        Self {
            policy: config.policy.build(),
            history: BoundedHistory::new(config.history_capacity),
            config,
            narrator,
            rng: Box::new(RngSource::from_entropy()),
            sink: None,
        }
    }

    /// Replace the random source used for jitter
    pub fn with_random_source(mut self, rng: impl RandomSource + Send + Sync + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Replace the stock policy for the configured kind
    pub fn with_policy(mut self, policy: impl ScoringPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Attach a log sink
    pub fn with_log_sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn policy(&self) -> &dyn ScoringPolicy {
        self.policy.as_ref()
    }

    pub fn history(&self) -> &PredictionHistory {
        &self.history
    }

    /// Reliability over the current history
    pub fn reliability_index(&self) -> f64 {
        reliability_index(self.history.iter().map(|entry| entry.prediction.status))
    }

    /// Validate and score locally, without touching history
    pub fn score(&mut self, reading: &SensorReading) -> ScoringResult<LocalScores> {
        self.config.validator.validate(reading)?;

        let reliability = self.reliability_index();
        let scores = self.policy.score(reading, reliability, &mut *self.rng);

        log::debug!(
            "{} scored {}: severity {:.1}, status {}",
            self.policy.kind(),
            reading.id,
            scores.severity_score,
            scores.status
        );

        Ok(scores)
    }

    /// Score a reading, enrich it with a narrative and record it
    ///
    /// Fails only when the reading does not validate.
    pub async fn process(&mut self, reading: SensorReading) -> ScoringResult<PredictionResult> {
        let scores = self.score(&reading)?;

        let request = NarrativeRequest::new(&reading, scores);
        let narrative = self.narrate(&request).await;
        let prediction = self.merge(&reading, scores, narrative);

        self.forward(&reading, &prediction).await;

        let evicted = self.history.push(HistoryEntry {
            reading,
            prediction: prediction.clone(),
        });
        if let Some(old) = evicted {
            log::debug!("history full, evicted {}", old.reading.id);
        }

        Ok(prediction)
    }

    async fn narrate(&self, request: &NarrativeRequest) -> Result<NarrativeResponse, NarrativeError> {
        let timeout = self.config.narrative_timeout;
        let outcome = match tokio::time::timeout(timeout, self.narrator.narrate(request)).await {
            Ok(result) => result,
            Err(_) => Err(NarrativeError::Timeout(timeout)),
        };

        if let Err(e) = &outcome {
            log::warn!(
                "{} narrative failed for {}, using fallback: {}",
                self.narrator.name(),
                request.reading.id,
                e
            );
        }
        outcome
    }

    fn merge(
        &self,
        reading: &SensorReading,
        scores: LocalScores,
        narrative: Result<NarrativeResponse, NarrativeError>,
    ) -> PredictionResult {
        let fallback = &self.config.fallback;

        let (summary, root_cause, counterfactual, policy_recommendation, service_risks, source) =
            match narrative {
                Ok(response) => {
                    let summary = if response.ai_summary.trim().is_empty() {
                        fallback.summary.clone()
                    } else {
                        response.ai_summary
                    };
                    (
                        summary,
                        response.root_cause,
                        response.counterfactual,
                        response.policy_recommendation,
                        Some(response.disease_risks),
                        NarrativeSource::Service,
                    )
                }
                Err(_) => (
                    fallback.summary.clone(),
                    fallback.root_cause.clone(),
                    fallback.counterfactual.clone(),
                    fallback.policy_recommendation.clone(),
                    None,
                    NarrativeSource::Fallback,
                ),
            };

        let resolved = resolve_disease_risks(service_risks, reading);

        PredictionResult {
            severity_score: scores.severity_score,
            bio_hazard_score: scores.bio_hazard_score,
            status: scores.status,
            confidence: scores.confidence,
            reliability_index: scores.reliability_index,
            disease_risks: resolved.risks,
            ai_summary: summary,
            root_cause,
            counterfactual,
            policy_recommendation,
            model_type: self.policy.kind().name().to_string(),
            narrative_source: source,
            risk_source: resolved.source,
        }
    }

    async fn forward(&self, reading: &SensorReading, prediction: &PredictionResult) {
        let sink = match (&self.sink, self.config.forward_logs) {
            (Some(sink), true) => sink,
            _ => return,
        };

        let record = match LogRecord::from_prediction(reading, prediction) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("log record for {} not built: {}", reading.id, e);
                return;
            }
        };

        match tokio::time::timeout(self.config.narrative_timeout, sink.append(&record)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => log::warn!("log sink rejected {}: {}", reading.id, e),
            Err(_) => log::warn!("log sink timed out for {}", reading.id),
        }
    }
}

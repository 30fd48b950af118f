//! Orchestrator behavior under narrative-service failure

mod common;

use std::sync::Arc;
use std::time::Duration;

use aquai_core::{SensorReading, SequenceSource};
use aquai_scoring::{
    local_disease_risks, NarrativeSource, Pipeline, PipelineConfig, PolicyKind, RiskSource,
    SafetyStatus, FALLBACK_SUMMARY,
};
use common::*;

fn pipeline<N: aquai_scoring::NarrativeProvider>(kind: PolicyKind, narrator: N) -> Pipeline<N> {
    Pipeline::new(PipelineConfig::new(kind), narrator).with_random_source(SequenceSource::constant(0.5))
}

#[tokio::test]
async fn failing_service_still_yields_scores() {
    let mut pipeline = pipeline(PolicyKind::ContinuousDeviation, FailingNarrative);
    let reading = polluted_reading();

    let result = pipeline.process(reading.clone()).await.unwrap();

    assert!(result.severity_score >= 5.0 && result.severity_score <= 100.0);
    assert!(result.bio_hazard_score.is_some());
    assert!(result.confidence >= 0.83 && result.confidence <= 0.98);
    assert_eq!(result.reliability_index, 94.0);
    assert_eq!(result.ai_summary, FALLBACK_SUMMARY);
    assert!(!result.ai_summary.is_empty());
    assert_eq!(result.narrative_source, NarrativeSource::Fallback);
    assert_eq!(result.risk_source, RiskSource::LocalFallback);
    assert_eq!(result.disease_risks, local_disease_risks(&reading));
    assert_eq!(pipeline.history().len(), 1);
}

#[tokio::test]
async fn empty_risk_list_is_backfilled_locally() {
    let mut pipeline = pipeline(PolicyKind::ThresholdAdditive, EmptyRisksNarrative);
    let reading = polluted_reading();

    let result = pipeline.process(reading.clone()).await.unwrap();

    assert_eq!(result.narrative_source, NarrativeSource::Service);
    assert_eq!(result.ai_summary, "Moderate organic load.");
    assert_eq!(result.risk_source, RiskSource::LocalFallback);
    assert_eq!(result.disease_risks.len(), 3);

    let cholera = (1.2f64 * 15_000.0 / 10_000.0).min(0.99);
    let typhoid = (15_000.0f64 / 15_000.0 + 12.5 / 50.0).min(0.95);
    let hepatitis = (38_000.0f64 / 20_000.0).min(0.90);
    let probabilities: Vec<f64> = result.disease_risks.iter().map(|r| r.probability).collect();
    assert_eq!(probabilities, vec![cholera, typhoid, hepatitis]);
}

#[tokio::test]
async fn timeout_counts_as_failure() {
    let config = PipelineConfig::new(PolicyKind::ContinuousDeviation)
        .narrative_timeout(Duration::from_millis(50));
    let mut pipeline = Pipeline::new(config, SlowNarrative(Duration::from_secs(60)));

    let result = pipeline.process(clean_reading()).await.unwrap();

    assert_eq!(result.narrative_source, NarrativeSource::Fallback);
    assert_eq!(result.ai_summary, FALLBACK_SUMMARY);
    assert_eq!(result.risk_source, RiskSource::LocalFallback);
}

#[tokio::test]
async fn custom_fallback_text() {
    let config = PipelineConfig::new(PolicyKind::ThresholdAdditive)
        .fallback(aquai_scoring::FallbackNarrative::with_summary("Narrative offline."));
    let mut pipeline = Pipeline::new(config, FailingNarrative);

    let result = pipeline.process(clean_reading()).await.unwrap();
    assert_eq!(result.ai_summary, "Narrative offline.");
}

#[tokio::test]
async fn request_carries_local_scores() {
    let narrator = Arc::new(RecordingNarrative::default());
    let mut pipeline = pipeline(PolicyKind::ContinuousDeviation, Arc::clone(&narrator));

    let result = pipeline.process(clean_reading()).await.unwrap();

    let requests = narrator.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].reading.id, "MAN-CLEAN");
    assert_eq!(requests[0].scores, result.scores());
    assert_eq!(result.risk_source, RiskSource::Service);
}

#[tokio::test]
async fn sink_receives_each_result() {
    let sink = Arc::new(MemorySink::default());
    let mut pipeline =
        pipeline(PolicyKind::ThresholdAdditive, FailingNarrative).with_log_sink(Arc::clone(&sink));

    pipeline.process(clean_reading()).await.unwrap();
    pipeline.process(polluted_reading()).await.unwrap();

    let records = sink.records.lock().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].station_id, "MAN-CLEAN");
    assert_eq!(records[1].status, SafetyStatus::Critical);
}

#[tokio::test]
async fn sink_failure_is_ignored() {
    let sink = Arc::new(MemorySink::failing());
    let mut pipeline =
        pipeline(PolicyKind::ThresholdAdditive, FailingNarrative).with_log_sink(Arc::clone(&sink));

    let result = pipeline.process(clean_reading()).await;
    assert!(result.is_ok());
    assert_eq!(sink.calls(), 1);
    assert_eq!(pipeline.history().len(), 1);
}

#[tokio::test]
async fn forwarding_can_be_disabled() {
    let sink = Arc::new(MemorySink::default());
    let config = PipelineConfig::new(PolicyKind::ThresholdAdditive).forward_logs(false);
    let mut pipeline = Pipeline::new(config, FailingNarrative).with_log_sink(Arc::clone(&sink));

    pipeline.process(clean_reading()).await.unwrap();
    assert_eq!(sink.calls(), 0);
}

#[tokio::test]
async fn invalid_reading_fails_fast() {
    let mut pipeline = pipeline(PolicyKind::ThresholdAdditive, FailingNarrative);
    let inverted = SensorReading::builder()
        .fecal_coliform(5_000.0)
        .total_coliform(100.0)
        .build();

    assert!(pipeline.process(inverted).await.is_err());
    assert!(pipeline.history().is_empty());
}

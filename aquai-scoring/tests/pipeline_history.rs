//! History bounds and reliability over a running session

mod common;

use aquai_core::{
    FixedTime, Location, ReadingSimulator, RngSource, SequenceSource, SimulatorConfig,
    WaterSourceCategory,
};
use aquai_scoring::{OfflineNarrative, Pipeline, PipelineConfig, PolicyKind, SafetyStatus};
use common::*;

#[tokio::test]
async fn history_is_capped_at_policy_default() {
    for kind in [PolicyKind::ThresholdAdditive, PolicyKind::ContinuousDeviation] {
        let capacity = kind.default_history_capacity();
        let mut pipeline = Pipeline::new(PipelineConfig::new(kind), OfflineNarrative)
            .with_random_source(RngSource::seeded(1));
        let mut simulator =
            ReadingSimulator::new(SimulatorConfig::default(), RngSource::seeded(2), FixedTime::new(0));
        let location = Location::default();

        let mut ids = Vec::new();
        for _ in 0..capacity + 12 {
            let reading = simulator.next_reading(&location, WaterSourceCategory::River).unwrap();
            ids.push(reading.id.clone());
            pipeline.process(reading).await.unwrap();
        }

        assert_eq!(pipeline.history().len(), capacity);
        let retained: Vec<String> = pipeline.history().iter().map(|e| e.reading.id.clone()).collect();
        let expected: Vec<String> = ids.iter().rev().take(capacity).cloned().collect();
        assert_eq!(retained, expected);
    }
}

#[tokio::test]
async fn reliability_tracks_safe_share() {
    let config = PipelineConfig::new(PolicyKind::ThresholdAdditive).history_capacity(4);
    let mut pipeline =
        Pipeline::new(config, OfflineNarrative).with_random_source(SequenceSource::constant(0.0));

    assert_eq!(pipeline.reliability_index(), 94.0);

    for _ in 0..4 {
        pipeline.process(clean_reading()).await.unwrap();
    }
    assert_eq!(pipeline.reliability_index(), 100.0);

    for _ in 0..4 {
        let result = pipeline.process(polluted_reading()).await.unwrap();
        assert_eq!(result.status, SafetyStatus::Critical);
    }
    assert_eq!(pipeline.reliability_index(), 0.0);

    pipeline.process(clean_reading()).await.unwrap();
    assert_eq!(pipeline.reliability_index(), 25.0);
}

#[tokio::test]
async fn threshold_policy_examples() {
    let mut pipeline = Pipeline::new(PipelineConfig::new(PolicyKind::ThresholdAdditive), OfflineNarrative)
        .with_random_source(RngSource::seeded(77));

    for _ in 0..20 {
        let polluted = pipeline.process(polluted_reading()).await.unwrap();
        assert!(polluted.severity_score >= 90.0);
        assert_eq!(polluted.status, SafetyStatus::Critical);

        let clean = pipeline.process(clean_reading()).await.unwrap();
        assert!(clean.severity_score <= 15.0);
        assert_eq!(clean.status, SafetyStatus::Safe);
    }
}

#[tokio::test]
async fn pipeline_can_be_shared_behind_a_mutex() {
    use std::sync::Arc;
    use tokio::sync::Mutex;

    let pipeline = Arc::new(Mutex::new(
        Pipeline::new(PipelineConfig::new(PolicyKind::ContinuousDeviation), OfflineNarrative)
            .with_random_source(RngSource::seeded(3)),
    ));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let pipeline = Arc::clone(&pipeline);
        handles.push(tokio::spawn(async move {
            pipeline.lock().await.process(clean_reading()).await.map(|r| r.status)
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), SafetyStatus::Safe);
    }
    assert_eq!(pipeline.lock().await.history().len(), 8);
}

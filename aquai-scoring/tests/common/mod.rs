//! Shared fixtures for scoring integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use aquai_core::SensorReading;
use aquai_scoring::{
    DiseaseRisk, LogRecord, LogSink, NarrativeError, NarrativeProvider, NarrativeRequest,
    NarrativeResponse, SinkError,
};
use async_trait::async_trait;
use serde_json::Value;

/// Heavily polluted river sample
pub fn polluted_reading() -> SensorReading {
    SensorReading::builder()
        .id("MAN-POLL1")
        .acidity(8.9)
        .dissolved_oxygen(2.1)
        .bod(12.5)
        .fecal_coliform(15_000.0)
        .total_coliform(38_000.0)
        .nitrate(6.0)
        .build()
}

/// Clean river sample
pub fn clean_reading() -> SensorReading {
    SensorReading::builder()
        .id("MAN-CLEAN")
        .acidity(7.2)
        .dissolved_oxygen(6.5)
        .bod(1.2)
        .fecal_coliform(450.0)
        .total_coliform(1_200.0)
        .build()
}

/// Provider whose every call fails
pub struct FailingNarrative;

#[async_trait]
impl NarrativeProvider for FailingNarrative {
    async fn narrate(&self, _request: &NarrativeRequest) -> Result<NarrativeResponse, NarrativeError> {
        Err(NarrativeError::Transport("connection refused".into()))
    }
}

/// Provider answering with a summary but no risks
pub struct EmptyRisksNarrative;

#[async_trait]
impl NarrativeProvider for EmptyRisksNarrative {
    async fn narrate(&self, _request: &NarrativeRequest) -> Result<NarrativeResponse, NarrativeError> {
        Ok(NarrativeResponse {
            ai_summary: "Moderate organic load.".into(),
            disease_risks: Vec::new(),
            ..NarrativeResponse::default()
        })
    }
}

/// Provider that never answers within a short timeout
pub struct SlowNarrative(pub Duration);

#[async_trait]
impl NarrativeProvider for SlowNarrative {
    async fn narrate(&self, _request: &NarrativeRequest) -> Result<NarrativeResponse, NarrativeError> {
        tokio::time::sleep(self.0).await;
        Ok(NarrativeResponse {
            ai_summary: "too late".into(),
            disease_risks: vec![DiseaseRisk::new("Late", 0.5, "")],
            ..NarrativeResponse::default()
        })
    }
}

/// Provider that records the requests it sees
#[derive(Default)]
pub struct RecordingNarrative {
    pub requests: Mutex<Vec<NarrativeRequest>>,
}

#[async_trait]
impl NarrativeProvider for RecordingNarrative {
    async fn narrate(&self, request: &NarrativeRequest) -> Result<NarrativeResponse, NarrativeError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        Ok(NarrativeResponse {
            ai_summary: "recorded".into(),
            disease_risks: vec![DiseaseRisk::new("Cholera", 0.3, "")],
            ..NarrativeResponse::default()
        })
    }
}

/// Sink keeping records in memory, optionally failing every call
#[derive(Default)]
pub struct MemorySink {
    pub records: Mutex<Vec<LogRecord>>,
    pub calls: AtomicUsize,
    pub fail: bool,
}

impl MemorySink {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LogSink for MemorySink {
    async fn append(&self, record: &LogRecord) -> Result<Value, SinkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SinkError::Rejected {
                status: 500,
                message: "database offline".into(),
            });
        }
        if let Ok(mut records) = self.records.lock() {
            records.push(record.clone());
        }
        Ok(serde_json::to_value(record)?)
    }
}

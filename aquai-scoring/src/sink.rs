//! Append-only log sink capability
//!
//! A scored reading may be forwarded to a field-log endpoint. The pipeline
//! does not depend on the sink: failures are logged and dropped.

use std::sync::Arc;

use aquai_core::{SensorReading, Timestamp};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::prediction::PredictionResult;
use crate::status::SafetyStatus;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to encode log record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("log sink transport error: {0}")]
    Transport(String),

    #[error("log sink rejected record with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("log sink timed out")]
    Timeout,
}

/// One field-log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    /// Reading identifier
    pub station_id: String,
    /// Location display name
    pub location: String,
    pub severity: f64,
    pub status: SafetyStatus,
    /// Milliseconds since the Unix epoch
    pub timestamp: Timestamp,
    /// Reading and prediction payload
    pub data: Value,
}

impl LogRecord {
    /// Record for one pipeline pass
    pub fn from_prediction(reading: &SensorReading, prediction: &PredictionResult) -> Result<Self, SinkError> {
        let data = serde_json::json!({
            "reading": serde_json::to_value(reading)?,
            "prediction": serde_json::to_value(prediction)?,
        });

        Ok(Self {
            station_id: reading.id.clone(),
            location: reading.location.name.clone(),
            severity: prediction.severity_score,
            status: prediction.status,
            timestamp: reading.timestamp,
            data,
        })
    }
}

/// Write-only log endpoint
///
/// Returns the record as persisted by the endpoint, which may add its own
/// fields (identifiers, normalized timestamps).
#[async_trait]
pub trait LogSink: Send + Sync {
    async fn append(&self, record: &LogRecord) -> Result<Value, SinkError>;
}

#[async_trait]
impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    async fn append(&self, record: &LogRecord) -> Result<Value, SinkError> {
        (**self).append(record).await
    }
}

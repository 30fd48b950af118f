//! Outbound Adapters for AQUAI
//!
//! ## Overview
//!
//! The scoring pipeline talks to the outside world through two capability
//! traits defined in `aquai-scoring`: `NarrativeProvider` and `LogSink`. This
//! crate supplies their HTTP implementations, plus a fetcher for remote
//! calibration sheets.
//!
//! | Adapter                   | Endpoint                                         | Retries |
//! |---------------------------|--------------------------------------------------|---------|
//! | [`GeminiNarrativeProvider`] | `POST /v1beta/models/{model}:generateContent`  | none    |
//! | [`HttpLogSink`]           | `POST /api/logs`, `GET /api/health`              | 2       |
//! | [`fetch_dataset`]         | `GET <url>` (CSV body)                           | 2       |
//!
//! The narrative call is never retried: the pipeline applies a single timeout
//! and falls back to fixed text on the first failure.
//!
//! ## Transport
//!
//! All adapters share [`HttpConnector`], a thin wrapper over a blocking
//! `ureq` agent. Each request runs on tokio's blocking pool so it never stalls
//! the executor. Transport errors and 5xx/429 responses are retried with
//! exponential backoff:
//!
//! ```text
//! delay(attempt) = 100 ms × 2^attempt
//! ```
//!
//! Other 4xx responses fail immediately.
//!
//! ## Configuration
//!
//! Settings come from the environment (see [`config`]):
//!
//! | Variable                       | Meaning                          | Default                                      |
//! |--------------------------------|----------------------------------|----------------------------------------------|
//! | `API_KEY`                      | narrative service key            | required                                     |
//! | `AQUAI_NARRATIVE_URL`          | narrative service base URL       | `https://generativelanguage.googleapis.com`  |
//! | `AQUAI_NARRATIVE_MODEL`        | model name                       | `gemini-3-flash-preview`                     |
//! | `AQUAI_NARRATIVE_TIMEOUT_SECS` | narrative timeout                | 15                                           |
//! | `AQUAI_LOG_URL`                | field-log server base URL        | `http://localhost:5000`                      |
//! | `AQUAI_POLICY`                 | scoring policy                   | `threshold-additive`                         |
//! | `AQUAI_LOG_TIMEOUT_SECS`       | field-log timeout                | 10                                           |
//! | `AQUAI_HISTORY_CAPACITY`       | history window                   | policy default (30 or 50)                    |
//!
//! ## Example Usage
//!
//! ```no_run
//! use aquai_connectors::{GeminiNarrativeProvider, HttpLogSink, LogSinkSettings, NarrativeSettings, PipelineSettings};
//! use aquai_core::SensorReading;
//! use aquai_scoring::Pipeline;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let narrator = GeminiNarrativeProvider::new(&NarrativeSettings::from_env()?)?;
//! let sink = HttpLogSink::new(&LogSinkSettings::from_env()?)?;
//!
//! let mut pipeline = Pipeline::new(PipelineSettings::from_env()?.into_config(), narrator)
//!     .with_log_sink(sink);
//! let result = pipeline.process(SensorReading::builder().build()).await?;
//! println!("{}: {}", result.status, result.ai_summary);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]

pub mod config;

#[cfg(feature = "http")]
pub mod dataset;
#[cfg(feature = "http")]
pub mod gemini;
#[cfg(feature = "http")]
pub mod http;
#[cfg(feature = "http")]
pub mod logs;

pub use config::{LogSinkSettings, NarrativeSettings, PipelineSettings};

#[cfg(feature = "http")]
pub use dataset::fetch_dataset;
#[cfg(feature = "http")]
pub use gemini::GeminiNarrativeProvider;
#[cfg(feature = "http")]
pub use http::{AuthMethod, HttpConfig, HttpConnector, HttpError};
#[cfg(feature = "http")]
pub use logs::{HttpLogSink, SinkHealth};

use thiserror::Error;

/// Common connector errors
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("missing setting: {0}")]
    MissingSetting(&'static str),

    #[error("invalid setting {name}: {value}")]
    InvalidSetting { name: &'static str, value: String },

    #[cfg(feature = "http")]
    #[error(transparent)]
    Http(#[from] http::HttpError),

    #[error("dataset error: {0}")]
    Dataset(#[from] aquai_schemas::CalibrationError),
}

/// Adapter that reports transport statistics
pub trait Connector {
    /// Snapshot of the counters so far
    fn stats(&self) -> ConnectionStats;
}

/// Connection statistics common to all connectors
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConnectionStats {
    /// Requests that completed with a 2xx status
    pub messages_sent: u64,
    /// Requests that failed after all retries
    pub messages_failed: u64,
    /// Request body bytes sent
    pub bytes_sent: u64,
    /// Attempts beyond the first
    pub retries: u32,
    /// Last error message
    pub last_error: Option<String>,
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn setting_errors_render() {
        let err = ConnectorError::MissingSetting("API_KEY");
        assert_eq!(err.to_string(), "missing setting: API_KEY");
    }
}

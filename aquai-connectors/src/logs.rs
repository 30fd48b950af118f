//! Field-log HTTP sink
//!
//! Posts each [`LogRecord`] to `POST /api/logs`. The server answers with the
//! stored document, which carries its own id and timestamps, so the sink
//! hands that document back untouched.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use aquai_scoring::{LogRecord, LogSink, SinkError};

use crate::config::LogSinkSettings;
use crate::http::{HttpConfig, HttpConnector, HttpError};
use crate::{ConnectionStats, Connector, ConnectorError};

const LOGS_PATH: &str = "/api/logs";
const HEALTH_PATH: &str = "/api/health";

/// Answer of the health endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkHealth {
    pub status: String,
    /// `connected` or `disconnected`
    #[serde(default)]
    pub database: String,
}

impl SinkHealth {
    pub fn is_ready(&self) -> bool {
        self.status == "ok" && self.database == "connected"
    }
}

pub struct HttpLogSink {
    http: HttpConnector,
}

impl HttpLogSink {
    pub fn new(settings: &LogSinkSettings) -> Result<Self, ConnectorError> {
        let config = HttpConfig::new(settings.base_url.as_str()).timeout(settings.timeout);
        Ok(Self {
            http: HttpConnector::new(config)?,
        })
    }

    /// Query the server and its database
    pub async fn health(&self) -> Result<SinkHealth, ConnectorError> {
        let answer = self.http.get(HEALTH_PATH).await?;
        serde_json::from_value(answer)
            .map_err(|e| ConnectorError::Http(HttpError::Serialization(e.to_string())))
    }
}

impl Connector for HttpLogSink {
    fn stats(&self) -> ConnectionStats {
        self.http.stats()
    }
}

#[async_trait]
impl LogSink for HttpLogSink {
    async fn append(&self, record: &LogRecord) -> Result<Value, SinkError> {
        let body = serde_json::to_value(record)?;
        log::debug!("forwarding {} ({}) to field log", record.station_id, record.status);
        self.http.post(LOGS_PATH, &body).await.map_err(sink_error)
    }
}

fn sink_error(err: HttpError) -> SinkError {
    match err {
        HttpError::ServerError { status, message } => SinkError::Rejected { status, message },
        HttpError::Serialization(message) => SinkError::Transport(format!("unreadable answer: {message}")),
        HttpError::Request(message) | HttpError::Config(message) => SinkError::Transport(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_decoding() {
        let health: SinkHealth =
            serde_json::from_str(r#"{"status":"ok","database":"connected"}"#).unwrap();
        assert!(health.is_ready());

        let health: SinkHealth =
            serde_json::from_str(r#"{"status":"ok","database":"disconnected"}"#).unwrap();
        assert!(!health.is_ready());
    }

    #[test]
    fn rejected_records_keep_status() {
        let err = sink_error(HttpError::ServerError {
            status: 500,
            message: r#"{"error":"validation failed"}"#.into(),
        });
        assert!(matches!(err, SinkError::Rejected { status: 500, .. }));
        assert!(matches!(sink_error(HttpError::Request("refused".into())), SinkError::Transport(_)));
    }

    #[test]
    fn invalid_base_url() {
        let result = HttpLogSink::new(&LogSinkSettings::new("localhost:5000"));
        assert!(matches!(result, Err(ConnectorError::Http(HttpError::Config(_)))));
    }
}

//! HTTP/HTTPS Connector
//!
//! ## Overview
//!
//! JSON-over-HTTP transport shared by the narrative provider, the log sink
//! and the dataset fetcher. Built on a blocking `ureq` agent; every request
//! is moved onto tokio's blocking pool with `spawn_blocking`.
//!
//! ## Retry Policy
//!
//! | Outcome                 | Retried |
//! |-------------------------|---------|
//! | transport error         | yes     |
//! | 5xx or 429              | yes     |
//! | other 4xx               | no      |
//! | 2xx with bad JSON body  | no      |
//!
//! `max_retries` bounds the extra attempts; zero means one attempt only.
//!
//! ## Example Usage
//!
//! ```no_run
//! use aquai_connectors::http::{HttpConfig, HttpConnector};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpConfig::new("http://localhost:5000")
//!     .bearer_token("station-token")
//!     .timeout_secs(10)
//!     .retries(2);
//!
//! let http = HttpConnector::new(config)?;
//! let health = http.get("/api/health").await?;
//! println!("{health}");
//! # Ok(())
//! # }
//! ```

use crate::{ConnectionStats, Connector};
use base64::Engine;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

/// HTTP-specific errors
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(String),

    /// Server returned error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl HttpError {
    /// Status code, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// HTTP configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Base URL, without trailing slash
    pub base_url: String,
    /// Per-attempt timeout
    pub timeout: Duration,
    pub auth: AuthMethod,
    /// Custom headers
    pub headers: HashMap<String, String>,
    /// Extra attempts after the first
    pub max_retries: u32,
    pub user_agent: String,
}

/// Authentication methods
#[derive(Clone, PartialEq)]
pub enum AuthMethod {
    /// No authentication
    None,
    /// Bearer token
    Bearer(String),
    /// Basic authentication
    Basic { username: String, password: String },
    /// API key in header
    ApiKey { header: String, value: String },
}

// Keep credentials out of debug output
impl std::fmt::Debug for AuthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthMethod::None => f.write_str("None"),
            AuthMethod::Bearer(_) => f.write_str("Bearer(***)"),
            AuthMethod::Basic { username, .. } => write!(f, "Basic({username}:***)"),
            AuthMethod::ApiKey { header, .. } => write!(f, "ApiKey({header}: ***)"),
        }
    }
}

impl HttpConfig {
    /// Create new configuration with base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
            auth: AuthMethod::None,
            headers: HashMap::new(),
            max_retries: 2,
            user_agent: format!("AQUAI/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set bearer token authentication
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.auth = AuthMethod::Bearer(token.into());
        self
    }

    /// Set basic authentication
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = AuthMethod::Basic {
            username: username.into(),
            password: password.into(),
        };
        self
    }

    /// Set API key authentication
    pub fn api_key(mut self, header: impl Into<String>, value: impl Into<String>) -> Self {
        self.auth = AuthMethod::ApiKey {
            header: header.into(),
            value: value.into(),
        };
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set request timeout in seconds
    pub fn timeout_secs(self, secs: u64) -> Self {
        self.timeout(Duration::from_secs(secs))
    }

    pub fn retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Add custom header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Headers sent with every request, authentication included
    fn request_headers(&self) -> Vec<(String, String)> {
        let mut headers = Vec::with_capacity(self.headers.len() + 3);

        match &self.auth {
            AuthMethod::None => {}
            AuthMethod::Bearer(token) => {
                headers.push(("Authorization".to_string(), format!("Bearer {token}")));
            }
            AuthMethod::Basic { username, password } => {
                let credentials =
                    base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
                headers.push(("Authorization".to_string(), format!("Basic {credentials}")));
            }
            AuthMethod::ApiKey { header, value } => {
                headers.push((header.clone(), value.clone()));
            }
        }

        for (name, value) in &self.headers {
            headers.push((name.clone(), value.clone()));
        }

        headers.push(("Accept".to_string(), "application/json".to_string()));
        headers
    }
}

/// Outcome of a single attempt
enum Attempt {
    Done(String),
    Status(u16, String),
    Transport(String),
}

/// HTTP connector using lightweight ureq client
pub struct HttpConnector {
    config: HttpConfig,
    agent: ureq::Agent,
    stats: Arc<Mutex<ConnectionStats>>,
}

impl HttpConnector {
    /// Create new HTTP connector
    pub fn new(config: HttpConfig) -> Result<Self, HttpError> {
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(HttpError::Config("Base URL must start with http:// or https://".into()));
        }

        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build();

        Ok(Self {
            config,
            agent,
            stats: Arc::new(Mutex::new(ConnectionStats::default())),
        })
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Full URL for a path relative to the base URL
    pub fn url(&self, path: &str) -> String {
        if path.is_empty() {
            self.config.base_url.clone()
        } else if path.starts_with('/') {
            format!("{}{}", self.config.base_url, path)
        } else {
            format!("{}/{}", self.config.base_url, path)
        }
    }

    /// Send GET request and parse the body as JSON
    pub async fn get(&self, path: &str) -> Result<serde_json::Value, HttpError> {
        let text = self.execute("GET", path, None).await?;
        parse_json(&text)
    }

    /// Send GET request and return the raw body
    pub async fn get_text(&self, path: &str) -> Result<String, HttpError> {
        self.execute("GET", path, None).await
    }

    /// Send POST request with a JSON body
    pub async fn post<T: Serialize + ?Sized>(&self, path: &str, data: &T) -> Result<serde_json::Value, HttpError> {
        let json = serde_json::to_string(data).map_err(|e| HttpError::Serialization(e.to_string()))?;
        let text = self.execute("POST", path, Some(json)).await?;
        parse_json(&text)
    }

    /// Execute request with retry logic
    async fn execute(&self, method: &'static str, path: &str, body: Option<String>) -> Result<String, HttpError> {
        let url = self.url(path);
        let headers = self.config.request_headers();
        let body_len = body.as_ref().map_or(0, |b| b.len() as u64);
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let delay = Duration::from_millis(100 * (1u64 << attempt.min(10)));
                tokio::time::sleep(delay).await;
                self.record(|stats| stats.retries += 1);
            }

            let agent = self.agent.clone();
            let (target, request_headers, payload) = (url.clone(), headers.clone(), body.clone());
            let outcome = tokio::task::spawn_blocking(move || {
                send_once(&agent, method, &target, &request_headers, payload)
            })
            .await
            .map_err(|e| HttpError::Request(format!("request task failed: {e}")))?;

            match outcome {
                Attempt::Done(text) => {
                    self.record(|stats| {
                        stats.messages_sent += 1;
                        stats.bytes_sent += body_len;
                    });
                    return Ok(text);
                }
                Attempt::Status(status, message) if status >= 500 || status == 429 => {
                    log::debug!("{method} {url} returned {status}, attempt {}", attempt + 1);
                    last_error = Some(HttpError::ServerError { status, message });
                }
                Attempt::Status(status, message) => {
                    let err = HttpError::ServerError { status, message };
                    self.fail(&err);
                    return Err(err);
                }
                Attempt::Transport(message) => {
                    log::debug!("{method} {url} failed: {message}, attempt {}", attempt + 1);
                    last_error = Some(HttpError::Request(message));
                }
            }
        }

        let err = last_error.unwrap_or_else(|| HttpError::Request("Unknown error".into()));
        self.fail(&err);
        Err(err)
    }

    fn record(&self, update: impl FnOnce(&mut ConnectionStats)) {
        if let Ok(mut stats) = self.stats.lock() {
            update(&mut stats);
        }
    }

    fn fail(&self, err: &HttpError) {
        self.record(|stats| {
            stats.messages_failed += 1;
            stats.last_error = Some(err.to_string());
        });
    }
}

fn send_once(
    agent: &ureq::Agent,
    method: &str,
    url: &str,
    headers: &[(String, String)],
    body: Option<String>,
) -> Attempt {
    let mut request = agent.request(method, url);
    for (name, value) in headers {
        request = request.set(name, value);
    }

    let response = match body {
        Some(json) => request.set("Content-Type", "application/json").send_string(&json),
        None => request.call(),
    };

    match response {
        Ok(resp) => match resp.into_string() {
            Ok(text) => Attempt::Done(text),
            Err(e) => Attempt::Transport(e.to_string()),
        },
        Err(ureq::Error::Status(code, resp)) => Attempt::Status(code, resp.into_string().unwrap_or_default()),
        Err(ureq::Error::Transport(e)) => Attempt::Transport(e.to_string()),
    }
}

fn parse_json(text: &str) -> Result<serde_json::Value, HttpError> {
    if text.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(text).map_err(|e| HttpError::Serialization(e.to_string()))
}

impl Connector for HttpConnector {
    fn stats(&self) -> ConnectionStats {
        self.stats.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

//! Environment-driven settings
//!
//! Every constructor has a `from_lookup` form taking the variable lookup as a
//! closure, so tests never touch the process environment. Blank values count
//! as unset.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use aquai_scoring::{PipelineConfig, PolicyKind};

use crate::ConnectorError;

pub const API_KEY_VAR: &str = "API_KEY";
pub const NARRATIVE_URL_VAR: &str = "AQUAI_NARRATIVE_URL";
pub const NARRATIVE_MODEL_VAR: &str = "AQUAI_NARRATIVE_MODEL";
pub const NARRATIVE_TIMEOUT_VAR: &str = "AQUAI_NARRATIVE_TIMEOUT_SECS";
pub const LOG_URL_VAR: &str = "AQUAI_LOG_URL";
pub const LOG_TIMEOUT_VAR: &str = "AQUAI_LOG_TIMEOUT_SECS";
pub const POLICY_VAR: &str = "AQUAI_POLICY";
pub const HISTORY_CAPACITY_VAR: &str = "AQUAI_HISTORY_CAPACITY";

pub const DEFAULT_NARRATIVE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_NARRATIVE_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_LOG_URL: &str = "http://localhost:5000";

const DEFAULT_NARRATIVE_TIMEOUT_SECS: u64 = 15;
const DEFAULT_LOG_TIMEOUT_SECS: u64 = 10;

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn non_blank<F: Fn(&str) -> Option<String>>(lookup: &F, name: &str) -> Option<String> {
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parsed<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConnectorError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match non_blank(lookup, name) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConnectorError::InvalidSetting { name, value }),
    }
}

/// Narrative service settings
#[derive(Clone, PartialEq)]
pub struct NarrativeSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl NarrativeSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_NARRATIVE_URL.to_string(),
            model: DEFAULT_NARRATIVE_MODEL.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_NARRATIVE_TIMEOUT_SECS),
        }
    }

    pub fn from_env() -> Result<Self, ConnectorError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, ConnectorError> {
        let api_key = non_blank(&lookup, API_KEY_VAR).ok_or(ConnectorError::MissingSetting(API_KEY_VAR))?;
        let mut settings = Self::new(api_key);

        if let Some(url) = non_blank(&lookup, NARRATIVE_URL_VAR) {
            settings.base_url = url;
        }
        if let Some(model) = non_blank(&lookup, NARRATIVE_MODEL_VAR) {
            settings.model = model;
        }
        if let Some(secs) = parsed::<u64, _>(&lookup, NARRATIVE_TIMEOUT_VAR)? {
            settings.timeout = Duration::from_secs(secs);
        }

        Ok(settings)
    }
}

impl fmt::Debug for NarrativeSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NarrativeSettings")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"***")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Field-log server settings
#[derive(Debug, Clone, PartialEq)]
pub struct LogSinkSettings {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for LogSinkSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LOG_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_LOG_TIMEOUT_SECS),
        }
    }
}

impl LogSinkSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn from_env() -> Result<Self, ConnectorError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, ConnectorError> {
        let mut settings = Self::default();
        if let Some(url) = non_blank(&lookup, LOG_URL_VAR) {
            settings.base_url = url;
        }
        if let Some(secs) = parsed::<u64, _>(&lookup, LOG_TIMEOUT_VAR)? {
            settings.timeout = Duration::from_secs(secs);
        }
        Ok(settings)
    }
}

/// Pipeline knobs exposed through the environment
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    pub policy: PolicyKind,
    /// `None` keeps the policy's own window
    pub history_capacity: Option<usize>,
    pub narrative_timeout: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            policy: PolicyKind::default(),
            history_capacity: None,
            narrative_timeout: Duration::from_secs(DEFAULT_NARRATIVE_TIMEOUT_SECS),
        }
    }
}

impl PipelineSettings {
    pub fn from_env() -> Result<Self, ConnectorError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, ConnectorError> {
        let mut settings = Self::default();

        if let Some(name) = non_blank(&lookup, POLICY_VAR) {
            settings.policy = name.parse().map_err(|_| ConnectorError::InvalidSetting {
                name: POLICY_VAR,
                value: name.clone(),
            })?;
        }
        settings.history_capacity = parsed(&lookup, HISTORY_CAPACITY_VAR)?;
        if let Some(secs) = parsed::<u64, _>(&lookup, NARRATIVE_TIMEOUT_VAR)? {
            settings.narrative_timeout = Duration::from_secs(secs);
        }

        Ok(settings)
    }

    pub fn into_config(self) -> PipelineConfig {
        let config = PipelineConfig::new(self.policy).narrative_timeout(self.narrative_timeout);
        match self.history_capacity {
            Some(capacity) => config.history_capacity(capacity),
            None => config,
        }
    }
}

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use log::LevelFilter;
use resume_engine::{CollaboratorSettings, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

/// File-backed settings; every field may be omitted.
///
/// ```ron
/// (
///     base_url: "http://analysis.internal:5000",
///     request_timeout_secs: 300,
///     log: Both,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_upload_mb: u64,
    pub log: LogDestination,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let settings = CollaboratorSettings::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: settings.connect_timeout.as_secs(),
            request_timeout_secs: settings.request_timeout.as_secs(),
            max_upload_mb: 10,
            log: LogDestination::default(),
            log_level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(content)?)
    }

    pub fn with_overrides(mut self, base_url: Option<String>, log: Option<LogDestination>) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        if let Some(log) = log {
            self.log = log;
        }
        self
    }

    pub fn collaborator_settings(&self) -> CollaboratorSettings {
        CollaboratorSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }

    /// Unknown level names fall back to `warn`.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Warn)
    }
}

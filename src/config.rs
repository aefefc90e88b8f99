//! Client configuration
//!
//! Loaded from an optional JSON file, then overridden from the environment,
//! then validated. A missing file means all defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_API_URL: &str = "LEADHUB_API_URL";
pub const ENV_ADMIN_EMAIL: &str = "LEADHUB_ADMIN_EMAIL";
pub const ENV_SESSION_FILE: &str = "LEADHUB_SESSION_FILE";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Backend API base URL (default: "http://localhost:5000/api")
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Designated administrator account
    #[serde(default)]
    pub admin_email: Option<String>,

    /// Where the session token and company ID are persisted
    #[serde(default = "default_session_file")]
    pub session_file: PathBuf,

    /// Per-request timeout (default: 15)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_api_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_session_file() -> PathBuf {
    PathBuf::from(".leadhub").join("session.json")
}

fn default_request_timeout_secs() -> u64 {
    15
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            admin_email: None,
            session_file: default_session_file(),
            request_timeout_secs: default_request_timeout_secs(),
            log_format: LogFormat::default(),
        }
    }
}

impl ClientConfig {
    /// Load from `path` (if it exists) and the process environment
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse `path`, falling back to defaults when it does not exist
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Apply environment overrides; empty values are ignored
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = lookup(ENV_API_URL) {
            self.api_base_url = url;
        }
        if let Some(email) = lookup(ENV_ADMIN_EMAIL) {
            self.admin_email = Some(email);
        }
        if let Some(file) = lookup(ENV_SESSION_FILE) {
            self.session_file = PathBuf::from(file);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api_base_url must not be empty".into()));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request_timeout_secs must be > 0".into()));
        }

        if self.session_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("session_file must not be empty".into()));
        }

        if let Some(email) = &self.admin_email {
            if !crate::validation::is_valid_email(email) {
                return Err(ConfigError::Invalid(format!(
                    "admin_email '{}' is not a valid email",
                    email
                )));
            }
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

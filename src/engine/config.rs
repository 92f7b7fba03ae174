//! Engine configuration
//!
//! Loaded from a JSON file or built in code. Every field has a default, so
//! `{}` is a valid configuration.
//!
//! ```json
//! { "hook_timeout_ms": 500, "default_actor": "ingest" }
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::context::DEFAULT_ACTOR;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Io(_) => "HOOKGATE_CONFIG_IO",
            ConfigError::Parse(_) => "HOOKGATE_CONFIG_PARSE",
            ConfigError::Invalid(_) => "HOOKGATE_CONFIG_INVALID",
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Per-hook time limit in milliseconds. `None` waits indefinitely.
    #[serde(default)]
    pub hook_timeout_ms: Option<u64>,

    /// Actor recorded by `Engine::apply`
    #[serde(default = "default_actor")]
    pub default_actor: String,
}

fn default_actor() -> String {
    DEFAULT_ACTOR.to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hook_timeout_ms: None,
            default_actor: default_actor(),
        }
    }
}

impl EngineConfig {
    /// Load and validate configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: EngineConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_hook_timeout(mut self, timeout: Duration) -> Self {
        self.hook_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn with_default_actor(mut self, actor: impl Into<String>) -> Self {
        self.default_actor = actor.into();
        self
    }

    pub fn hook_timeout(&self) -> Option<Duration> {
        self.hook_timeout_ms.map(Duration::from_millis)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.hook_timeout_ms == Some(0) {
            return Err(ConfigError::Invalid("hook_timeout_ms must be > 0".into()));
        }
        if self.default_actor.trim().is_empty() {
            return Err(ConfigError::Invalid("default_actor must not be empty".into()));
        }
        Ok(())
    }
}

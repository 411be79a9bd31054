//! Engine and advisory-service configuration.

use std::time::Duration;

use crate::error::{CoachError, Result};

/// Environment variables the CLI reads advisory settings from.
pub const API_KEY_ENV: &str = "EVOLVE_API_KEY";
pub const MODEL_ENV: &str = "EVOLVE_MODEL";
pub const BASE_URL_ENV: &str = "EVOLVE_BASE_URL";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for the hosted advisory service.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisoryConfig {
    /// Without a key every turn degrades to the apology reply
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl AdvisoryConfig {
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
            self.model = model;
        }
        self
    }

    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim_end_matches('/').to_string();
        }
        self
    }

    /// Checks ranges the service would otherwise reject per request.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(CoachError::Configuration {
                message: format!("temperature {} is outside 0.0..=2.0", self.temperature),
            });
        }
        if self.timeout.is_zero() {
            return Err(CoachError::Configuration {
                message: "timeout must be positive".to_string(),
            });
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(CoachError::Configuration {
                message: format!("base URL '{}' is not http(s)", self.base_url),
            });
        }
        Ok(())
    }
}

/// Behavior switches of the engine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Drop cards that arrive out of phase order
    pub enforce_phase_gate: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enforce_phase_gate: true,
        }
    }
}

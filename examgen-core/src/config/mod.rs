//! Environment-driven configuration for the generation core.

pub mod constants;

use std::time::Duration;

use thiserror::Error;

use constants::{defaults, models};

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "no provider API key configured; set at least one of GOOGLE_API_KEY, OPENAI_API_KEY, DEEPSEEK_API_KEY"
    )]
    NoProviderKey,

    #[error("{var} is not a valid {expected}: {value}")]
    InvalidValue {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Generation-core configuration: provider credentials, model selection, and
/// fan-out tuning. Loaded once at startup and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub deepseek_api_key: Option<String>,
    pub gemini_model: String,
    pub openai_model: String,
    pub deepseek_model: String,
    /// Upper bound on rules in flight against the provider at once.
    pub max_concurrent_rules: usize,
    /// Deadline for a single remote call; a timed-out rule fails alone.
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            google_api_key: None,
            openai_api_key: None,
            deepseek_api_key: None,
            gemini_model: models::GEMINI_DEFAULT.to_string(),
            openai_model: models::OPENAI_DEFAULT.to_string(),
            deepseek_model: models::DEEPSEEK_DEFAULT.to_string(),
            max_concurrent_rules: defaults::MAX_CONCURRENT_RULES,
            request_timeout: Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `GOOGLE_API_KEY`, `OPENAI_API_KEY`, `DEEPSEEK_API_KEY`: provider
    ///   credentials; at least one must be set.
    /// - `EXAMGEN_GEMINI_MODEL`, `EXAMGEN_OPENAI_MODEL`,
    ///   `EXAMGEN_DEEPSEEK_MODEL`: concrete model names (defaulted).
    /// - `EXAMGEN_MAX_CONCURRENT_RULES`: fan-out bound (default 8).
    /// - `EXAMGEN_REQUEST_TIMEOUT_SECS`: per-call deadline (default 60).
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = Self::default();

        let google_api_key = non_empty_var("GOOGLE_API_KEY");
        let openai_api_key = non_empty_var("OPENAI_API_KEY");
        let deepseek_api_key = non_empty_var("DEEPSEEK_API_KEY");

        if google_api_key.is_none() && openai_api_key.is_none() && deepseek_api_key.is_none() {
            return Err(ConfigError::NoProviderKey);
        }

        let max_concurrent_rules = match non_empty_var("EXAMGEN_MAX_CONCURRENT_RULES") {
            Some(raw) => raw.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: "EXAMGEN_MAX_CONCURRENT_RULES",
                expected: "positive integer",
                value: raw,
            })?,
            None => base.max_concurrent_rules,
        };

        let request_timeout = match non_empty_var("EXAMGEN_REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    var: "EXAMGEN_REQUEST_TIMEOUT_SECS",
                    expected: "positive integer",
                    value: raw,
                })?;
                Duration::from_secs(secs)
            }
            None => base.request_timeout,
        };

        Ok(Self {
            google_api_key,
            openai_api_key,
            deepseek_api_key,
            gemini_model: non_empty_var("EXAMGEN_GEMINI_MODEL").unwrap_or(base.gemini_model),
            openai_model: non_empty_var("EXAMGEN_OPENAI_MODEL").unwrap_or(base.openai_model),
            deepseek_model: non_empty_var("EXAMGEN_DEEPSEEK_MODEL").unwrap_or(base.deepseek_model),
            max_concurrent_rules: max_concurrent_rules.max(1),
            request_timeout,
        })
    }

    /// API key and model for the named provider. Unknown names yield empty
    /// settings; the provider factory rejects those before they matter.
    pub fn provider_settings(&self, provider: &str) -> (Option<String>, String) {
        match provider {
            "gemini" => (self.google_api_key.clone(), self.gemini_model.clone()),
            "openai" => (self.openai_api_key.clone(), self.openai_model.clone()),
            "deepseek" => (self.deepseek_api_key.clone(), self.deepseek_model.clone()),
            _ => (None, String::new()),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

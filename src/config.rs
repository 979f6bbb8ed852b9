//! Service configuration from environment variables.
//!
//! Variables (all optional, `.env` supported via dotenvy in the binary):
//! - `PORT` — HTTP listen port (default 3000)
//! - `SCENEFORGE_LLM_URL` — LLM provider base URL (default `http://localhost:11434`)
//! - `SCENEFORGE_MODEL` — model for all three agents (default `llama3.2:3b`)
//! - `SCENEFORGE_TIMEOUT_SECS` — per-call HTTP client timeout (default 60)

use crate::agent::DEFAULT_MODEL;
use crate::error::Result;
use crate::PipelineError;

/// Runtime configuration for the HTTP service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP listen port.
    pub port: u16,
    /// Base URL of the LLM provider.
    pub llm_base_url: String,
    /// Model identifier used by all three agents.
    pub model: String,
    /// Timeout for each generation call, in seconds. This is the only
    /// timeout the service imposes; a hung call blocks its request until
    /// the client gives up.
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            llm_base_url: "http://localhost:11434".to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout_secs: 60,
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| {
                PipelineError::InvalidConfig(format!("PORT must be a number, got '{}'", raw))
            })?,
            Err(_) => defaults.port,
        };

        let request_timeout_secs = match std::env::var("SCENEFORGE_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                PipelineError::InvalidConfig(format!(
                    "SCENEFORGE_TIMEOUT_SECS must be a number, got '{}'",
                    raw
                ))
            })?,
            Err(_) => defaults.request_timeout_secs,
        };

        Ok(Self {
            port,
            llm_base_url: std::env::var("SCENEFORGE_LLM_URL")
                .unwrap_or(defaults.llm_base_url),
            model: std::env::var("SCENEFORGE_MODEL").unwrap_or(defaults.model),
            request_timeout_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.llm_base_url, "http://localhost:11434");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.request_timeout_secs, 60);
    }
}

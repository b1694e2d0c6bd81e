//! CLI configuration
//!
//! Connection settings, polling behaviour and the location of the local
//! result store. Values come from command-line flags or their environment
//! variable fallbacks.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::scheduler::PollerSettings;
use studio_client::StudioClient;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL (e.g., "http://localhost:3000")
    pub api_url: String,

    /// Timeout applied to every HTTP request
    pub request_timeout: Duration,

    /// Time between render status checks
    pub poll_interval: Duration,

    /// Consecutive "not found" answers tolerated before a render is failed
    pub not_found_retries: u32,

    /// JSON file holding the last result of each workflow step
    pub state_file: PathBuf,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(api_url: String) -> Self {
        Self {
            api_url,
            request_timeout: Duration::from_secs(60),
            poll_interval: Duration::from_secs(3),
            not_found_retries: 5,
            state_file: PathBuf::from(".studio/state.json"),
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_url.is_empty() {
            anyhow::bail!("api_url cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        if self.not_found_retries == 0 {
            anyhow::bail!("not_found_retries must be greater than 0");
        }

        Ok(())
    }

    /// Builds a backend client honouring the request timeout
    pub fn client(&self) -> Result<StudioClient> {
        let http = reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(StudioClient::with_client(self.api_url.clone(), http))
    }

    /// Settings for a render job poller
    pub fn poller_settings(&self) -> PollerSettings {
        PollerSettings {
            interval: self.poll_interval,
            not_found_budget: self.not_found_retries,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("http://localhost:3000".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.poll_interval, Duration::from_secs(3));
        assert_eq!(config.not_found_retries, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        // Invalid URL should fail
        config.api_url = "localhost:3000".to_string();
        assert!(config.validate().is_err());

        config.api_url = "https://studio.example.com".to_string();
        assert!(config.validate().is_ok());

        // Zero budget would fail every render on the first miss
        config.not_found_retries = 0;
        assert!(config.validate().is_err());

        config.not_found_retries = 5;
        config.poll_interval = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_poller_settings() {
        let mut config = Config::default();
        config.poll_interval = Duration::from_secs(10);
        config.not_found_retries = 2;

        let settings = config.poller_settings();
        assert_eq!(settings.interval, Duration::from_secs(10));
        assert_eq!(settings.not_found_budget, 2);
    }

    #[test]
    fn test_client_uses_api_url() {
        let config = Config::new("http://localhost:3000/".to_string());
        let client = config.client().unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
    }
}

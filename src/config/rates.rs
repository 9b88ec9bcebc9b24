//! Exchange-rate configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::OpenErApiConfig;
use crate::application::RateRefresherConfig;

/// Exchange-rate provider and refresh configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RatesConfig {
    /// Fetch live rates at all. Defaults are used otherwise.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Provider base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Seconds between refreshes
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
}

impl RatesConfig {
    pub fn provider(&self) -> OpenErApiConfig {
        OpenErApiConfig::default()
            .with_base_url(self.base_url.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }

    pub fn refresher(&self) -> RateRefresherConfig {
        RateRefresherConfig::default()
            .with_refresh_interval(Duration::from_secs(self.refresh_interval_secs))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidUrl("rates"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout("rates"));
        }
        if self.refresh_interval_secs < 60 {
            return Err(ValidationError::RefreshIntervalTooShort);
        }
        Ok(())
    }
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            refresh_interval_secs: default_refresh_interval(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_base_url() -> String {
    "https://open.er-api.com".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_refresh_interval() -> u64 {
    3600
}

//! Exchange rates from the open.er-api.com public endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::domain::currency::Currency;
use crate::ports::{RateError, RateProvider};

/// Configuration for the open.er-api provider.
#[derive(Debug, Clone)]
pub struct OpenErApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for OpenErApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://open.er-api.com".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl OpenErApiConfig {
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct OpenErApiRateProvider {
    config: OpenErApiConfig,
    client: Client,
}

impl OpenErApiRateProvider {
    /// # Errors
    ///
    /// Returns `RateError::Unavailable` if the HTTP client cannot be built.
    pub fn new(config: OpenErApiConfig) -> Result<Self, RateError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RateError::Unavailable(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    fn latest_url(&self, reference: Currency) -> String {
        format!(
            "{}/v6/latest/{}",
            self.config.base_url.trim_end_matches('/'),
            reference.code()
        )
    }
}

#[derive(Debug, Deserialize)]
struct LatestResponse {
    #[serde(default)]
    result: Option<String>,
    rates: Option<HashMap<String, f64>>,
}

impl LatestResponse {
    fn into_rates(self) -> Result<HashMap<String, f64>, RateError> {
        if let Some(result) = self.result.as_deref() {
            if result != "success" {
                return Err(RateError::Unavailable(format!("result was '{}'", result)));
            }
        }
        self.rates
            .filter(|rates| !rates.is_empty())
            .ok_or_else(|| RateError::Malformed("response has no rates".to_string()))
    }
}

#[async_trait]
impl RateProvider for OpenErApiRateProvider {
    async fn fetch_rates(&self, reference: Currency) -> Result<HashMap<String, f64>, RateError> {
        let response = self
            .client
            .get(self.latest_url(reference))
            .send()
            .await
            .map_err(|e| RateError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RateError::Unavailable(format!("Status {}", status)));
        }

        let body: LatestResponse = response
            .json()
            .await
            .map_err(|e| RateError::Malformed(e.to_string()))?;
        body.into_rates()
    }
}

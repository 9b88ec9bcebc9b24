//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SHOPSNAP` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use shopsnap::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("State file at {}", config.storage.path.display());
//! ```

mod checkout;
mod error;
mod logging;
mod rates;
mod search;
mod storage;

pub use checkout::CheckoutConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use rates::RatesConfig;
pub use search::SearchConfig;
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults except the search API key, which
/// [`AppConfig::validate()`] requires.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Generative search (Gemini)
    #[serde(default)]
    pub search: SearchConfig,

    /// Exchange rates (open.er-api.com)
    #[serde(default)]
    pub rates: RatesConfig,

    /// Local key-value file
    #[serde(default)]
    pub storage: StorageConfig,

    /// Simulated settlement delays
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Tracing subscriber
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SHOPSNAP` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SHOPSNAP__SEARCH__GEMINI_API_KEY=...` -> `search.gemini_api_key = ...`
    /// - `SHOPSNAP__RATES__REFRESH_INTERVAL_SECS=600` -> `rates.refresh_interval_secs = 600`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SHOPSNAP")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.search.validate()?;
        self.rates.validate()?;
        self.storage.validate()?;
        self.checkout.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

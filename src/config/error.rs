//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid timeout for {0}")]
    InvalidTimeout(&'static str),

    #[error("Invalid URL for {0}")]
    InvalidUrl(&'static str),

    #[error("Rate refresh interval must be at least 60 seconds")]
    RefreshIntervalTooShort,

    #[error("Settlement delay for {0} exceeds 60 seconds")]
    SettlementDelayTooLong(&'static str),

    #[error("Storage path must not be empty")]
    EmptyStoragePath,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}

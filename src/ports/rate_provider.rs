//! Rate Provider Port - Interface for exchange rate sources.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::currency::Currency;

/// Errors from an exchange rate source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RateError {
    #[error("Rate service unavailable: {0}")]
    Unavailable(String),

    #[error("Rate response malformed: {0}")]
    Malformed(String),
}

/// Port for fetching exchange rates.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches multipliers keyed by ISO code, relative to `reference`.
    ///
    /// Codes outside the supported set are passed through; the caller
    /// ignores them.
    async fn fetch_rates(&self, reference: Currency) -> Result<HashMap<String, f64>, RateError>;
}

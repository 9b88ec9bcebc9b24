//! Fixed Rate Provider for testing and offline runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::domain::currency::Currency;
use crate::ports::{RateError, RateProvider};

/// Returns the same rates, or the same error, on every call.
#[derive(Debug, Clone)]
pub struct FixedRateProvider {
    outcome: Result<HashMap<String, f64>, RateError>,
    calls: Arc<AtomicUsize>,
}

impl FixedRateProvider {
    pub fn with_rates<I, K>(rates: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self {
            outcome: Ok(rates.into_iter().map(|(k, v)| (k.into(), v)).collect()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(RateError::Unavailable(message.into())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateProvider for FixedRateProvider {
    async fn fetch_rates(&self, _reference: Currency) -> Result<HashMap<String, f64>, RateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

//! RateRefresher - Background service keeping the exchange rate table fresh.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `refresh_interval` | 1h | Time between fetches |
//! | `reference` | USD | Currency the multipliers are relative to |
//!
//! The first refresh happens immediately. Readers keep seeing the previous
//! table until a fetch completes; the write lock is only taken to swap the
//! finished table in. A failed fetch leaves the current table in place.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::time;

use crate::domain::currency::{Currency, RateTable};
use crate::ports::RateProvider;

/// Rate table shared between the session and the refresher.
pub type SharedRates = Arc<RwLock<RateTable>>;

/// A shared table holding the default rates.
pub fn default_shared_rates() -> SharedRates {
    Arc::new(RwLock::new(RateTable::defaults()))
}

/// Fetches a fresh table, falling back to the defaults on any failure.
///
/// A partial response is merged over the defaults so every supported
/// currency keeps a multiplier.
pub async fn refresh_rate_table(provider: &dyn RateProvider, reference: Currency) -> RateTable {
    match provider.fetch_rates(reference).await {
        Ok(raw) => {
            let table = RateTable::from_codes(&raw);
            tracing::debug!(
                received = raw.len(),
                supported = table.len(),
                "Exchange rates refreshed"
            );
            table
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to fetch exchange rates, using defaults");
            RateTable::defaults()
        }
    }
}

/// Configuration for the RateRefresher service.
#[derive(Debug, Clone)]
pub struct RateRefresherConfig {
    pub refresh_interval: Duration,
    pub reference: Currency,
}

impl Default for RateRefresherConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(3600),
            reference: Currency::Usd,
        }
    }
}

impl RateRefresherConfig {
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }
}

/// Background service that periodically replaces the shared rate table.
pub struct RateRefresher {
    provider: Arc<dyn RateProvider>,
    rates: SharedRates,
    config: RateRefresherConfig,
}

impl RateRefresher {
    pub fn new(
        provider: Arc<dyn RateProvider>,
        rates: SharedRates,
        config: RateRefresherConfig,
    ) -> Self {
        Self {
            provider,
            rates,
            config,
        }
    }

    /// Run the refresh loop until the shutdown signal is received.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.refresh_interval);
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        tracing::debug!("Rate refresher stopping");
                        return;
                    }
                }

                _ = interval.tick() => {
                    self.refresh_once().await;
                }
            }
        }
    }

    /// Fetch once and swap the result in. Keeps the last good table on failure.
    pub async fn refresh_once(&self) {
        match self.provider.fetch_rates(self.config.reference).await {
            Ok(raw) => {
                let table = RateTable::from_codes(&raw);
                tracing::debug!(
                    received = raw.len(),
                    supported = table.len(),
                    "Exchange rates refreshed"
                );
                *self.rates.write().await = table;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch exchange rates, keeping current table");
            }
        }
    }

    /// Spawn [`run`](Self::run) on the current runtime.
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move { self.run(shutdown).await })
    }
}

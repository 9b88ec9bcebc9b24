//! Simulated settlement timing configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::SettlementTimings;

const MAX_DELAY_MS: u64 = 60_000;

/// Delays of the simulated payment phases, in milliseconds
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default = "default_card_processing")]
    pub card_processing_ms: u64,

    #[serde(default = "default_crypto_step")]
    pub crypto_waiting_ms: u64,

    #[serde(default = "default_crypto_step")]
    pub crypto_confirming_ms: u64,

    /// Hold on the success view before committing
    #[serde(default = "default_crypto_success")]
    pub crypto_success_ms: u64,

    #[serde(default = "default_ozow_waiting")]
    pub ozow_waiting_ms: u64,
}

impl CheckoutConfig {
    pub fn timings(&self) -> SettlementTimings {
        SettlementTimings {
            card_processing: Duration::from_millis(self.card_processing_ms),
            crypto_waiting: Duration::from_millis(self.crypto_waiting_ms),
            crypto_confirming: Duration::from_millis(self.crypto_confirming_ms),
            crypto_success: Duration::from_millis(self.crypto_success_ms),
            ozow_waiting: Duration::from_millis(self.ozow_waiting_ms),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let delays = [
            ("card_processing", self.card_processing_ms),
            ("crypto_waiting", self.crypto_waiting_ms),
            ("crypto_confirming", self.crypto_confirming_ms),
            ("crypto_success", self.crypto_success_ms),
            ("ozow_waiting", self.ozow_waiting_ms),
        ];
        for (name, ms) in delays {
            if ms > MAX_DELAY_MS {
                return Err(ValidationError::SettlementDelayTooLong(name));
            }
        }
        Ok(())
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            card_processing_ms: default_card_processing(),
            crypto_waiting_ms: default_crypto_step(),
            crypto_confirming_ms: default_crypto_step(),
            crypto_success_ms: default_crypto_success(),
            ozow_waiting_ms: default_ozow_waiting(),
        }
    }
}

fn default_card_processing() -> u64 {
    3000
}

fn default_crypto_step() -> u64 {
    1500
}

fn default_crypto_success() -> u64 {
    1000
}

fn default_ozow_waiting() -> u64 {
    3000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_settlement_timings() {
        assert_eq!(CheckoutConfig::default().timings(), SettlementTimings::default());
    }

    #[test]
    fn test_delay_ceiling() {
        let config = CheckoutConfig {
            ozow_waiting_ms: 120_000,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::SettlementDelayTooLong("ozow_waiting"))
        );
    }
}

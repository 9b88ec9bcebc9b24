//! Simulated settlement.
//!
//! Every step succeeds after a fixed delay. An in-flight step can be
//! aborted through a [`SettlementAbortHandle`], which makes it return
//! `SettlementError::Aborted`.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::sleep;

use crate::domain::checkout::{PaymentMethod, PaymentPhase};
use crate::ports::{SettlementError, SettlementGateway, SettlementStep};

/// Delay of each simulated step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlementTimings {
    pub card_processing: Duration,
    pub crypto_waiting: Duration,
    pub crypto_confirming: Duration,
    /// Pause on the success screen before the crypto plan is committed.
    pub crypto_success: Duration,
    pub ozow_waiting: Duration,
}

impl Default for SettlementTimings {
    fn default() -> Self {
        Self {
            card_processing: Duration::from_millis(3000),
            crypto_waiting: Duration::from_millis(1500),
            crypto_confirming: Duration::from_millis(1500),
            crypto_success: Duration::from_millis(1000),
            ozow_waiting: Duration::from_millis(3000),
        }
    }
}

impl SettlementTimings {
    /// Every delay zero.
    pub fn instant() -> Self {
        Self {
            card_processing: Duration::ZERO,
            crypto_waiting: Duration::ZERO,
            crypto_confirming: Duration::ZERO,
            crypto_success: Duration::ZERO,
            ozow_waiting: Duration::ZERO,
        }
    }

    pub fn delay_for(&self, step: SettlementStep) -> Duration {
        match (step.method, step.phase) {
            (PaymentMethod::Card, PaymentPhase::Processing) => self.card_processing,
            (PaymentMethod::Crypto, PaymentPhase::Waiting) => self.crypto_waiting,
            (PaymentMethod::Crypto, PaymentPhase::Confirming) => self.crypto_confirming,
            (PaymentMethod::Ozow, PaymentPhase::Waiting) => self.ozow_waiting,
            _ => Duration::ZERO,
        }
    }

    pub fn success_hold(&self, method: PaymentMethod) -> Duration {
        match method {
            PaymentMethod::Crypto => self.crypto_success,
            _ => Duration::ZERO,
        }
    }
}

/// Aborts whichever step is currently being awaited.
#[derive(Debug, Clone)]
pub struct SettlementAbortHandle {
    notify: Arc<Notify>,
}

impl SettlementAbortHandle {
    pub fn abort(&self) {
        self.notify.notify_waiters();
    }
}

/// Settlement gateway that sleeps through each step.
#[derive(Debug, Clone, Default)]
pub struct SimulatedSettlement {
    timings: SettlementTimings,
    abort: Arc<Notify>,
}

impl SimulatedSettlement {
    pub fn new(timings: SettlementTimings) -> Self {
        Self {
            timings,
            abort: Arc::new(Notify::new()),
        }
    }

    pub fn timings(&self) -> &SettlementTimings {
        &self.timings
    }

    pub fn abort_handle(&self) -> SettlementAbortHandle {
        SettlementAbortHandle {
            notify: Arc::clone(&self.abort),
        }
    }
}

#[async_trait]
impl SettlementGateway for SimulatedSettlement {
    async fn settle(&self, step: SettlementStep) -> Result<(), SettlementError> {
        let delay = self.timings.delay_for(step);
        tracing::debug!(
            method = %step.method,
            phase = ?step.phase,
            delay_ms = delay.as_millis() as u64,
            "Simulating settlement step"
        );

        tokio::select! {
            _ = sleep(delay) => Ok(()),
            _ = self.abort.notified() => {
                tracing::warn!(method = %step.method, phase = ?step.phase, "Settlement step aborted");
                Err(SettlementError::Aborted)
            }
        }
    }

    async fn acknowledge(&self, method: PaymentMethod) {
        sleep(self.timings.success_hold(method)).await;
    }
}

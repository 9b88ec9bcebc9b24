//! Settlement Gateway Port - Interface for the timed steps of a payment.
//!
//! Each in-flight phase of a checkout (card processing, waiting for a
//! transfer, waiting for confirmations) is awaited through this port. A
//! successful return lets the orchestrator advance; an error fails the
//! session back to method selection.
//!
//! Dropping the returned future abandons the step. The session controller
//! fails the payment when that happens.

use async_trait::async_trait;

use crate::domain::checkout::{PaymentMethod, PaymentPhase};

/// One timed step of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlementStep {
    pub method: PaymentMethod,
    pub phase: PaymentPhase,
}

impl SettlementStep {
    pub fn new(method: PaymentMethod, phase: PaymentPhase) -> Self {
        Self { method, phase }
    }
}

/// Errors from a settlement step.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettlementError {
    #[error("Payment declined: {0}")]
    Declined(String),

    #[error("Payment aborted")]
    Aborted,

    #[error("Settlement service unavailable: {0}")]
    Unavailable(String),
}

/// Port for awaiting settlement.
#[async_trait]
pub trait SettlementGateway: Send + Sync {
    /// Completes one in-flight phase.
    async fn settle(&self, step: SettlementStep) -> Result<(), SettlementError>;

    /// Called once a session reaches `Settled`, before the plan is committed.
    async fn acknowledge(&self, _method: PaymentMethod) {}
}

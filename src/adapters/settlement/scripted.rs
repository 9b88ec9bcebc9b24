//! Scripted settlement gateway for testing.
//!
//! Succeeds instantly unless told to fail at a given phase. Records every
//! step it is asked to settle.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::checkout::{PaymentMethod, PaymentPhase};
use crate::ports::{SettlementError, SettlementGateway, SettlementStep};

#[derive(Debug, Clone, Default)]
pub struct ScriptedSettlement {
    fail_at: Option<(PaymentPhase, SettlementError)>,
    steps: Arc<Mutex<Vec<SettlementStep>>>,
    acknowledged: Arc<Mutex<Vec<PaymentMethod>>>,
}

impl ScriptedSettlement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails every step in `phase` with `error`.
    pub fn failing_at(phase: PaymentPhase, error: SettlementError) -> Self {
        Self {
            fail_at: Some((phase, error)),
            ..Self::default()
        }
    }

    pub fn steps(&self) -> Vec<SettlementStep> {
        self.steps.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn acknowledged(&self) -> Vec<PaymentMethod> {
        self.acknowledged.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SettlementGateway for ScriptedSettlement {
    async fn settle(&self, step: SettlementStep) -> Result<(), SettlementError> {
        if let Ok(mut steps) = self.steps.lock() {
            steps.push(step);
        }
        match &self.fail_at {
            Some((phase, error)) if *phase == step.phase => Err(error.clone()),
            _ => Ok(()),
        }
    }

    async fn acknowledge(&self, method: PaymentMethod) {
        if let Ok(mut acknowledged) = self.acknowledged.lock() {
            acknowledged.push(method);
        }
    }
}

//! Checkout orchestrator.
//!
//! Drives one checkout at a time from plan selection to commit. All four
//! payment methods share one skeleton and differ only in payload and in
//! which timed phases they visit (see [`PaymentMethod::phases`]).
//!
//! ```text
//! Idle ── select_plan ──► SelectingMethod ── choose_method ──► InFlow(Collecting)
//!   ▲                        ▲     │                              │
//!   │                        │     └──────── cancel ──────────────┤
//!   │                       fail                                  │ submit / confirm / proceed
//!   │                        │                                    ▼
//!   └──── commit ◄── InFlow(Settled) ◄── advance ── InFlow(Processing | Waiting | Confirming)
//! ```
//!
//! The orchestrator never owns the user's tier. `commit` takes the current
//! tier for the downgrade check and returns a `Committed` event which the
//! caller applies.

use serde::Serialize;
use std::fmt;

use super::{
    CardBrand, CardInput, CheckoutError, CheckoutEvent, MethodPayload, PaymentMethod,
    PaymentPhase, PaymentSession,
};
use crate::domain::catalog::{
    crypto_asset, ozow_banks, tier_definition, CryptoAssetId, SubscriptionTier,
};
use crate::domain::foundation::{StateMachine, Timestamp};

/// Observable checkout state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum CheckoutStage {
    Idle,
    SelectingMethod {
        plan: SubscriptionTier,
    },
    InFlow {
        plan: SubscriptionTier,
        method: PaymentMethod,
        phase: PaymentPhase,
    },
}

impl fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutStage::Idle => write!(f, "idle"),
            CheckoutStage::SelectingMethod { .. } => write!(f, "selecting a method"),
            CheckoutStage::InFlow { method, phase, .. } => {
                write!(f, "in {} flow ({:?})", method, phase)
            }
        }
    }
}

/// Checkout state for one user session.
///
/// # Invariants
///
/// - A payment session only exists while a plan is pending
/// - At most one payment session exists
/// - Errors never change state
#[derive(Debug, Clone, Default)]
pub struct CheckoutOrchestrator {
    pending_plan: Option<SubscriptionTier>,
    session: Option<PaymentSession>,
}

impl CheckoutOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> CheckoutStage {
        match (self.pending_plan, &self.session) {
            (Some(plan), Some(session)) => CheckoutStage::InFlow {
                plan,
                method: session.method(),
                phase: session.phase(),
            },
            (Some(plan), None) => CheckoutStage::SelectingMethod { plan },
            (None, _) => CheckoutStage::Idle,
        }
    }

    pub fn pending_plan(&self) -> Option<SubscriptionTier> {
        self.pending_plan
    }

    pub fn session(&self) -> Option<&PaymentSession> {
        self.session.as_ref()
    }

    /// Returns true while a timed settlement phase is running.
    pub fn is_in_flight(&self) -> bool {
        self.session
            .as_ref()
            .map(|s| s.phase().is_in_flight())
            .unwrap_or(false)
    }

    /// Selects the plan to purchase, discarding any session still collecting.
    ///
    /// Refused while settlement runs and once a payment has settled but not
    /// yet been committed.
    pub fn select_plan(
        &mut self,
        plan: SubscriptionTier,
        current_tier: SubscriptionTier,
    ) -> Result<(), CheckoutError> {
        self.ensure_not_in_flight()?;
        if matches!(&self.session, Some(s) if s.phase() == PaymentPhase::Settled) {
            return Err(CheckoutError::invalid_state(
                self.stage().to_string(),
                "select a plan",
            ));
        }
        if !plan.is_paid() {
            return Err(CheckoutError::PlanNotPayable(plan));
        }
        if plan.rank() <= current_tier.rank() {
            return Err(CheckoutError::Downgrade {
                current: current_tier,
                requested: plan,
            });
        }

        if let Some(discarded) = self.session.take() {
            tracing::debug!(method = %discarded.method(), "Discarded uncommitted payment session");
        }
        self.pending_plan = Some(plan);
        tracing::debug!(plan = %plan, "Plan selected");
        Ok(())
    }

    /// Enters the flow for `method` with a fresh payment session.
    ///
    /// Switching method while collecting discards the previous session.
    pub fn choose_method(
        &mut self,
        method: PaymentMethod,
    ) -> Result<&PaymentSession, CheckoutError> {
        self.ensure_not_in_flight()?;
        let plan = self.pending_plan.ok_or(CheckoutError::NoPendingPlan)?;
        if let Some(existing) = &self.session {
            if existing.phase() != PaymentPhase::Collecting {
                return Err(CheckoutError::invalid_state(
                    self.stage().to_string(),
                    "choose a payment method",
                ));
            }
        }

        let session = PaymentSession::start(method);
        tracing::debug!(
            plan = %plan,
            method = %method,
            reference = session.eft_reference().map(|r| r.as_str()),
            "Payment method chosen"
        );
        Ok(&*self.session.insert(session))
    }

    /// Replaces the card fields and returns the display brand guess.
    pub fn update_card_input(&mut self, input: CardInput) -> Result<CardBrand, CheckoutError> {
        let session = self.collecting_session(PaymentMethod::Card, "update card details")?;
        let brand = input.brand_guess();
        *session.payload_mut() = MethodPayload::Card { input, brand };
        Ok(brand)
    }

    /// Switches the crypto asset and returns the amount due in that asset.
    pub fn select_crypto(&mut self, asset: CryptoAssetId) -> Result<f64, CheckoutError> {
        let plan = self.pending_plan.ok_or(CheckoutError::NoPendingPlan)?;
        let session = self.collecting_session(PaymentMethod::Crypto, "select a crypto asset")?;
        *session.payload_mut() = MethodPayload::Crypto { asset };
        Ok(crypto_asset(asset).quote(tier_definition(plan).price_usd))
    }

    /// Records the Ozow bank. Display only; any listed bank is accepted.
    pub fn select_bank(&mut self, bank: &str) -> Result<(), CheckoutError> {
        let bank = ozow_banks()
            .iter()
            .find(|b| b.eq_ignore_ascii_case(bank.trim()))
            .ok_or_else(|| CheckoutError::UnknownBank(bank.to_string()))?;
        let session = self.collecting_session(PaymentMethod::Ozow, "select a bank")?;
        *session.payload_mut() = MethodPayload::Ozow {
            bank: Some((*bank).to_string()),
        };
        Ok(())
    }

    /// Submits the card form. Every field must be non-blank.
    pub fn submit_card(&mut self) -> Result<PaymentPhase, CheckoutError> {
        let session = self.collecting_session(PaymentMethod::Card, "submit card details")?;
        if let MethodPayload::Card { input, .. } = session.payload() {
            if let Some(field) = input.first_missing_field() {
                return Err(CheckoutError::required_field_missing(field));
            }
        }
        self.begin_settlement(PaymentMethod::Card)
    }

    /// The user reports having sent the crypto transfer.
    pub fn confirm_crypto_transfer(&mut self) -> Result<PaymentPhase, CheckoutError> {
        self.collecting_session(PaymentMethod::Crypto, "confirm the transfer")?;
        self.begin_settlement(PaymentMethod::Crypto)
    }

    /// Hands off to the Ozow redirect.
    pub fn proceed_ozow(&mut self) -> Result<PaymentPhase, CheckoutError> {
        self.collecting_session(PaymentMethod::Ozow, "proceed to Ozow")?;
        self.begin_settlement(PaymentMethod::Ozow)
    }

    /// The user reports a manual EFT as paid. Commits immediately.
    pub fn mark_eft_paid(
        &mut self,
        current_tier: SubscriptionTier,
    ) -> Result<CheckoutEvent, CheckoutError> {
        self.collecting_session(PaymentMethod::ManualEft, "mark the transfer as paid")?;
        self.begin_settlement(PaymentMethod::ManualEft)?;
        self.commit(current_tier)?.ok_or(CheckoutError::NoPendingPlan)
    }

    /// Moves an in-flight session to the next phase of its method.
    pub fn advance(&mut self) -> Result<PaymentPhase, CheckoutError> {
        let stage = self.stage();
        let session = self
            .session
            .as_mut()
            .filter(|s| s.phase().is_in_flight())
            .ok_or_else(|| CheckoutError::invalid_state(stage.to_string(), "advance payment"))?;

        let method = session.method();
        let current = session.phase();
        let next = method
            .next_phase(current)
            .ok_or_else(|| CheckoutError::invalid_state(stage.to_string(), "advance payment"))?;
        let next = current.transition_to(next)?;
        session.set_phase(next);

        tracing::debug!(method = %method, from = ?current, to = ?next, "Payment phase advanced");
        Ok(next)
    }

    /// Applies the settled plan.
    ///
    /// Returns `None` without side effects when nothing is pending, so a
    /// repeated commit is a no-op.
    pub fn commit(
        &mut self,
        current_tier: SubscriptionTier,
    ) -> Result<Option<CheckoutEvent>, CheckoutError> {
        let Some(plan) = self.pending_plan else {
            tracing::debug!("Commit ignored, nothing pending");
            return Ok(None);
        };
        let method = match &self.session {
            Some(session) if session.phase() == PaymentPhase::Settled => session.method(),
            _ => {
                return Err(CheckoutError::invalid_state(
                    self.stage().to_string(),
                    "commit",
                ))
            }
        };
        if plan.rank() <= current_tier.rank() {
            return Err(CheckoutError::Downgrade {
                current: current_tier,
                requested: plan,
            });
        }

        self.pending_plan = None;
        self.session = None;
        tracing::info!(tier = %plan, method = %method, "Checkout committed");
        Ok(Some(CheckoutEvent::Committed {
            tier: plan,
            method,
            occurred_at: Timestamp::now(),
        }))
    }

    /// Abandons checkout. Refused while a settlement phase is running.
    pub fn cancel(&mut self) -> Result<Option<CheckoutEvent>, CheckoutError> {
        self.ensure_not_in_flight()?;
        if let Some(session) = &self.session {
            if session.phase() != PaymentPhase::Collecting {
                return Err(CheckoutError::invalid_state(
                    self.stage().to_string(),
                    "cancel",
                ));
            }
        }
        if self.pending_plan.is_none() {
            return Ok(None);
        }

        let plan = self.pending_plan.take();
        self.session = None;
        tracing::debug!(plan = ?plan, "Checkout cancelled");
        Ok(Some(CheckoutEvent::Cancelled {
            plan,
            occurred_at: Timestamp::now(),
        }))
    }

    /// Fails the in-flight settlement and returns to method selection.
    ///
    /// The plan stays selected so the user can retry with any method.
    pub fn fail(&mut self, reason: impl Into<String>) -> Result<CheckoutEvent, CheckoutError> {
        let stage = self.stage();
        let (plan, session) = match (self.pending_plan, self.session.as_mut()) {
            (Some(plan), Some(session)) if session.phase().is_in_flight() => (plan, session),
            _ => return Err(CheckoutError::invalid_state(stage.to_string(), "fail payment")),
        };

        let failed = session.phase().transition_to(PaymentPhase::Failed)?;
        session.set_phase(failed);
        let method = session.method();
        self.session = None;

        let reason = reason.into();
        tracing::warn!(plan = %plan, method = %method, reason = %reason, "Payment failed");
        Ok(CheckoutEvent::Failed {
            plan,
            method,
            reason,
            occurred_at: Timestamp::now(),
        })
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn ensure_not_in_flight(&self) -> Result<(), CheckoutError> {
        match &self.session {
            Some(session) if session.phase().is_in_flight() => {
                Err(CheckoutError::InFlight(session.method()))
            }
            _ => Ok(()),
        }
    }

    fn collecting_session(
        &mut self,
        method: PaymentMethod,
        attempted: &str,
    ) -> Result<&mut PaymentSession, CheckoutError> {
        self.ensure_not_in_flight()?;
        let stage = self.stage();
        match self.session.as_mut() {
            Some(session)
                if session.method() == method && session.phase() == PaymentPhase::Collecting =>
            {
                Ok(session)
            }
            _ => Err(CheckoutError::invalid_state(stage.to_string(), attempted)),
        }
    }

    fn begin_settlement(&mut self, method: PaymentMethod) -> Result<PaymentPhase, CheckoutError> {
        let session = self.collecting_session(method, "start settlement")?;
        let next = method
            .next_phase(PaymentPhase::Collecting)
            .ok_or_else(|| CheckoutError::invalid_state("collecting", "start settlement"))?;
        let next = session.phase().transition_to(next)?;
        session.set_phase(next);
        tracing::debug!(method = %method, phase = ?next, "Settlement started");
        Ok(next)
    }
}

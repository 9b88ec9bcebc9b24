//! Checkout events.
//!
//! Named in past tense. A `Committed` event is the single success signal of a
//! checkout and is emitted exactly once per committed plan.

use serde::{Deserialize, Serialize};

use super::PaymentMethod;
use crate::domain::catalog::SubscriptionTier;
use crate::domain::foundation::Timestamp;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckoutEvent {
    /// The pending plan was paid for and becomes the session tier.
    Committed {
        tier: SubscriptionTier,
        method: PaymentMethod,
        occurred_at: Timestamp,
    },

    /// The user abandoned checkout before any settlement began.
    Cancelled {
        plan: Option<SubscriptionTier>,
        occurred_at: Timestamp,
    },

    /// A settlement step failed. The plan stays selected.
    Failed {
        plan: SubscriptionTier,
        method: PaymentMethod,
        reason: String,
        occurred_at: Timestamp,
    },
}

impl CheckoutEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            CheckoutEvent::Committed { .. } => "checkout.committed",
            CheckoutEvent::Cancelled { .. } => "checkout.cancelled",
            CheckoutEvent::Failed { .. } => "checkout.failed",
        }
    }

    pub fn occurred_at(&self) -> Timestamp {
        match self {
            CheckoutEvent::Committed { occurred_at, .. }
            | CheckoutEvent::Cancelled { occurred_at, .. }
            | CheckoutEvent::Failed { occurred_at, .. } => *occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn committed_serializes_with_type_tag() {
        let event = CheckoutEvent::Committed {
            tier: SubscriptionTier::Explorer,
            method: PaymentMethod::Card,
            occurred_at: Timestamp::from_unix_millis(0),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "committed");
        assert_eq!(json["tier"], "EXPLORER");
        assert_eq!(event.event_type(), "checkout.committed");
    }
}

//! Checkout-specific error types.

use crate::domain::catalog::SubscriptionTier;
use crate::domain::foundation::ValidationError;

use super::PaymentMethod;

/// Errors raised by the checkout orchestrator.
///
/// Every error leaves the orchestrator state unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// A card field was blank on submit.
    RequiredFieldMissing(String),

    /// The operation needs a selected plan.
    NoPendingPlan,

    /// The tier cannot be purchased.
    PlanNotPayable(SubscriptionTier),

    /// The requested plan does not rank above the current tier.
    Downgrade {
        current: SubscriptionTier,
        requested: SubscriptionTier,
    },

    /// The operation is not valid in the current checkout state.
    InvalidState { current: String, attempted: String },

    /// A timed settlement step is running.
    InFlight(PaymentMethod),

    /// The selected bank is not offered by Ozow.
    UnknownBank(String),

    /// Phase transition rejected by the state machine.
    Validation(ValidationError),
}

impl CheckoutError {
    pub fn required_field_missing(field: impl Into<String>) -> Self {
        CheckoutError::RequiredFieldMissing(field.into())
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        CheckoutError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            CheckoutError::RequiredFieldMissing(field) => {
                format!("Required field '{}' is missing", field)
            }
            CheckoutError::NoPendingPlan => "No plan has been selected".to_string(),
            CheckoutError::PlanNotPayable(tier) => {
                format!("The {} plan cannot be purchased", tier.display_name())
            }
            CheckoutError::Downgrade { current, requested } => format!(
                "Cannot move from {} to {}",
                current.display_name(),
                requested.display_name()
            ),
            CheckoutError::InvalidState { current, attempted } => {
                format!("Cannot {} while checkout is {}", attempted, current)
            }
            CheckoutError::InFlight(method) => {
                format!("{} payment is still being processed", method)
            }
            CheckoutError::UnknownBank(bank) => format!("Bank '{}' is not supported", bank),
            CheckoutError::Validation(err) => err.to_string(),
        }
    }
}

impl std::fmt::Display for CheckoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CheckoutError {}

impl From<ValidationError> for CheckoutError {
    fn from(err: ValidationError) -> Self {
        CheckoutError::Validation(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_names_the_field() {
        let err = CheckoutError::required_field_missing("cvc");
        assert_eq!(err.to_string(), "Required field 'cvc' is missing");
    }

    #[test]
    fn downgrade_message_names_both_tiers() {
        let err = CheckoutError::Downgrade {
            current: SubscriptionTier::Elite,
            requested: SubscriptionTier::Starter,
        };
        assert!(err.message().contains("Elite"));
        assert!(err.message().contains("Starter"));
    }

    #[test]
    fn in_flight_names_the_method() {
        let err = CheckoutError::InFlight(PaymentMethod::Card);
        assert!(err.message().starts_with(&PaymentMethod::Card.to_string()));
    }

    #[test]
    fn rejected_transition_is_invalid_state() {
        let err: CheckoutError =
            ValidationError::invalid_format("state_transition", "Settled -> Waiting").into();
        assert!(matches!(err, CheckoutError::Validation(_)));
        assert!(err.message().contains("Settled -> Waiting"));
    }
}

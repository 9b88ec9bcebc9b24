//! Payment phase state machine.
//!
//! Defines the phases a payment session moves through and the valid
//! transitions between them. Which phases a given method actually visits
//! is defined by [`PaymentMethod::phases`](super::PaymentMethod::phases).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Progress of one payment session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentPhase {
    /// Gathering input from the user. Cancellable.
    Collecting,

    /// Card authorisation in progress.
    Processing,

    /// Waiting on an external party (transfer broadcast, bank redirect).
    Waiting,

    /// Transfer seen, awaiting confirmations.
    Confirming,

    /// Payment settled; the plan can be committed.
    Settled,

    /// Settlement failed. Terminal for this session.
    Failed,
}

impl PaymentPhase {
    /// Returns true while a timed settlement step is running.
    ///
    /// Cancellation is refused in these phases.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            PaymentPhase::Processing | PaymentPhase::Waiting | PaymentPhase::Confirming
        )
    }
}

impl StateMachine for PaymentPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PaymentPhase::*;
        matches!(
            (self, target),
            // From COLLECTING
            (Collecting, Processing)
                | (Collecting, Waiting)
                | (Collecting, Settled) // Manual EFT
            // From PROCESSING
                | (Processing, Settled)
                | (Processing, Failed)
            // From WAITING
                | (Waiting, Confirming)
                | (Waiting, Settled)
                | (Waiting, Failed)
            // From CONFIRMING
                | (Confirming, Settled)
                | (Confirming, Failed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PaymentPhase::*;
        match self {
            Collecting => vec![Processing, Waiting, Settled],
            Processing => vec![Settled, Failed],
            Waiting => vec![Confirming, Settled, Failed],
            Confirming => vec![Settled, Failed],
            Settled => vec![],
            Failed => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [PaymentPhase; 6] = [
        PaymentPhase::Collecting,
        PaymentPhase::Processing,
        PaymentPhase::Waiting,
        PaymentPhase::Confirming,
        PaymentPhase::Settled,
        PaymentPhase::Failed,
    ];

    #[test]
    fn collecting_can_start_processing() {
        let result = PaymentPhase::Collecting.transition_to(PaymentPhase::Processing);
        assert_eq!(result, Ok(PaymentPhase::Processing));
    }

    #[test]
    fn collecting_cannot_fail() {
        assert!(PaymentPhase::Collecting
            .transition_to(PaymentPhase::Failed)
            .is_err());
    }

    #[test]
    fn in_flight_phases_can_fail() {
        for phase in ALL.iter().filter(|p| p.is_in_flight()) {
            assert!(phase.can_transition_to(&PaymentPhase::Failed));
        }
    }

    #[test]
    fn cannot_go_backwards() {
        assert!(!PaymentPhase::Confirming.can_transition_to(&PaymentPhase::Waiting));
        assert!(!PaymentPhase::Processing.can_transition_to(&PaymentPhase::Collecting));
    }

    #[test]
    fn settled_and_failed_are_terminal() {
        assert!(PaymentPhase::Settled.is_terminal());
        assert!(PaymentPhase::Failed.is_terminal());
        assert!(!PaymentPhase::Collecting.is_terminal());
    }

    #[test]
    fn in_flight_only_for_timed_phases() {
        assert!(!PaymentPhase::Collecting.is_in_flight());
        assert!(PaymentPhase::Processing.is_in_flight());
        assert!(PaymentPhase::Waiting.is_in_flight());
        assert!(PaymentPhase::Confirming.is_in_flight());
        assert!(!PaymentPhase::Settled.is_in_flight());
    }

    #[test]
    fn valid_transitions_are_consistent_with_can_transition_to() {
        for phase in ALL {
            for target in phase.valid_transitions() {
                assert!(
                    phase.can_transition_to(&target),
                    "can_transition_to should return true for {:?} -> {:?}",
                    phase,
                    target
                );
            }
        }
    }
}

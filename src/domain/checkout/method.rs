//! Payment methods and their phase sequences.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::PaymentPhase;

/// A checkout payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Crypto,
    Ozow,
    ManualEft,
}

impl PaymentMethod {
    /// The ordered phases this method moves through, ending in `Settled`.
    ///
    /// | Method | Phases |
    /// |--------|--------|
    /// | Card | Collecting → Processing → Settled |
    /// | Crypto | Collecting → Waiting → Confirming → Settled |
    /// | Ozow | Collecting → Waiting → Settled |
    /// | ManualEft | Collecting → Settled |
    pub fn phases(&self) -> &'static [PaymentPhase] {
        use PaymentPhase::*;
        match self {
            PaymentMethod::Card => &[Collecting, Processing, Settled],
            PaymentMethod::Crypto => &[Collecting, Waiting, Confirming, Settled],
            PaymentMethod::Ozow => &[Collecting, Waiting, Settled],
            PaymentMethod::ManualEft => &[Collecting, Settled],
        }
    }

    /// The phase that follows `current` for this method, if any.
    pub fn next_phase(&self, current: PaymentPhase) -> Option<PaymentPhase> {
        let phases = self.phases();
        phases
            .iter()
            .position(|p| *p == current)
            .and_then(|i| phases.get(i + 1))
            .copied()
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Card",
            PaymentMethod::Crypto => "Crypto",
            PaymentMethod::Ozow => "Ozow",
            PaymentMethod::ManualEft => "Manual EFT",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

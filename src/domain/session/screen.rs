//! Navigation screens.

use serde::{Deserialize, Serialize};

use crate::domain::checkout::PaymentMethod;

/// The single screen shown at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Screen {
    #[default]
    Home,
    Results,
    Compare,
    Watchlist,
    Account,
    Upgrade,
    CardPay,
    CryptoPay,
    OzowPay,
    EftPay,
}

impl Screen {
    /// Screen hosting the flow for `method`.
    pub fn for_method(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::Card => Screen::CardPay,
            PaymentMethod::Crypto => Screen::CryptoPay,
            PaymentMethod::Ozow => Screen::OzowPay,
            PaymentMethod::ManualEft => Screen::EftPay,
        }
    }

    pub fn is_checkout(&self) -> bool {
        matches!(
            self,
            Screen::Upgrade | Screen::CardPay | Screen::CryptoPay | Screen::OzowPay | Screen::EftPay
        )
    }
}

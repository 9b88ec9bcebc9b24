//! Card flow input and brand guessing.

use serde::{Deserialize, Serialize};

/// Free-text card fields collected in the card flow.
///
/// No Luhn or expiry check is performed. Submission only requires every
/// field to be non-blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInput {
    pub holder_name: String,
    pub card_number: String,
    pub expiry: String,
    pub cvc: String,
}

impl CardInput {
    pub fn new(
        holder_name: impl Into<String>,
        card_number: impl Into<String>,
        expiry: impl Into<String>,
        cvc: impl Into<String>,
    ) -> Self {
        Self {
            holder_name: holder_name.into(),
            card_number: card_number.into(),
            expiry: expiry.into(),
            cvc: cvc.into(),
        }
    }

    /// Name of the first blank field, in form order.
    pub fn first_missing_field(&self) -> Option<&'static str> {
        [
            ("holder_name", &self.holder_name),
            ("card_number", &self.card_number),
            ("expiry", &self.expiry),
            ("cvc", &self.cvc),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }

    pub fn brand_guess(&self) -> CardBrand {
        CardBrand::guess(&self.card_number)
    }
}

/// Display-only brand derived from the card number prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
    Discover,
    Unknown,
}

impl CardBrand {
    /// Guesses the brand from the digits of `number`, ignoring separators.
    pub fn guess(number: &str) -> Self {
        let digits: String = number.chars().filter(char::is_ascii_digit).collect();
        let mut chars = digits.chars();
        match (chars.next(), chars.next()) {
            (Some('4'), _) => CardBrand::Visa,
            (Some('5'), Some('1'..='5')) => CardBrand::Mastercard,
            (Some('3'), Some('4' | '7')) => CardBrand::Amex,
            (Some('6'), _) => CardBrand::Discover,
            _ => CardBrand::Unknown,
        }
    }
}

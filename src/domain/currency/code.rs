//! Display currencies supported by the price layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Display currency (ISO 4217).
///
/// Prices are generated in USD (the reference currency) and converted to
/// one of these for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Jpy,
    Cad,
    Aud,
    Inr,
    Zar,
    Brl,
}

impl Currency {
    /// Every supported currency, in display order.
    pub const ALL: [Currency; 9] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Cad,
        Currency::Aud,
        Currency::Inr,
        Currency::Zar,
        Currency::Brl,
    ];

    /// Returns the ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
            Currency::Inr => "INR",
            Currency::Zar => "ZAR",
            Currency::Brl => "BRL",
        }
    }

    /// Returns the symbol used when formatting prices.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Jpy => "¥",
            Currency::Cad => "CA$",
            Currency::Aud => "A$",
            Currency::Inr => "₹",
            Currency::Zar => "R",
            Currency::Brl => "R$",
        }
    }

    /// Number of minor-unit digits shown (JPY has none).
    pub fn decimal_places(&self) -> usize {
        match self {
            Currency::Jpy => 0,
            _ => 2,
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Usd
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Currency::ALL
            .iter()
            .copied()
            .find(|c| c.code() == upper)
            .ok_or_else(|| {
                ValidationError::invalid_format("currency", format!("unsupported code '{}'", s))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("zar".parse::<Currency>().unwrap(), Currency::Zar);
        assert_eq!(" EUR ".parse::<Currency>().unwrap(), Currency::Eur);
    }

    #[test]
    fn rejects_unsupported_code() {
        assert!("CHF".parse::<Currency>().is_err());
    }

    #[test]
    fn serializes_as_iso_code() {
        assert_eq!(serde_json::to_string(&Currency::Brl).unwrap(), "\"BRL\"");
        let c: Currency = serde_json::from_str("\"JPY\"").unwrap();
        assert_eq!(c, Currency::Jpy);
    }

    #[test]
    fn yen_has_no_decimals() {
        assert_eq!(Currency::Jpy.decimal_places(), 0);
        assert_eq!(Currency::Usd.decimal_places(), 2);
    }

    #[test]
    fn all_contains_nine_distinct_codes() {
        let mut codes: Vec<_> = Currency::ALL.iter().map(|c| c.code()).collect();
        codes.dedup();
        assert_eq!(codes.len(), 9);
    }
}

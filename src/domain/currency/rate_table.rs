//! Exchange-rate table and conversion.
//!
//! A `RateTable` maps each display currency to a multiplier from the
//! reference currency (USD). The table is never empty: it starts from
//! hardcoded defaults and live responses are merged over them.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::Currency;

/// Multipliers from the reference currency to each display currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    rates: BTreeMap<Currency, f64>,
}

impl RateTable {
    /// Hardcoded fallback rates.
    pub fn defaults() -> Self {
        let rates = [
            (Currency::Usd, 1.0),
            (Currency::Eur, 0.92),
            (Currency::Gbp, 0.79),
            (Currency::Jpy, 150.2),
            (Currency::Cad, 1.35),
            (Currency::Aud, 1.52),
            (Currency::Inr, 82.9),
            (Currency::Zar, 19.1),
            (Currency::Brl, 4.95),
        ]
        .into_iter()
        .collect();
        Self { rates }
    }

    /// Builds a table from a raw code → multiplier mapping.
    ///
    /// Unknown codes and non-positive or non-finite multipliers are ignored;
    /// any currency missing from the mapping keeps its default rate.
    pub fn from_codes(raw: &HashMap<String, f64>) -> Self {
        let mut table = Self::defaults();
        for (code, rate) in raw {
            let Ok(currency) = code.parse::<Currency>() else {
                continue;
            };
            if rate.is_finite() && *rate > 0.0 {
                table.rates.insert(currency, *rate);
            }
        }
        table
    }

    /// Returns the multiplier for `currency`, or 1 when absent.
    pub fn rate(&self, currency: Currency) -> f64 {
        self.rates.get(&currency).copied().unwrap_or(1.0)
    }

    /// Number of currencies with a known multiplier.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Always false for tables built through this API.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Converts a reference-currency amount into `target`.
///
/// Never fails: a missing multiplier is treated as 1.
pub fn convert(amount: f64, target: Currency, table: &RateTable) -> f64 {
    amount * table.rate(target)
}

/// Formats a reference-currency amount for display in `target`.
///
/// ```ignore
/// assert_eq!(format_price(10.0, Currency::Zar, &RateTable::defaults()), "R191.00");
/// ```
pub fn format_price(amount: f64, target: Currency, table: &RateTable) -> String {
    let converted = convert(amount, target, table);
    format!(
        "{}{:.*}",
        target.symbol(),
        target.decimal_places(),
        converted
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_with_default_zar_rate() {
        let result = convert(100.0, Currency::Zar, &RateTable::defaults());
        assert!((result - 1910.0).abs() < 1e-9);
    }

    #[test]
    fn usd_is_identity() {
        assert_eq!(convert(42.5, Currency::Usd, &RateTable::defaults()), 42.5);
    }

    #[test]
    fn defaults_cover_every_currency() {
        let table = RateTable::defaults();
        assert_eq!(table.len(), Currency::ALL.len());
        assert!(!table.is_empty());
    }

    #[test]
    fn from_codes_merges_over_defaults() {
        let mut raw = HashMap::new();
        raw.insert("EUR".to_string(), 0.95);
        raw.insert("CHF".to_string(), 0.88);
        raw.insert("GBP".to_string(), f64::NAN);
        raw.insert("JPY".to_string(), -3.0);

        let table = RateTable::from_codes(&raw);
        assert_eq!(table.rate(Currency::Eur), 0.95);
        assert_eq!(table.rate(Currency::Gbp), 0.79);
        assert_eq!(table.rate(Currency::Jpy), 150.2);
        assert_eq!(table.len(), Currency::ALL.len());
    }

    #[test]
    fn from_empty_mapping_is_defaults() {
        assert_eq!(RateTable::from_codes(&HashMap::new()), RateTable::defaults());
    }

    #[test]
    fn formats_with_symbol_and_decimals() {
        let table = RateTable::defaults();
        assert_eq!(format_price(10.0, Currency::Zar, &table), "R191.00");
        assert_eq!(format_price(10.0, Currency::Usd, &table), "$10.00");
        assert_eq!(format_price(10.0, Currency::Jpy, &table), "¥1502");
    }
}

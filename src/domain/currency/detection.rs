//! Default display-currency detection from timezone and locale hints.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::Currency;

static TIMEZONE_CURRENCIES: Lazy<HashMap<&'static str, Currency>> = Lazy::new(|| {
    HashMap::from([
        ("Africa/Johannesburg", Currency::Zar),
        ("Africa/Harare", Currency::Zar),
        ("America/Sao_Paulo", Currency::Brl),
        ("America/Manaus", Currency::Brl),
        ("Asia/Tokyo", Currency::Jpy),
        ("Europe/London", Currency::Gbp),
        ("Europe/Paris", Currency::Eur),
        ("Europe/Berlin", Currency::Eur),
        ("Europe/Rome", Currency::Eur),
        ("Europe/Madrid", Currency::Eur),
        ("America/Toronto", Currency::Cad),
        ("Australia/Sydney", Currency::Aud),
        ("Australia/Melbourne", Currency::Aud),
        ("Asia/Kolkata", Currency::Inr),
    ])
});

/// Picks a display currency from an IANA timezone and a BCP 47 locale.
///
/// Resolution order: exact timezone match, then region prefix
/// (`Europe/` → EUR, `Africa/` → ZAR), then for Asian zones the locale's
/// region (`IN` → INR, `JP` → JPY), and finally USD.
pub fn detect_default_currency(timezone: &str, locale: &str) -> Currency {
    if let Some(currency) = TIMEZONE_CURRENCIES.get(timezone) {
        return *currency;
    }

    if timezone.starts_with("Europe/") {
        return Currency::Eur;
    }
    if timezone.starts_with("Africa/") {
        return Currency::Zar;
    }
    if timezone.starts_with("Asia/") {
        if locale.contains("IN") {
            return Currency::Inr;
        }
        if locale.contains("JP") {
            return Currency::Jpy;
        }
    }

    Currency::Usd
}

//! Session bootstrap and persistence.
//!
//! Restores tier, trial usage and language from the key value store at
//! startup, and writes each of them back whenever it changes. Missing or
//! unreadable values fall back to defaults; write failures are logged and
//! swallowed so the session keeps working from memory.

use std::num::IntErrorKind;
use std::sync::Arc;

use crate::domain::catalog::SubscriptionTier;
use crate::domain::currency::{detect_default_currency, Currency};
use crate::domain::session::{LanguageCode, SessionState};
use crate::ports::KeyValueStore;

pub const LANGUAGE_KEY: &str = "shopsnap_lang";
pub const TIER_KEY: &str = "shopsnap_tier";
pub const SEARCH_COUNT_KEY: &str = "shopsnap_search_count";

/// Host settings the defaults are derived from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostEnvironment {
    /// IANA zone name, e.g. `Europe/Paris`.
    pub timezone: Option<String>,
    /// Locale tag, e.g. `en-US` or `de_DE.UTF-8`.
    pub locale: Option<String>,
}

impl HostEnvironment {
    pub fn new(timezone: Option<String>, locale: Option<String>) -> Self {
        Self { timezone, locale }
    }

    /// Reads `TZ` and the first of `LC_ALL`, `LANG` that is set.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            timezone: var("TZ"),
            locale: var("LC_ALL").or_else(|| var("LANG")),
        }
    }

    pub fn default_language(&self) -> LanguageCode {
        LanguageCode::from_locale(self.locale.as_deref())
    }

    /// Display currency for this host. Detected at every start, never stored.
    pub fn display_currency(&self) -> Currency {
        detect_default_currency(
            self.timezone.as_deref().unwrap_or_default(),
            self.locale.as_deref().unwrap_or_default(),
        )
    }
}

/// Reads the persisted session, defaulting anything absent or invalid.
pub async fn restore_session(store: &dyn KeyValueStore, host: &HostEnvironment) -> SessionState {
    let tier = read(store, TIER_KEY)
        .await
        .map(|raw| parse_tier(&raw))
        .unwrap_or_default();
    let usage = read(store, SEARCH_COUNT_KEY)
        .await
        .map(|raw| parse_usage(&raw))
        .unwrap_or(0);
    let language = read(store, LANGUAGE_KEY)
        .await
        .and_then(|raw| LanguageCode::new(raw).ok())
        .unwrap_or_else(|| host.default_language());

    tracing::info!(
        tier = %tier,
        search_usage = usage,
        language = %language,
        "Session restored"
    );
    SessionState::new(tier, usage, language)
}

async fn read(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key).await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key = key, error = %e, "Failed to read stored preference, using default");
            None
        }
    }
}

fn parse_tier(raw: &str) -> SubscriptionTier {
    raw.trim().parse().unwrap_or_else(|_| {
        tracing::warn!(value = raw, "Unknown stored tier, falling back to trial");
        SubscriptionTier::Trial
    })
}

/// Negative or unparsable counts read as zero; oversized counts saturate.
fn parse_usage(raw: &str) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(n) => u32::try_from(n.max(0)).unwrap_or(u32::MAX),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => u32::MAX,
        Err(_) => 0,
    }
}

/// Writes session values through to the store.
#[derive(Clone)]
pub struct SessionPersister {
    store: Arc<dyn KeyValueStore>,
}

impl SessionPersister {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn persist_tier(&self, tier: SubscriptionTier) {
        self.write(TIER_KEY, tier.code()).await;
    }

    pub async fn persist_search_usage(&self, usage: u32) {
        self.write(SEARCH_COUNT_KEY, &usage.to_string()).await;
    }

    pub async fn persist_language(&self, language: &LanguageCode) {
        self.write(LANGUAGE_KEY, language.as_str()).await;
    }

    async fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value).await {
            tracing::warn!(key = key, error = %e, "Failed to persist preference");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryKeyValueStore;

    fn host() -> HostEnvironment {
        HostEnvironment::new(Some("Europe/Paris".to_string()), Some("fr-FR".to_string()))
    }

    #[tokio::test]
    async fn empty_store_gives_trial_defaults() {
        let store = InMemoryKeyValueStore::new();
        let state = restore_session(&store, &HostEnvironment::default()).await;

        assert_eq!(state.tier(), SubscriptionTier::Trial);
        assert_eq!(state.search_usage(), 0);
        assert_eq!(state.language().as_str(), "en");
    }

    #[tokio::test]
    async fn stored_values_are_restored() {
        let store = InMemoryKeyValueStore::with_entries([
            (TIER_KEY, "EXPLORER"),
            (SEARCH_COUNT_KEY, "4"),
            (LANGUAGE_KEY, "ar"),
        ]);
        let state = restore_session(&store, &host()).await;

        assert_eq!(state.tier(), SubscriptionTier::Explorer);
        assert_eq!(state.search_usage(), 4);
        assert_eq!(state.language().as_str(), "ar");
    }

    #[tokio::test]
    async fn garbage_values_fall_back() {
        let store = InMemoryKeyValueStore::with_entries([
            (TIER_KEY, "PLATINUM"),
            (SEARCH_COUNT_KEY, "-3"),
            (LANGUAGE_KEY, "klingon"),
        ]);
        let state = restore_session(&store, &host()).await;

        assert_eq!(state.tier(), SubscriptionTier::Trial);
        assert_eq!(state.search_usage(), 0);
        assert_eq!(state.language().as_str(), "fr");
    }

    #[test]
    fn usage_parsing() {
        assert_eq!(parse_usage("5"), 5);
        assert_eq!(parse_usage(" 2 "), 2);
        assert_eq!(parse_usage("abc"), 0);
        assert_eq!(parse_usage("-1"), 0);
    }

    #[test]
    fn oversized_usage_saturates_and_stays_gated() {
        assert_eq!(parse_usage("99999999999"), u32::MAX);
        assert_eq!(parse_usage("99999999999999999999999"), u32::MAX);

        let state = SessionState::new(
            SubscriptionTier::Trial,
            parse_usage("99999999999"),
            LanguageCode::default(),
        );
        assert!(!state.can_search());
    }

    #[test]
    fn display_currency_follows_timezone() {
        assert_eq!(host().display_currency(), Currency::Eur);
        assert_eq!(HostEnvironment::default().display_currency(), Currency::Usd);
    }

    #[tokio::test]
    async fn persister_writes_codes() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let persister = SessionPersister::new(store.clone());

        persister.persist_tier(SubscriptionTier::Elite).await;
        persister.persist_search_usage(3).await;
        persister
            .persist_language(&LanguageCode::new("de").unwrap())
            .await;

        let entries = store.snapshot().await;
        assert_eq!(entries.get(TIER_KEY).map(String::as_str), Some("ELITE"));
        assert_eq!(entries.get(SEARCH_COUNT_KEY).map(String::as_str), Some("3"));
        assert_eq!(entries.get(LANGUAGE_KEY).map(String::as_str), Some("de"));
    }

    #[tokio::test]
    async fn persister_swallows_write_failures() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        store.set_fail_writes(true);
        let persister = SessionPersister::new(store.clone());

        persister.persist_tier(SubscriptionTier::Elite).await;

        assert!(store.snapshot().await.is_empty());
    }
}

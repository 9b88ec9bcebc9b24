//! Persisted per-user session state.

use serde::{Deserialize, Serialize};

use super::LanguageCode;
use crate::domain::catalog::SubscriptionTier;
use crate::domain::checkout::CheckoutError;
use crate::domain::search::{can_search, record_search, GateDecision};

/// The three values that survive a restart: tier, trial usage and language.
///
/// # Invariants
///
/// - `tier` only moves up, via [`SessionState::upgrade_tier`]
/// - `search_usage` only grows, and only while on Trial
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionState {
    tier: SubscriptionTier,
    search_usage: u32,
    language: LanguageCode,
}

impl SessionState {
    pub fn new(tier: SubscriptionTier, search_usage: u32, language: LanguageCode) -> Self {
        Self {
            tier,
            search_usage,
            language,
        }
    }

    pub fn tier(&self) -> SubscriptionTier {
        self.tier
    }

    pub fn search_usage(&self) -> u32 {
        self.search_usage
    }

    pub fn language(&self) -> &LanguageCode {
        &self.language
    }

    pub fn can_search(&self) -> bool {
        can_search(self.tier, self.search_usage)
    }

    pub fn gate_decision(&self) -> GateDecision {
        GateDecision::evaluate(self.tier, self.search_usage)
    }

    /// Counts one completed search. Returns true if usage changed.
    pub fn record_search(&mut self) -> bool {
        let next = record_search(self.tier, self.search_usage);
        let changed = next != self.search_usage;
        self.search_usage = next;
        changed
    }

    /// Upgrade to a higher tier.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Downgrade`] if `new_tier` does not rank
    /// above the current tier.
    pub fn upgrade_tier(&mut self, new_tier: SubscriptionTier) -> Result<(), CheckoutError> {
        if new_tier.rank() <= self.tier.rank() {
            return Err(CheckoutError::Downgrade {
                current: self.tier,
                requested: new_tier,
            });
        }

        self.tier = new_tier;
        Ok(())
    }

    /// Returns true if the language changed.
    pub fn set_language(&mut self, language: LanguageCode) -> bool {
        if self.language == language {
            return false;
        }
        self.language = language;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_fresh_trial() {
        let state = SessionState::default();
        assert_eq!(state.tier(), SubscriptionTier::Trial);
        assert_eq!(state.search_usage(), 0);
        assert_eq!(state.language().as_str(), "en");
        assert!(state.can_search());
    }

    #[test]
    fn trial_search_is_counted() {
        let mut state = SessionState::new(SubscriptionTier::Trial, 4, LanguageCode::default());
        assert!(state.record_search());
        assert_eq!(state.search_usage(), 5);
        assert!(!state.can_search());
        assert!(state.gate_decision().locked);
    }

    #[test]
    fn paid_search_is_not_counted() {
        let mut state = SessionState::new(SubscriptionTier::Starter, 5, LanguageCode::default());
        assert!(!state.record_search());
        assert_eq!(state.search_usage(), 5);
        assert!(state.can_search());
    }

    #[test]
    fn upgrade_moves_tier_up() {
        let mut state = SessionState::default();
        state.upgrade_tier(SubscriptionTier::Explorer).unwrap();
        assert_eq!(state.tier(), SubscriptionTier::Explorer);
    }

    #[test]
    fn cannot_downgrade() {
        let mut state = SessionState::new(SubscriptionTier::Elite, 0, LanguageCode::default());
        assert_eq!(
            state.upgrade_tier(SubscriptionTier::Starter),
            Err(CheckoutError::Downgrade {
                current: SubscriptionTier::Elite,
                requested: SubscriptionTier::Starter,
            })
        );
        assert!(state.upgrade_tier(SubscriptionTier::Elite).is_err());
        assert_eq!(state.tier(), SubscriptionTier::Elite);
    }

    #[test]
    fn set_language_reports_change() {
        let mut state = SessionState::default();
        assert!(!state.set_language(LanguageCode::default()));
        assert!(state.set_language(LanguageCode::new("ar").unwrap()));
        assert!(state.language().is_rtl());
    }
}

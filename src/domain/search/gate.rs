//! Search gate: trial metering.
//!
//! The gate is consulted before any query is dispatched to the search
//! collaborator. A denied attempt must never reach the collaborator and
//! never touch the usage counter.

use serde::Serialize;

use crate::domain::catalog::{tier_definition, SearchLimit, SubscriptionTier};

/// Number of free searches on the Trial tier.
pub const TRIAL_SEARCH_LIMIT: u32 = 5;

/// Returns true if a new search is permitted.
///
/// Paid tiers are never metered; Trial is allowed while `usage` is below
/// [`TRIAL_SEARCH_LIMIT`].
pub fn can_search(tier: SubscriptionTier, usage: u32) -> bool {
    match tier_definition(tier).search_limit {
        SearchLimit::Limited(max) => usage < max,
        SearchLimit::Unlimited => true,
    }
}

/// Returns the usage counter after one completed search.
///
/// Only Trial searches are counted. Saturates instead of wrapping.
pub fn record_search(tier: SubscriptionTier, usage: u32) -> u32 {
    if tier == SubscriptionTier::Trial {
        usage.saturating_add(1)
    } else {
        usage
    }
}

/// Derived lock state; recomputed on every attempt and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GateDecision {
    pub locked: bool,
    /// Searches left on the trial; `None` for unmetered tiers.
    pub remaining: Option<u32>,
}

impl GateDecision {
    pub fn evaluate(tier: SubscriptionTier, usage: u32) -> Self {
        match tier_definition(tier).search_limit {
            SearchLimit::Limited(max) => Self {
                locked: usage >= max,
                remaining: Some(max.saturating_sub(usage)),
            },
            SearchLimit::Unlimited => Self {
                locked: false,
                remaining: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn paid_tier() -> impl Strategy<Value = SubscriptionTier> {
        prop_oneof![
            Just(SubscriptionTier::Starter),
            Just(SubscriptionTier::Explorer),
            Just(SubscriptionTier::Elite),
        ]
    }

    proptest! {
        #[test]
        fn paid_tiers_can_always_search(tier in paid_tier(), usage in any::<u32>()) {
            prop_assert!(can_search(tier, usage));
            prop_assert!(!GateDecision::evaluate(tier, usage).locked);
        }

        #[test]
        fn trial_can_search_iff_under_limit(usage in 0u32..1000) {
            prop_assert_eq!(can_search(SubscriptionTier::Trial, usage), usage < TRIAL_SEARCH_LIMIT);
        }

        #[test]
        fn locked_is_negation_of_can_search(usage in 0u32..1000) {
            let decision = GateDecision::evaluate(SubscriptionTier::Trial, usage);
            prop_assert_eq!(decision.locked, !can_search(SubscriptionTier::Trial, usage));
        }

        #[test]
        fn paid_searches_are_not_counted(tier in paid_tier(), usage in any::<u32>()) {
            prop_assert_eq!(record_search(tier, usage), usage);
        }
    }

    #[test]
    fn trial_search_increments_usage() {
        assert_eq!(record_search(SubscriptionTier::Trial, 4), 5);
    }

    #[test]
    fn record_search_saturates() {
        assert_eq!(record_search(SubscriptionTier::Trial, u32::MAX), u32::MAX);
    }

    #[test]
    fn fifth_search_locks_the_trial() {
        assert!(can_search(SubscriptionTier::Trial, 4));
        let usage = record_search(SubscriptionTier::Trial, 4);
        assert!(!can_search(SubscriptionTier::Trial, usage));
        assert!(GateDecision::evaluate(SubscriptionTier::Trial, usage).locked);
    }

    #[test]
    fn remaining_counts_down() {
        let decision = GateDecision::evaluate(SubscriptionTier::Trial, 3);
        assert_eq!(decision.remaining, Some(2));
        assert_eq!(GateDecision::evaluate(SubscriptionTier::Trial, 9).remaining, Some(0));
        assert_eq!(GateDecision::evaluate(SubscriptionTier::Elite, 9).remaining, None);
    }

    #[test]
    fn trial_limit_matches_catalog() {
        assert_eq!(
            tier_definition(SubscriptionTier::Trial).search_limit,
            SearchLimit::Limited(TRIAL_SEARCH_LIMIT)
        );
    }
}

//! Tier reference data: price, retailer entitlement and search limit.

use serde::{Deserialize, Serialize};

use super::SubscriptionTier;

/// Maximum number of searches a tier allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchLimit {
    Limited(u32),
    Unlimited,
}

impl SearchLimit {
    /// Check if the limit has been reached.
    ///
    /// Returns false if unlimited or under limit.
    pub fn reached(&self, usage: u32) -> bool {
        match self {
            SearchLimit::Limited(max) => usage >= *max,
            SearchLimit::Unlimited => false,
        }
    }
}

/// Immutable reference data for a subscription tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierDefinition {
    /// The tier these values apply to.
    pub tier: SubscriptionTier,
    /// Monthly price in whole USD.
    pub price_usd: u32,
    /// Number of retailers shown per search.
    pub retailer_count: usize,
    /// Search metering.
    pub search_limit: SearchLimit,
    pub description: &'static str,
}

impl TierDefinition {
    /// Get the definition for a specific tier.
    ///
    /// | Tier | Price | Retailers | Searches |
    /// |------|-------|-----------|----------|
    /// | Trial | 0 | 10 | 5 |
    /// | Starter | 5 | 10 | Unlimited |
    /// | Explorer | 10 | 20 | Unlimited |
    /// | Elite | 15 | 30 | Unlimited |
    pub fn for_tier(tier: SubscriptionTier) -> Self {
        match tier {
            SubscriptionTier::Trial => Self {
                tier,
                price_usd: 0,
                retailer_count: 10,
                search_limit: SearchLimit::Limited(5),
                description: "First 5 searches for free.",
            },
            SubscriptionTier::Starter => Self {
                tier,
                price_usd: 5,
                retailer_count: 10,
                search_limit: SearchLimit::Unlimited,
                description: "Unlock unlimited searches with 10 suppliers.",
            },
            SubscriptionTier::Explorer => Self {
                tier,
                price_usd: 10,
                retailer_count: 20,
                search_limit: SearchLimit::Unlimited,
                description: "Deep market access: 20 retailers.",
            },
            SubscriptionTier::Elite => Self {
                tier,
                price_usd: 15,
                retailer_count: 30,
                search_limit: SearchLimit::Unlimited,
                description: "Total market mastery: all 30 retailers.",
            },
        }
    }
}

/// Returns the definition of `tier`.
pub fn tier_definition(tier: SubscriptionTier) -> TierDefinition {
    TierDefinition::for_tier(tier)
}

/// Tiers that can be purchased, cheapest first.
pub fn all_payable_tiers() -> Vec<TierDefinition> {
    [
        SubscriptionTier::Starter,
        SubscriptionTier::Explorer,
        SubscriptionTier::Elite,
    ]
    .into_iter()
    .map(TierDefinition::for_tier)
    .collect()
}

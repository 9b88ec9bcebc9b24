//! Subscription tier definitions.
//!
//! Represents the subscription levels available in ShopSnap.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Subscription tier.
///
/// Determines retailer coverage and search metering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionTier {
    /// Free evaluation tier.
    /// - 10 retailers
    /// - 5 searches in total
    Trial,

    /// Entry paid tier.
    /// - 10 retailers
    /// - Unlimited searches
    Starter,

    /// Mid paid tier.
    /// - 20 retailers
    /// - Unlimited searches
    Explorer,

    /// Top paid tier.
    /// - All 30 retailers
    /// - Unlimited searches
    Elite,
}

impl SubscriptionTier {
    /// Returns true if this tier is a paid tier.
    pub fn is_paid(&self) -> bool {
        !matches!(self, SubscriptionTier::Trial)
    }

    /// Returns the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            SubscriptionTier::Trial => "Trial",
            SubscriptionTier::Starter => "Starter",
            SubscriptionTier::Explorer => "Explorer",
            SubscriptionTier::Elite => "Elite",
        }
    }

    /// Returns the persisted code for this tier.
    pub fn code(&self) -> &'static str {
        match self {
            SubscriptionTier::Trial => "TRIAL",
            SubscriptionTier::Starter => "STARTER",
            SubscriptionTier::Explorer => "EXPLORER",
            SubscriptionTier::Elite => "ELITE",
        }
    }

    /// Returns the numeric rank of this tier for comparison.
    ///
    /// Higher rank = more retailers. Used for upgrade validation.
    pub fn rank(&self) -> u8 {
        match self {
            SubscriptionTier::Trial => 0,
            SubscriptionTier::Starter => 1,
            SubscriptionTier::Explorer => 2,
            SubscriptionTier::Elite => 3,
        }
    }
}

impl Default for SubscriptionTier {
    fn default() -> Self {
        SubscriptionTier::Trial
    }
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for SubscriptionTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "TRIAL" => Ok(SubscriptionTier::Trial),
            "STARTER" => Ok(SubscriptionTier::Starter),
            "EXPLORER" => Ok(SubscriptionTier::Explorer),
            "ELITE" => Ok(SubscriptionTier::Elite),
            other => Err(ValidationError::invalid_format(
                "tier",
                format!("unknown tier code '{}'", other),
            )),
        }
    }
}

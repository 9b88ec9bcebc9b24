//! Catalog registry.
//!
//! Static, read-only reference data consumed by the other components.
//!
//! # Module Structure
//!
//! - `tier` - SubscriptionTier levels
//! - `tier_definition` - Price, retailer entitlement and search limit per tier
//! - `retailer` - The fixed retailer catalog and store-name matching
//! - `payment_catalog` - Crypto assets, Ozow banks, EFT account

mod payment_catalog;
mod retailer;
mod tier;
mod tier_definition;

pub use payment_catalog::{
    all_crypto_assets, crypto_asset, eft_bank_details, ozow_banks, CryptoAsset, CryptoAssetId,
    EftBankDetails,
};
pub(crate) use retailer::encode_query_component;
pub use retailer::{all_retailers, match_retailer, retailer_by_id, Retailer};
pub use tier::SubscriptionTier;
pub use tier_definition::{all_payable_tiers, tier_definition, SearchLimit, TierDefinition};

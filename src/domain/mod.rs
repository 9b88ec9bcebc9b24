//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, timestamps, state machine)
//! - `catalog` - Static reference data: tiers, retailers, payment options
//! - `currency` - Display currencies, rate table and conversion
//! - `search` - Trial gate, listing normalization and ranking
//! - `checkout` - Payment flows and the checkout orchestrator
//! - `session` - Persisted user state, language and screens
//! - `watchlist` - Tracked products

pub mod catalog;
pub mod checkout;
pub mod currency;
pub mod foundation;
pub mod search;
pub mod session;
pub mod watchlist;

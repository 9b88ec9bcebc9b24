//! Application layer - session bootstrap, rate refresh and the session controller.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Nothing here talks to the network or disk directly.

pub mod bootstrap;
pub mod controller;
pub mod rates;

pub use bootstrap::{
    restore_session, HostEnvironment, SessionPersister, LANGUAGE_KEY, SEARCH_COUNT_KEY, TIER_KEY,
};
pub use controller::{CheckoutOutcome, SearchOutcome, SessionDeps, ShopSession};
pub use rates::{
    default_shared_rates, refresh_rate_table, RateRefresher, RateRefresherConfig, SharedRates,
};

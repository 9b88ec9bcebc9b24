//! Ports - interfaces to the outside world.
//!
//! Each port is an `async_trait` implemented by one or more adapters.
//!
//! - `SearchProvider` - Generates product listings for a query
//! - `RateProvider` - Fetches exchange rates
//! - `KeyValueStore` - Persists tier, usage and language
//! - `SettlementGateway` - Awaits the timed steps of a payment

mod key_value_store;
mod rate_provider;
mod search_provider;
mod settlement_gateway;

pub use key_value_store::{KeyValueStore, StorageError};
pub use rate_provider::{RateError, RateProvider};
pub use search_provider::SearchProvider;
pub use settlement_gateway::{SettlementError, SettlementGateway, SettlementStep};

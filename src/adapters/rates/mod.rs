//! Exchange rate adapters.

mod fixed;
mod open_er_api;

pub use fixed::FixedRateProvider;
pub use open_er_api::{OpenErApiConfig, OpenErApiRateProvider};

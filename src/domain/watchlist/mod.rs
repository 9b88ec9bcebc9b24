//! Watchlist domain module.
//!
//! In-memory set of tracked products, keyed by product id. Not persisted.

mod tracker;

pub use tracker::{WatchItem, Watchlist};

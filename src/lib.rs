//! ShopSnap - price-comparison shopping core
//!
//! Tiered search access with a trial meter, ranking of generated retailer
//! listings by total cost, and simulated checkout flows for card, crypto,
//! Ozow and manual EFT payments.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

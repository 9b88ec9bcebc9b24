//! Currency domain module.
//!
//! Display currencies, the exchange-rate table and default-currency
//! detection. All prices originate in USD; conversion is display-only.

mod code;
mod detection;
mod rate_table;

pub use code::Currency;
pub use detection::detect_default_currency;
pub use rate_table::{convert, format_price, RateTable};

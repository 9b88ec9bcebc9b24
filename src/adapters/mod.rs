//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `search` - Listing generation (Gemini, mock)
//! - `rates` - Exchange rates (open.er-api, fixed)
//! - `storage` - Preference persistence (JSON file, in-memory)
//! - `settlement` - Payment step timing (simulated, scripted)

pub mod rates;
pub mod search;
pub mod settlement;
pub mod storage;

pub use rates::{FixedRateProvider, OpenErApiConfig, OpenErApiRateProvider};
pub use search::{GeminiConfig, GeminiSearchProvider, MockSearchProvider};
pub use settlement::{
    ScriptedSettlement, SettlementAbortHandle, SettlementTimings, SimulatedSettlement,
};
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};

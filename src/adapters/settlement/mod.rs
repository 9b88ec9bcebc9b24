//! Settlement gateway adapters.
//!
//! - `SimulatedSettlement` - Fixed delays, always succeeds unless aborted
//! - `ScriptedSettlement` - Instant, with optional injected failure (tests)

mod scripted;
mod simulated;

pub use scripted::ScriptedSettlement;
pub use simulated::{SettlementAbortHandle, SettlementTimings, SimulatedSettlement};

//! Checkout domain module.
//!
//! One generic payment flow parameterised by method. The orchestrator owns
//! the pending plan and the single payment session; settlement timing is
//! supplied from outside through the settlement gateway port.
//!
//! # Module Structure
//!
//! - `method` - Payment methods and their phase sequences
//! - `phase` - PaymentPhase state machine
//! - `card` - Card input and brand guess
//! - `reference` - Manual EFT reference codes
//! - `session` - PaymentSession and method payloads
//! - `events` - CheckoutEvent
//! - `errors` - CheckoutError
//! - `orchestrator` - CheckoutOrchestrator

mod card;
mod errors;
mod events;
mod method;
mod orchestrator;
mod phase;
mod reference;
mod session;

pub use card::{CardBrand, CardInput};
pub use errors::CheckoutError;
pub use events::CheckoutEvent;
pub use method::PaymentMethod;
pub use orchestrator::{CheckoutOrchestrator, CheckoutStage};
pub use phase::PaymentPhase;
pub use reference::EftReference;
pub use session::{MethodPayload, PaymentSession};

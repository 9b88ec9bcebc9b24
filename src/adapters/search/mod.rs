//! Search provider adapters.

mod gemini;
mod mock;

pub use gemini::{GeminiConfig, GeminiSearchProvider};
pub use mock::MockSearchProvider;

//! Session domain module.
//!
//! The per-user state restored at startup (tier, trial usage, language)
//! and the navigation screens.

mod language;
mod screen;
mod state;

pub use language::LanguageCode;
pub use screen::Screen;
pub use state::SessionState;

//! Search domain module.
//!
//! Trial metering, boundary normalization of generated listings and
//! ranking by total cost.

mod errors;
mod gate;
mod listing;
mod normalize;
mod ranker;
mod voice;

pub use errors::SearchError;
pub use gate::{can_search, record_search, GateDecision, TRIAL_SEARCH_LIMIT};
pub use listing::{ComparisonData, Listing, Product};
pub use normalize::{normalize_response, RawListing, RawProduct, RawSearchResponse};
pub use ranker::rank;
pub use voice::VoiceTranscript;

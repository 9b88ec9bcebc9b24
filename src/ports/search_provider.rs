//! Search Provider Port - Interface for the listing generator.
//!
//! The provider turns a free-text product query into a loosely-typed
//! response which the domain validates with
//! [`normalize_response`](crate::domain::search::normalize_response).

use async_trait::async_trait;

use crate::domain::search::{RawSearchResponse, SearchError};

/// Port for product search.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Generates product information and listings for `query`.
    ///
    /// # Errors
    ///
    /// - `Unavailable` on transport or service failure
    /// - `MalformedResponse` if the body cannot be read as a search response
    async fn search(&self, query: &str) -> Result<RawSearchResponse, SearchError>;

    /// Short provider name for logs.
    fn provider_name(&self) -> &str;
}

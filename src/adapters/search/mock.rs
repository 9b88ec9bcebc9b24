//! Mock Search Provider for testing.
//!
//! # Features
//!
//! - Pre-configured responses (consumed in order)
//! - Error injection
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockSearchProvider::new().with_response(sample_response());
//! let raw = provider.search("kettle").await?;
//! assert_eq!(provider.calls(), vec!["kettle"]);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::search::{RawSearchResponse, SearchError};
use crate::ports::SearchProvider;

/// Mock search provider for testing.
#[derive(Debug, Clone, Default)]
pub struct MockSearchProvider {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<Result<RawSearchResponse, SearchError>>>>,
    /// Returned once the queue is empty.
    fallback: Option<RawSearchResponse>,
    /// Queries received, in order.
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockSearchProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, response: RawSearchResponse) -> Self {
        self.push(Ok(response));
        self
    }

    /// Adds an error to the queue.
    pub fn with_error(self, error: SearchError) -> Self {
        self.push(Err(error));
        self
    }

    /// Response used for every call once the queue is drained.
    pub fn with_fallback(mut self, response: RawSearchResponse) -> Self {
        self.fallback = Some(response);
        self
    }

    /// Queries received so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    fn push(&self, response: Result<RawSearchResponse, SearchError>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(response);
        }
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    async fn search(&self, query: &str) -> Result<RawSearchResponse, SearchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(query.to_string());
        }

        let next = self
            .responses
            .lock()
            .ok()
            .and_then(|mut responses| responses.pop_front());
        match next {
            Some(response) => response,
            None => self
                .fallback
                .clone()
                .ok_or_else(|| SearchError::unavailable("No mock responses configured")),
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

//! Search-specific error types.

use thiserror::Error;

/// Failures on the search path.
///
/// None of these are surfaced as blocking errors to the gate or checkout;
/// the controller maps them to a degraded outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Search service unavailable: {0}")]
    Unavailable(String),

    #[error("Search response malformed: {0}")]
    MalformedResponse(String),
}

impl SearchError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        SearchError::Unavailable(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        SearchError::MalformedResponse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_the_cause() {
        let err = SearchError::malformed("missing product");
        assert_eq!(err.to_string(), "Search response malformed: missing product");
        assert!(SearchError::unavailable("timeout")
            .to_string()
            .contains("timeout"));
    }
}

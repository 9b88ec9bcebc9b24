//! Spoken queries.

use serde::{Deserialize, Serialize};

/// Text recognised from a spoken request.
///
/// Speech capture happens outside this crate. The transcript is searched
/// exactly like a typed query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoiceTranscript(String);

impl VoiceTranscript {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The transcript as a search query, with surrounding whitespace and
    /// trailing sentence punctuation removed.
    pub fn as_query(&self) -> &str {
        self.0.trim().trim_end_matches(['.', '?', '!']).trim_end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_punctuation() {
        assert_eq!(
            VoiceTranscript::new("  Find me a red kettle. ").as_query(),
            "Find me a red kettle"
        );
        assert_eq!(VoiceTranscript::new("headphones?!").as_query(), "headphones");
    }

    #[test]
    fn silence_is_blank() {
        assert_eq!(VoiceTranscript::new("  ").as_query(), "");
    }
}

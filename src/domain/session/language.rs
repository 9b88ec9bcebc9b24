//! UI language preference.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

const DEFAULT_LANGUAGE: &str = "en";
const RTL_LANGUAGES: [&str; 4] = ["ar", "he", "fa", "ur"];

/// A lowercase ISO 639 language code such as `en` or `ar`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Parses a 2 or 3 letter code, normalising case.
    pub fn new(code: impl AsRef<str>) -> Result<Self, ValidationError> {
        let code = code.as_ref().trim();
        if code.is_empty() {
            return Err(ValidationError::empty_field("language"));
        }
        if !(2..=3).contains(&code.len()) || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::invalid_format(
                "language",
                format!("'{}' is not a 2-3 letter language code", code),
            ));
        }
        Ok(Self(code.to_ascii_lowercase()))
    }

    /// Primary subtag of a locale like `pt-BR` or `en_US.UTF-8`, else `en`.
    pub fn from_locale(locale: Option<&str>) -> Self {
        locale
            .and_then(|l| l.split(['-', '_', '.']).next())
            .and_then(|primary| Self::new(primary).ok())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_rtl(&self) -> bool {
        RTL_LANGUAGES.contains(&self.0.as_str())
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self(DEFAULT_LANGUAGE.to_string())
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LanguageCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

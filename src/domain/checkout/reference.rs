//! Manual EFT payment reference codes.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

const PREFIX: &str = "SNAP-";
const UPPER_BOUND: u32 = 999_999;

/// Reference the user quotes on a manual bank transfer, e.g. `SNAP-48213`.
///
/// Not persisted. A fresh code is generated every time the EFT flow is entered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EftReference(String);

impl EftReference {
    pub fn generate() -> Self {
        let number = rand::thread_rng().gen_range(0..UPPER_BOUND);
        Self(format!("{}{}", PREFIX, number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EftReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

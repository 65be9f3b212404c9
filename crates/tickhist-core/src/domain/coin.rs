use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// URL slug identifying a coin on the historical-data listing page.
///
/// Built from a human-readable coin name: lowercased, spaces replaced with
/// hyphens ("Bitcoin Cash" -> "bitcoin-cash").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CoinSlug(String);

impl CoinSlug {
    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyCoinName);
        }

        let slug = trimmed.to_lowercase().replace(' ', "-");
        Ok(Self(slug))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CoinSlug {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for CoinSlug {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CoinSlug> for String {
    fn from(value: CoinSlug) -> Self {
        value.0
    }
}

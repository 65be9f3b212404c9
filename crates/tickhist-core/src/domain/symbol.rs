use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Ticker symbol as accepted by the quotes download endpoint.
///
/// Normalized to uppercase. The endpoint addresses instruments with plain
/// ASCII tickers plus a small set of markers: a class or pair separator
/// (`BRK.B`, `BTC-USD`), an index prefix (`^GSPC`) and a forex suffix
/// (`EURUSD=X`). Anything outside that set is rejected before a URL is
/// built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse and normalize a ticker to uppercase.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        let normalized = trimmed.to_ascii_uppercase();
        for (index, ch) in normalized.chars().enumerate() {
            let valid = ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '^' | '=');
            if !valid {
                return Err(ValidationError::SymbolInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_uppercases_symbol() {
        let parsed = Symbol::parse(" aapl ").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "AAPL");
    }

    #[test]
    fn accepts_index_pair_and_forex_tickers() {
        assert_eq!(
            Symbol::parse("^gspc").expect("index ticker").as_str(),
            "^GSPC"
        );
        assert_eq!(
            Symbol::parse("btc-usd").expect("pair ticker").as_str(),
            "BTC-USD"
        );
        assert_eq!(
            Symbol::parse("brk.b").expect("class ticker").as_str(),
            "BRK.B"
        );
        assert_eq!(
            Symbol::parse("eurusd=x").expect("forex ticker").as_str(),
            "EURUSD=X"
        );
    }

    #[test]
    fn rejects_empty_symbol() {
        let err = Symbol::parse("  ").expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptySymbol));
    }

    #[test]
    fn rejects_invalid_chars() {
        let err = Symbol::parse("AAPL$").expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::SymbolInvalidChar { ch: '$', index: 4 }
        ));

        let err = Symbol::parse("BTC USD").expect_err("must fail");
        assert!(matches!(err, ValidationError::SymbolInvalidChar { ch: ' ', .. }));
    }
}

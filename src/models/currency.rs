//! Supported currencies
//!
//! The set is fixed; amounts are never converted between currencies, the
//! selection only changes how amounts are labelled.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;

/// A currency the user can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "LKR")]
    Lkr,
}

impl Currency {
    /// Every supported currency, in display order
    pub const ALL: [Currency; 2] = [Currency::Usd, Currency::Lkr];

    /// ISO 4217 code
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Lkr => "LKR",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Usd => "US Dollar",
            Self::Lkr => "Sri Lankan Rupee",
        }
    }

    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Lkr => "Rs ",
        }
    }

    /// Label shown in a picker, e.g. "USD - US Dollar"
    pub fn label(&self) -> String {
        format!("{} - {}", self.code(), self.name())
    }

    /// Format an amount with this currency's symbol
    pub fn format(&self, amount: Money) -> String {
        amount.format_with_symbol(self.symbol())
    }

    /// Look up a currency by code, case-insensitively
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code.trim()))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = UnknownCurrency;

    /// Accepts a bare code ("usd") or a picker label ("USD - US Dollar")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(currency) = Self::from_code(trimmed) {
            return Ok(currency);
        }

        // Picker labels start with the code
        trimmed
            .get(..3)
            .filter(|_| trimmed[3..].trim_start().starts_with('-'))
            .and_then(Self::from_code)
            .ok_or_else(|| UnknownCurrency(trimmed.to_string()))
    }
}

/// A currency code outside the supported set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCurrency(pub String);

impl fmt::Display for UnknownCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let supported: Vec<&str> = Currency::ALL.iter().map(|c| c.code()).collect();
        write!(
            f,
            "Unsupported currency '{}' (supported: {})",
            self.0,
            supported.join(", ")
        )
    }
}

impl std::error::Error for UnknownCurrency {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for currency in Currency::ALL {
            assert_eq!(Currency::from_code(currency.code()), Some(currency));
            assert_eq!(currency.to_string(), currency.code());
        }
    }

    #[test]
    fn test_parse_code_and_label() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!(" LKR ".parse::<Currency>().unwrap(), Currency::Lkr);
        assert_eq!(
            Currency::Lkr.label().parse::<Currency>().unwrap(),
            Currency::Lkr
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("EUR".parse::<Currency>().is_err());
        assert!("USDX".parse::<Currency>().is_err());
        assert!("".parse::<Currency>().is_err());
        assert!("ü".parse::<Currency>().is_err());

        let err = "GBP".parse::<Currency>().unwrap_err();
        assert!(err.to_string().contains("USD, LKR"));
    }

    #[test]
    fn test_serde_uses_code() {
        assert_eq!(serde_json::to_string(&Currency::Lkr).unwrap(), "\"LKR\"");
        let parsed: Currency = serde_json::from_str("\"USD\"").unwrap();
        assert_eq!(parsed, Currency::Usd);
        assert!(serde_json::from_str::<Currency>("\"EUR\"").is_err());
    }

    #[test]
    fn test_format() {
        assert_eq!(Currency::Usd.format(Money::from_cents(123_456)), "$1234.56");
        assert_eq!(Currency::Lkr.format(Money::from_cents(-500)), "-Rs 5.00");
    }
}

//! Monetary amounts
//!
//! The canonical value is a whole-unit `Decimal`; the `$1,000` style string
//! is produced only when rendering or searching and is never stored.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use payfeed_config::CurrencyConfig;
use payfeed_utils::group_digits;

/// A strictly positive amount in whole currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawAmount", into = "String")]
pub struct Amount(Decimal);

impl Amount {
    /// Validate a magnitude. Fractions are truncated toward zero.
    pub fn new(value: Decimal) -> CoreResult<Self> {
        let whole = value.trunc().normalize();
        if whole <= Decimal::ZERO {
            return Err(CoreError::validation("amount", "Amount must be greater than zero"));
        }
        Ok(Amount(whole))
    }

    pub(crate) fn units(units: u64) -> Self {
        Amount(Decimal::from(units.max(1)))
    }

    /// Parse user input with the default `$` / `,` convention
    pub fn parse(input: &str) -> CoreResult<Self> {
        AmountFormat::default().parse(input)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", AmountFormat::default().format(self))
    }
}

impl FromStr for Amount {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amount::parse(s)
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.0.to_string()
    }
}

/// Accepted snapshot encodings: a decimal string (current), a legacy
/// display string such as `"$1,000"`, or a bare JSON number.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Text(String),
    Number(serde_json::Number),
}

impl TryFrom<RawAmount> for Amount {
    type Error = CoreError;

    fn try_from(raw: RawAmount) -> Result<Self, Self::Error> {
        match raw {
            RawAmount::Text(text) => Amount::parse(&text),
            RawAmount::Number(number) => Amount::parse(&number.to_string()),
        }
    }
}

/// Currency display rule: leading symbol plus grouped whole units
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountFormat {
    pub symbol: String,
    pub thousands_separator: String,
}

impl Default for AmountFormat {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            thousands_separator: ",".to_string(),
        }
    }
}

impl From<&CurrencyConfig> for AmountFormat {
    fn from(config: &CurrencyConfig) -> Self {
        Self {
            symbol: config.symbol.clone(),
            thousands_separator: config.thousands_separator.clone(),
        }
    }
}

impl AmountFormat {
    /// Render an amount for display, e.g. `$2,000`
    pub fn format(&self, amount: &Amount) -> String {
        let digits = amount.0.trunc().to_string();
        format!("{}{}", self.symbol, group_digits(&digits, &self.thousands_separator))
    }

    /// Parse user input or a previously formatted string.
    ///
    /// The currency symbol, thousands separators and surrounding whitespace
    /// are ignored; a fractional part is truncated.
    pub fn parse(&self, input: &str) -> CoreResult<Amount> {
        let mut text = input.trim();
        if !self.symbol.is_empty() {
            text = text.strip_prefix(self.symbol.as_str()).unwrap_or(text).trim_start();
        }
        if text.is_empty() {
            return Err(CoreError::validation("amount", "Amount is required"));
        }
        // Checked before separators are stripped, since a separator may be a sign
        if text.starts_with('-') {
            return Err(CoreError::validation("amount", "Amount must be greater than zero"));
        }

        let mut cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        if !self.thousands_separator.is_empty() {
            cleaned = cleaned.replace(self.thousands_separator.as_str(), "");
        }
        cleaned = cleaned.replace('_', "");

        let value = Decimal::from_str(&cleaned).map_err(|_| {
            CoreError::validation("amount", format!("Amount '{}' is not a number", input.trim()))
        })?;

        Amount::new(value)
    }
}

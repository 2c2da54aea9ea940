//! Normalization of operator-typed numeric input.
//!
//! Quantities, labor, services and BDI arrive as free text from forms. Input
//! that does not parse never fails an operation; it is normalized to zero by
//! the functions below. Every caller goes through them so the fallback is one
//! named, testable step.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Upper bound for a percentage field.
pub const MAX_PERCENT: Decimal = Decimal::ONE_HUNDRED;

/// Decimal places kept for quantities, prices and costs.
///
/// Matches the `NUMERIC(_, 4)` columns so a stored value reads back unchanged.
pub const STORED_SCALE: u32 = 4;

/// Largest magnitude accepted from operator input or catalog prices.
///
/// Keeps `quantity × unit_price` and the sums built from it inside the
/// range of [`Decimal`].
pub const MAX_INPUT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Raw numeric input exactly as the operator supplied it.
///
/// JSON accepts a string, a number or `null`; all of them are kept as text
/// and only interpreted by the `parse_*_or_zero` functions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInput(String);

impl RawInput {
    /// Wraps raw text.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the raw text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RawInput {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for RawInput {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<Decimal> for RawInput {
    fn from(value: Decimal) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for RawInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRepr {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
}

impl<'de> Deserialize<'de> for RawInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = match Option::<RawRepr>::deserialize(deserializer)? {
            None => String::new(),
            Some(RawRepr::Text(text)) => text,
            Some(RawRepr::Integer(n)) => n.to_string(),
            Some(RawRepr::Unsigned(n)) => n.to_string(),
            Some(RawRepr::Float(n)) => n.to_string(),
        };
        Ok(Self(raw))
    }
}

impl Serialize for RawInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
        .filter(|value| value.abs() <= MAX_INPUT)
        .map(to_stored_scale)
}

/// Rounds to [`STORED_SCALE`] places, midpoint away from zero like Postgres.
#[must_use]
pub fn to_stored_scale(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(STORED_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Deserializes a decimal and rounds it to [`STORED_SCALE`].
pub fn deserialize_stored_scale<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Decimal, D::Error> {
    <Decimal as Deserialize>::deserialize(deserializer).map(to_stored_scale)
}

/// Parses a monetary amount, falling back to zero.
///
/// Empty, unparseable, negative and out-of-range input all yield `0`.
#[must_use]
pub fn parse_money_or_zero(raw: &str) -> Decimal {
    parse_decimal(raw)
        .filter(|value| !value.is_sign_negative())
        .unwrap_or(Decimal::ZERO)
}

/// Parses a line quantity, falling back to zero.
///
/// Same policy as [`parse_money_or_zero`].
#[must_use]
pub fn parse_quantity_or_zero(raw: &str) -> Decimal {
    parse_money_or_zero(raw)
}

/// Parses a percentage, falling back to zero and clamping to `[0, 100]`.
#[must_use]
pub fn parse_percent_or_zero(raw: &str) -> Decimal {
    parse_money_or_zero(raw).min(MAX_PERCENT)
}

/// Formats an amount with exactly two decimals.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

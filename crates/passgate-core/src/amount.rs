//! # Amounts: Exact Integer Quantities of the Payment Unit
//!
//! `Amount` counts the smallest indivisible payment unit (e.g. wei).
//! Prices are compared for exact equality, so the representation must be
//! exact: amounts are integers in memory and decimal strings in text.
//! Floats are rejected at every boundary.

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// An exact, non-negative quantity of the payment unit.
///
/// Text forms are decimal strings. Integers are also accepted, across the
/// full `u128` range: YAML delivers them natively, and JSON integers beyond
/// `u64` arrive as exact digit strings through `serde_json`'s
/// `arbitrary_precision` number form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[derive(Serialize)]
#[serde(into = "String")]
pub struct Amount(u128);

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a non-negative integer or decimal integer string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        Ok(Amount(u128::from(v)))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Amount, E> {
        Ok(Amount(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        u64::try_from(v)
            .map(|v| Amount(u128::from(v)))
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        Err(E::invalid_type(de::Unexpected::Float(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        v.parse().map_err(E::custom)
    }

    // serde_json's arbitrary-precision number form
    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Amount, A::Error> {
        let number = serde_json::Number::deserialize(de::value::MapAccessDeserializer::new(map))?;
        number.as_str().parse().map_err(de::Error::custom)
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.0.to_string()
    }
}

impl Amount {
    /// Zero.
    pub const ZERO: Amount = Amount(0);

    /// Wrap a raw quantity of the smallest unit.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// The raw quantity.
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Whether this amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Add, returning `None` on overflow.
    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Parse a human-denominated decimal such as `"0.1"` into the smallest
    /// unit, given the number of fractional digits the unit carries
    /// (18 for ether → wei).
    pub fn parse_units(input: &str, decimals: u32) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidAmount {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let s = input.trim();
        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("empty amount"));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid("expected decimal digits"));
        }
        if frac.len() > decimals as usize {
            return Err(invalid("more fractional digits than the unit allows"));
        }

        let scale = 10u128
            .checked_pow(decimals)
            .ok_or_else(|| invalid("decimals out of range"))?;
        let whole_value: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("overflow"))?
        };
        let padded = format!("{frac:0<width$}", width = decimals as usize);
        let frac_value: u128 = if padded.is_empty() {
            0
        } else {
            padded.parse().map_err(|_| invalid("overflow"))?
        };

        whole_value
            .checked_mul(scale)
            .and_then(|w| w.checked_add(frac_value))
            .map(Self)
            .ok_or_else(|| invalid("overflow"))
    }
}

impl std::str::FromStr for Amount {
    type Err = ValidationError;

    /// Parse a plain decimal integer of the smallest unit.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidAmount {
                input: s.to_string(),
                reason: "expected a non-negative integer".to_string(),
            });
        }
        trimmed
            .parse::<u128>()
            .map(Self)
            .map_err(|e| ValidationError::InvalidAmount {
                input: s.to_string(),
                reason: e.to_string(),
            })
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

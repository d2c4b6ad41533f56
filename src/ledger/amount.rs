// Amount - non-negative money value with two-decimal precision

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::str::FromStr;
use thiserror::Error;

/// Number of fractional digits an amount may carry
const SCALE: u32 = 2;

/// Largest amount, in centavos, that survives the JSON number round trip
const MAX_CENTS: u64 = 99_999_999_999_999;

/// Errors that can occur when constructing an amount
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("{0} is negative")]
    Negative(Decimal),

    #[error("{0} has more than two decimal places")]
    TooPrecise(Decimal),

    #[error("{0} exceeds the maximum of {max}", max = Amount::MAX)]
    TooLarge(Decimal),

    #[error("{0:?} is not a number")]
    Unparseable(String),

    #[error("must be greater than zero")]
    NotPositive,
}

/// A monetary amount in reais
///
/// Always non-negative and carried at exactly two decimal places, so
/// `Amount` values compare and sum without floating point drift. The JSON
/// representation is a plain number (`500.0`), matching the ledger documents.
///
/// Amounts are capped at [`Amount::MAX`] (R$ 999,999,999,999.99). JSON numbers
/// are binary floats, and below that ceiling every centavo value reads back
/// exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

impl Amount {
    /// Zero amount constant
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest representable amount
    pub const MAX: Self = Self(Decimal::from_parts(
        (MAX_CENTS & 0xFFFF_FFFF) as u32,
        (MAX_CENTS >> 32) as u32,
        0,
        false,
        SCALE,
    ));

    /// Create an amount from a decimal value
    ///
    /// Returns an error if the value is negative, above [`Amount::MAX`], or
    /// has more than two significant decimal places (`1.50` is fine, `1.505`
    /// is not).
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(AmountError::Negative(value));
        }
        let normalized = value.normalize();
        if normalized.scale() > SCALE {
            return Err(AmountError::TooPrecise(value));
        }
        let mut scaled = normalized;
        scaled.rescale(SCALE);
        if scaled > Self::MAX.0 {
            return Err(AmountError::TooLarge(value));
        }
        Ok(Self(scaled))
    }

    /// Create an amount from a whole number of centavos, saturating at
    /// [`Amount::MAX`]
    pub fn from_cents(cents: u64) -> Self {
        Self(Decimal::from_i128_with_scale(cents.min(MAX_CENTS) as i128, SCALE))
    }

    /// Create an amount from a whole number of reais
    pub fn from_reais(reais: u64) -> Self {
        Self::from_cents(reais.saturating_mul(100))
    }

    /// Create an amount from a float, rounding to the nearest centavo
    ///
    /// Used when reading the JSON documents, whose numbers are binary floats.
    pub fn from_f64(value: f64) -> Result<Self, AmountError> {
        let decimal = Decimal::from_f64(value)
            .ok_or_else(|| AmountError::Unparseable(value.to_string()))?;
        Self::new(decimal.round_dp(SCALE))
    }

    /// Lossy conversion to a float for the JSON documents
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }

    /// Get the inner decimal value
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if the amount is strictly greater than zero
    pub fn is_positive(&self) -> bool {
        !self.0.is_zero()
    }

    /// Addition, `None` if the result would exceed [`Amount::MAX`]
    pub fn checked_add(&self, other: Amount) -> Option<Amount> {
        self.0
            .checked_add(other.0)
            .filter(|sum| *sum <= Self::MAX.0)
            .map(Self)
    }

    /// Addition clamped to [`Amount::MAX`]
    pub fn saturating_add(&self, other: Amount) -> Amount {
        self.checked_add(other).unwrap_or(Self::MAX)
    }

    /// Subtraction, `None` if the result would be negative
    pub fn checked_sub(&self, other: Amount) -> Option<Amount> {
        if other.0 > self.0 {
            return None;
        }
        self.0.checked_sub(other.0).map(Self)
    }

    /// Format for display: `R$ 1,234.56`
    pub fn to_currency_string(&self) -> String {
        let plain = format!("{:.2}", self.0);
        let (whole, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

        let digits: Vec<char> = whole.chars().collect();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, digit) in digits.iter().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(*digit);
        }

        format!("R$ {}.{}", grouped, fraction)
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Parse user input such as `500`, `12.5` or `0.99`
    ///
    /// Only ASCII digits and a decimal point are accepted; signs, exponents,
    /// separators and whitespace inside the number are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let well_formed = !trimmed.is_empty()
            && trimmed.chars().all(|c| c.is_ascii_digit() || c == '.')
            && trimmed.chars().any(|c| c.is_ascii_digit());
        if !well_formed {
            return Err(AmountError::Unparseable(s.to_string()));
        }

        let value =
            Decimal::from_str(trimmed).map_err(|_| AmountError::Unparseable(s.to_string()))?;
        Self::new(value)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |acc, a| acc.saturating_add(a))
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |acc, a| acc.saturating_add(*a))
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        Amount::from_f64(raw).map_err(serde::de::Error::custom)
    }
}

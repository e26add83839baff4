//! # Money Module
//!
//! Provides the `Money` type for handling prices safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Catalog prices arrive as decimals ("10.99", 10.99) from the store     │
//! │  and from query strings (min_price=9.9).                                │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    "10.99"  → 1099 centavos   (stored, compared, filtered)             │
//! │    1099     → 10.99           (only at the JSON boundary)              │
//! │    1099     → "R$ 10,99"      (only for display)                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use emporio_core::money::Money;
//!
//! let price = Money::from_cents(1099);
//! assert_eq!(price.to_string(), "R$ 10,99");
//!
//! let bound = Money::parse("9,90").unwrap();
//! assert_eq!(bound.cents(), 990);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Mul, Sub};

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in centavos (1/100 of a real).
///
/// ## Wire Format
/// Serialized as a decimal JSON number (`10.99`) so existing front ends that
/// read `preco` as a number keep working. Deserializes from a number or a
/// decimal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole reais portion.
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavos portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Decimal representation used on the wire.
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Converts a decimal amount, rounding to the nearest centavo.
    ///
    /// Returns `None` for NaN, infinities and values outside the i64 range.
    pub fn from_decimal(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// Parses a decimal string such as `"10"`, `"10.5"` or `"10,50"`.
    ///
    /// ## Rules
    /// - `.` or `,` is accepted as the decimal separator
    /// - At most two fractional digits
    /// - No thousands separators
    ///
    /// ## Example
    /// ```rust
    /// use emporio_core::money::Money;
    ///
    /// assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
    /// assert_eq!(Money::parse("-3,07").unwrap().cents(), -307);
    /// assert!(Money::parse("1.999").is_err());
    /// assert!(Money::parse("abc").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        const FIELD: &str = "price";

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Required {
                field: FIELD.to_string(),
            });
        }

        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let normalized = digits.replace(',', ".");
        let (whole, fraction) = match normalized.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (normalized.as_str(), ""),
        };

        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::invalid_format(FIELD, "expected a decimal number"));
        }
        if fraction.len() > 2 || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::invalid_format(
                FIELD,
                "at most two decimal places are allowed",
            ));
        }

        let overflow = || ValidationError::invalid_format(FIELD, "value is too large");

        let whole: i64 = whole.parse().map_err(|_| overflow())?;
        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| overflow())? * 10,
            _ => fraction.parse().map_err(|_| overflow())?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .ok_or_else(overflow)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Display (pt-BR)
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let whole = (self.0 / 100).unsigned_abs().to_string();

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        write!(f, "{}R$ {},{:02}", sign, grouped, self.cents_part())
    }
}

// =============================================================================
// Serde
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Money::from_decimal(value)
                .ok_or_else(|| serde::de::Error::custom("price out of range")),
            Repr::Text(text) => Money::parse(&text).map_err(serde::de::Error::custom),
        }
    }
}

// =============================================================================
// Arithmetic
// =============================================================================

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, rhs: i64) -> Money {
        Money(self.0 * rhs)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! Fixed-scale decimal used for every monetary and rate calculation.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! A `FixedDecimal` always carries exactly four fractional digits. Sums and
//! differences are exact; products and quotients are computed at full
//! precision and then truncated toward zero to the ledger scale.
//!
//! Values whose four-place form does not fit the 96-bit mantissa are
//! rejected with [`DecimalError::Overflow`], so every arithmetic method
//! that can leave the range is fallible.

use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by decimal parsing and arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecimalError {
    /// Input is not a plain decimal literal.
    #[error("Invalid decimal value: '{0}'")]
    Invalid(String),

    /// Divisor was zero.
    #[error("Division by zero")]
    DivisionByZero,

    /// Result does not fit the decimal range.
    #[error("Decimal overflow")]
    Overflow,
}

/// Exact decimal held at the ledger's fixed scale of four places.
///
/// Serialized as a canonical string such as `"1000.0000"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FixedDecimal(Decimal);

impl FixedDecimal {
    /// Number of fractional digits carried by every value.
    pub const SCALE: u32 = 4;

    /// Zero at ledger scale (`"0.0000"`).
    pub const ZERO: Self = Self(Decimal::from_parts(0, 0, 0, false, Self::SCALE));

    /// One hundred, used for percentage math.
    pub const HUNDRED: Self = Self(Decimal::from_parts(1_000_000, 0, 0, false, Self::SCALE));

    /// Largest value representable at ledger scale.
    pub const MAX: Self = Self(Decimal::from_parts(
        u32::MAX,
        u32::MAX,
        u32::MAX,
        false,
        Self::SCALE,
    ));

    /// Builds a value from ten-thousandths: `from_units(12_500)` is `1.2500`.
    #[must_use]
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::new(units, Self::SCALE))
    }

    /// Wraps a `Decimal`, truncating toward zero to the ledger scale.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if the value has no four-place representation.
    pub fn from_decimal(value: Decimal) -> Result<Self, DecimalError> {
        let mut scaled = value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::ToZero);
        scaled.rescale(Self::SCALE);
        if scaled.scale() != Self::SCALE {
            return Err(DecimalError::Overflow);
        }
        if scaled.is_zero() {
            scaled.set_sign_positive(true);
        }
        Ok(Self(scaled))
    }

    /// Parses a plain decimal literal (`"42.5"`, `"-3"`, `"1000.0000"`).
    ///
    /// Scientific notation, grouping separators and empty input are rejected.
    /// Extra fractional digits beyond the ledger scale are truncated.
    pub fn parse(input: &str) -> Result<Self, DecimalError> {
        let trimmed = input.trim();
        let (negative, unsigned) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        if !is_unsigned_literal(unsigned) {
            return Err(DecimalError::Invalid(input.to_string()));
        }

        let literal = if unsigned.starts_with('.') {
            format!("0{unsigned}")
        } else {
            unsigned.to_string()
        };
        let value =
            Decimal::from_str(&literal).map_err(|_| DecimalError::Invalid(input.to_string()))?;
        Self::from_decimal(if negative { -value } else { value })
    }

    /// Returns the underlying `Decimal`.
    #[must_use]
    pub const fn as_decimal(self) -> Decimal {
        self.0
    }

    /// Quotient truncated to the ledger scale.
    pub fn divide(self, divisor: Self) -> Result<Self, DecimalError> {
        if divisor.is_zero() {
            return Err(DecimalError::DivisionByZero);
        }
        self.0
            .checked_div(divisor.0)
            .ok_or(DecimalError::Overflow)
            .and_then(Self::from_decimal)
    }

    /// Exact sum, or `Overflow`.
    pub fn checked_add(self, other: Self) -> Result<Self, DecimalError> {
        self.0
            .checked_add(other.0)
            .ok_or(DecimalError::Overflow)
            .and_then(Self::from_decimal)
    }

    /// Exact difference, or `Overflow`.
    pub fn checked_sub(self, other: Self) -> Result<Self, DecimalError> {
        self.0
            .checked_sub(other.0)
            .ok_or(DecimalError::Overflow)
            .and_then(Self::from_decimal)
    }

    /// Product truncated to the ledger scale, or `Overflow`.
    pub fn checked_mul(self, other: Self) -> Result<Self, DecimalError> {
        self.0
            .checked_mul(other.0)
            .ok_or(DecimalError::Overflow)
            .and_then(Self::from_decimal)
    }

    /// Sum of `values`, stopping at the first overflow.
    pub fn checked_sum<I>(values: I) -> Result<Self, DecimalError>
    where
        I: IntoIterator<Item = Self>,
    {
        values.into_iter().try_fold(Self::ZERO, Self::checked_add)
    }

    /// Returns true if the value is zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the value is strictly greater than zero.
    #[must_use]
    pub fn is_positive(self) -> bool {
        !self.0.is_zero() && self.0.is_sign_positive()
    }

    /// Returns true if the value is strictly less than zero.
    #[must_use]
    pub fn is_negative(self) -> bool {
        !self.0.is_zero() && self.0.is_sign_negative()
    }
}

fn is_unsigned_literal(s: &str) -> bool {
    let (int_part, frac_part) = match s.split_once('.') {
        Some((int_part, frac_part)) => {
            if frac_part.is_empty() {
                return false;
            }
            (int_part, frac_part)
        }
        None => (s, ""),
    };
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    !(int_part.is_empty() && frac_part.is_empty()) && all_digits(int_part) && all_digits(frac_part)
}

impl Default for FixedDecimal {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for FixedDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FixedDecimal {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FixedDecimal {
    type Error = DecimalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for FixedDecimal {
    type Error = DecimalError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<Decimal> for FixedDecimal {
    type Error = DecimalError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(value)
    }
}

impl From<FixedDecimal> for String {
    fn from(value: FixedDecimal) -> Self {
        value.to_string()
    }
}

impl Neg for FixedDecimal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        if self.is_zero() { self } else { Self(-self.0) }
    }
}

//! Money type with fixed-scale decimal precision and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `FixedDecimal`, which is exact at four decimal places.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::decimal::{DecimalError, FixedDecimal};

/// Errors that can occur when building or combining money values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Amount is not a valid decimal.
    #[error("Invalid money amount: {0}")]
    InvalidAmount(String),

    /// Currency code is not exactly three letters.
    #[error("Invalid currency code '{0}': expected 3 letters")]
    InvalidCurrency(String),

    /// Arithmetic across two different currencies.
    #[error("Currency mismatch: cannot combine {left} with {right}")]
    CurrencyMismatch {
        /// Currency of the left operand.
        left: Currency,
        /// Currency of the right operand.
        right: Currency,
    },

    /// Divisor was zero.
    #[error("Division by zero")]
    DivisionByZero,
}

impl From<DecimalError> for MoneyError {
    fn from(err: DecimalError) -> Self {
        match err {
            DecimalError::DivisionByZero => Self::DivisionByZero,
            other => Self::InvalidAmount(other.to_string()),
        }
    }
}

/// ISO 4217 style currency code: three ASCII letters, stored uppercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency([u8; 3]);

impl Currency {
    /// US Dollar.
    pub const USD: Self = Self(*b"USD");
    /// Euro.
    pub const EUR: Self = Self(*b"EUR");
    /// Indonesian Rupiah.
    pub const IDR: Self = Self(*b"IDR");

    /// Parses a currency code, case-insensitively.
    pub fn parse(code: &str) -> Result<Self, MoneyError> {
        let bytes = code.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(MoneyError::InvalidCurrency(code.to_string()));
        }

        let mut upper = [0u8; 3];
        for (slot, byte) in upper.iter_mut().zip(bytes) {
            *slot = byte.to_ascii_uppercase();
        }
        Ok(Self(upper))
    }

    /// Returns the uppercase code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = MoneyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.as_str().to_string()
    }
}

/// Represents a monetary amount with currency.
///
/// Immutable: every operation returns a new value and leaves its operands untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: FixedDecimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: FixedDecimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Validates and builds money from raw strings, e.g. `Money::of("42.50", "usd")`.
    pub fn of(amount: &str, currency: &str) -> Result<Self, MoneyError> {
        let amount = FixedDecimal::parse(amount)?;
        let currency = Currency::parse(currency)?;
        Ok(Self::new(amount, currency))
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self::new(FixedDecimal::ZERO, currency)
    }

    /// The amount.
    #[must_use]
    pub const fn amount(&self) -> FixedDecimal {
        self.amount
    }

    /// The currency.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Sum of two amounts in the same currency.
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, other: &Self) -> Result<Self, MoneyError> {
        self.ensure_same_currency(other)?;
        Ok(Self::new(self.amount.checked_add(other.amount)?, self.currency))
    }

    /// Difference of two amounts in the same currency.
    pub fn subtract(&self, other: &Self) -> Result<Self, MoneyError> {
        self.ensure_same_currency(other)?;
        Ok(Self::new(self.amount.checked_sub(other.amount)?, self.currency))
    }

    /// Scales the amount by a factor (truncated to ledger scale).
    pub fn multiply(&self, factor: FixedDecimal) -> Result<Self, MoneyError> {
        Ok(Self::new(self.amount.checked_mul(factor)?, self.currency))
    }

    /// Divides the amount by a scalar (truncated to ledger scale).
    pub fn divide(&self, divisor: FixedDecimal) -> Result<Self, MoneyError> {
        Ok(Self::new(self.amount.divide(divisor)?, self.currency))
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount.is_positive()
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_negative()
    }

    fn ensure_same_currency(&self, other: &Self) -> Result<(), MoneyError> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(MoneyError::CurrencyMismatch {
                left: self.currency,
                right: other.currency,
            })
        }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn usd(amount: &str) -> Money {
        Money::of(amount, "USD").unwrap()
    }

    #[test]
    fn test_money_of() {
        let money = Money::of("42.5", "usd").unwrap();
        assert_eq!(money.amount().to_string(), "42.5000");
        assert_eq!(money.currency(), Currency::USD);
        assert_eq!(money.to_string(), "42.5000 USD");
    }

    #[rstest]
    #[case("abc", "USD")]
    #[case("", "USD")]
    #[case("1e5", "USD")]
    #[case("10000000000000000000000000", "USD")]
    fn test_money_of_rejects_bad_amount(#[case] amount: &str, #[case] currency: &str) {
        assert!(matches!(
            Money::of(amount, currency),
            Err(MoneyError::InvalidAmount(_))
        ));
    }

    #[rstest]
    #[case("US")]
    #[case("USDX")]
    #[case("U5D")]
    #[case("")]
    #[case(" US")]
    fn test_money_of_rejects_bad_currency(#[case] currency: &str) {
        assert!(matches!(
            Money::of("1.00", currency),
            Err(MoneyError::InvalidCurrency(_))
        ));
    }

    #[test]
    fn test_money_zero() {
        let money = Money::zero(Currency::IDR);
        assert!(money.is_zero());
        assert!(!money.is_positive());
        assert!(!money.is_negative());
        assert_eq!(money.amount().to_string(), "0.0000");
    }

    #[test]
    fn test_add_does_not_mutate_operands() {
        let a = usd("10.00");
        let b = usd("2.50");
        let before = a.amount();
        let sum = a.add(&b).unwrap();
        assert_eq!(sum.amount().to_string(), "12.5000");
        assert_eq!(a.amount(), before);
        assert_eq!(b.amount().to_string(), "2.5000");
    }

    #[test]
    fn test_currency_mismatch_rejected() {
        let result = usd("1.00").add(&Money::of("1.00", "EUR").unwrap());
        assert_eq!(
            result,
            Err(MoneyError::CurrencyMismatch {
                left: Currency::USD,
                right: Currency::EUR,
            })
        );
        assert!(usd("1.00").subtract(&Money::of("1.00", "eur").unwrap()).is_err());
    }

    #[test]
    fn test_subtract_multiply_divide() {
        assert_eq!(
            usd("10").subtract(&usd("12.5")).unwrap().amount().to_string(),
            "-2.5000"
        );
        assert!(usd("10").subtract(&usd("12.5")).unwrap().is_negative());
        assert_eq!(
            usd("66.6666")
                .multiply(FixedDecimal::parse("0.15").unwrap())
                .unwrap()
                .amount()
                .to_string(),
            "9.9999"
        );
        assert_eq!(
            usd("100")
                .divide(FixedDecimal::parse("3").unwrap())
                .unwrap()
                .amount()
                .to_string(),
            "33.3333"
        );
    }

    #[test]
    fn test_divide_by_zero_rejected() {
        assert_eq!(
            usd("100").divide(FixedDecimal::ZERO),
            Err(MoneyError::DivisionByZero)
        );
    }

    #[test]
    fn test_money_serializes_amount_as_string() {
        let json = serde_json::to_value(usd("1000")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "amount": "1000.0000", "currency": "USD" })
        );
        let back: Money =
            serde_json::from_value(serde_json::json!({ "amount": "5", "currency": "eur" }))
                .unwrap();
        assert_eq!(back, Money::of("5", "EUR").unwrap());
    }

    #[test]
    fn test_currency_display_and_parse() {
        assert_eq!(Currency::parse("idr").unwrap().to_string(), "IDR");
        assert_eq!("eur".parse::<Currency>().unwrap(), Currency::EUR);
    }
}

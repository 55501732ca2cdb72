//! Named percentage or fixed charges.

use serde::{Deserialize, Serialize};
use tally_shared::types::{DecimalError, FixedDecimal, TaxRateId, TenantId};

use crate::ledger::LedgerError;

/// How a rate applies to a base amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxType {
    /// `base * rate / 100`.
    Percentage,
    /// `rate`, whatever the base.
    Fixed,
}

/// A tax rate definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate {
    /// Unique identifier.
    pub id: TaxRateId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Display name, e.g. "VAT".
    pub name: String,
    /// Percentage points or a flat amount, depending on `tax_type`.
    pub rate: FixedDecimal,
    /// Percentage or fixed.
    pub tax_type: TaxType,
    /// Inactive rates are skipped by [`calculate_taxes`].
    pub is_active: bool,
    /// Compound rates apply on the base plus taxes computed before them.
    pub is_compound: bool,
}

impl TaxRate {
    /// Creates an active, simple rate.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTaxRate` for a blank name or a negative rate.
    pub fn new(
        id: TaxRateId,
        tenant_id: TenantId,
        name: impl Into<String>,
        rate: FixedDecimal,
        tax_type: TaxType,
    ) -> Result<Self, LedgerError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(LedgerError::InvalidTaxRate("name must not be blank".into()));
        }
        if rate.is_negative() {
            return Err(LedgerError::InvalidTaxRate(format!(
                "rate must not be negative, got {rate}"
            )));
        }
        Ok(Self {
            id,
            tenant_id,
            name,
            rate,
            tax_type,
            is_active: true,
            is_compound: false,
        })
    }

    /// Sets the compound flag.
    #[must_use]
    pub fn with_compound(mut self, is_compound: bool) -> Self {
        self.is_compound = is_compound;
        self
    }

    /// Sets the active flag.
    #[must_use]
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Tax due on `base`.
    ///
    /// Percentage rates compute `base * rate / 100` at full precision and
    /// truncate once to ledger scale. Fixed rates return `rate` unchanged.
    ///
    /// # Errors
    ///
    /// Returns `DecimalError::Overflow` if the product does not fit.
    pub fn calculate_tax(&self, base: FixedDecimal) -> Result<FixedDecimal, DecimalError> {
        match self.tax_type {
            TaxType::Fixed => Ok(self.rate),
            TaxType::Percentage => base
                .as_decimal()
                .checked_mul(self.rate.as_decimal())
                .and_then(|product| product.checked_div(FixedDecimal::HUNDRED.as_decimal()))
                .ok_or(DecimalError::Overflow)
                .and_then(FixedDecimal::from_decimal),
        }
    }
}

/// One applied rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxLine {
    /// Rate that produced this line.
    pub tax_rate_id: TaxRateId,
    /// Rate name.
    pub name: String,
    /// Amount the rate was applied to.
    pub taxable_amount: FixedDecimal,
    /// Tax due.
    pub tax_amount: FixedDecimal,
}

/// Result of applying several rates to one base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxBreakdown {
    /// The untaxed amount.
    pub base: FixedDecimal,
    /// Applied rates in order.
    pub lines: Vec<TaxLine>,
    /// Sum of all tax lines.
    pub total_tax: FixedDecimal,
    /// `base + total_tax`.
    pub total: FixedDecimal,
}

/// Applies the active `rates` to `base` in order.
///
/// Simple rates apply to `base`. Compound rates apply to `base` plus
/// every tax computed before them.
///
/// # Errors
///
/// Returns `LedgerError::Money` on overflow.
pub fn calculate_taxes(base: FixedDecimal, rates: &[TaxRate]) -> Result<TaxBreakdown, LedgerError> {
    let mut lines = Vec::new();
    let mut total_tax = FixedDecimal::ZERO;

    for rate in rates.iter().filter(|r| r.is_active) {
        let taxable_amount = if rate.is_compound {
            base.checked_add(total_tax)?
        } else {
            base
        };
        let tax_amount = rate.calculate_tax(taxable_amount)?;
        total_tax = total_tax.checked_add(tax_amount)?;
        lines.push(TaxLine {
            tax_rate_id: rate.id,
            name: rate.name.clone(),
            taxable_amount,
            tax_amount,
        });
    }

    Ok(TaxBreakdown {
        base,
        lines,
        total_tax,
        total: base.checked_add(total_tax)?,
    })
}

//! Journal entry aggregate: header, ordered lines and posting state machine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tally_shared::types::{
    AccountId, Currency, DecimalError, FiscalPeriodId, FixedDecimal, JournalEntryId,
    JournalLineId, Money, TenantId,
};

use super::error::LedgerError;
use super::types::EntryTotals;

/// Side of a journal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Debit entry (increases assets/expenses, decreases liabilities/equity/revenue).
    Debit,
    /// Credit entry (decreases assets/expenses, increases liabilities/equity/revenue).
    Credit,
}

impl EntryType {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Journal entry status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalStatus {
    /// Initial state, freely editable.
    #[default]
    Draft,
    /// Counts toward balances and reports; immutable.
    Posted,
    /// Abandoned draft; immutable.
    Cancelled,
}

impl JournalStatus {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Posted => "posted",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns true if the entry can still be edited.
    #[must_use]
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Computes the status after moving to `target`.
    ///
    /// Only `draft -> posted` and `draft -> cancelled` exist. Leaving a
    /// terminal state reports which terminal state blocked it.
    ///
    /// # Errors
    ///
    /// Returns `CannotModifyPosted`, `CannotModifyCancelled`, or
    /// `InvalidTransition` for every other pair.
    pub fn transition_to(self, target: Self) -> Result<Self, LedgerError> {
        match (self, target) {
            (Self::Draft, Self::Posted | Self::Cancelled) => Ok(target),
            (Self::Posted, _) => Err(LedgerError::CannotModifyPosted),
            (Self::Cancelled, _) => Err(LedgerError::CannotModifyCancelled),
            (Self::Draft, Self::Draft) => Err(LedgerError::InvalidTransition {
                from: self,
                to: target,
            }),
        }
    }
}

impl std::fmt::Display for JournalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One leg of a journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    /// Unique identifier for this line.
    pub id: JournalLineId,
    /// The entry this line belongs to.
    pub entry_id: JournalEntryId,
    /// The account affected by this line.
    pub account_id: AccountId,
    /// Whether this is a debit or credit.
    pub entry_type: EntryType,
    /// Strictly positive amount in the entry currency.
    pub amount: FixedDecimal,
    /// Optional description for this line item.
    pub description: Option<String>,
    /// 1-based position within the entry.
    pub line_number: u32,
}

/// A transaction header with its ordered lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier.
    pub id: JournalEntryId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Fiscal period the entry books into.
    pub fiscal_period_id: Option<FiscalPeriodId>,
    /// Human-readable reference, unique per tenant.
    pub reference_number: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Accounting date.
    pub entry_date: NaiveDate,
    /// Currency shared by every line's account.
    pub currency: Currency,
    /// Lifecycle status.
    pub status: JournalStatus,
    /// Lines in input order.
    pub lines: Vec<JournalLine>,
}

impl JournalEntry {
    /// Debit and credit totals over all lines.
    ///
    /// # Errors
    ///
    /// Returns `DecimalError::Overflow` if a side does not fit.
    pub fn totals(&self) -> Result<EntryTotals, DecimalError> {
        EntryTotals::from_lines(self.lines.iter().map(|l| (l.entry_type, l.amount)))
    }

    /// Total debits as money.
    ///
    /// # Errors
    ///
    /// Returns `DecimalError::Overflow` if the debit side does not fit.
    pub fn debit_total(&self) -> Result<Money, DecimalError> {
        Ok(Money::new(self.totals()?.debit, self.currency))
    }

    /// Total credits as money.
    ///
    /// # Errors
    ///
    /// Returns `DecimalError::Overflow` if the credit side does not fit.
    pub fn credit_total(&self) -> Result<Money, DecimalError> {
        Ok(Money::new(self.totals()?.credit, self.currency))
    }

    /// Returns true if any line touches `account_id`.
    #[must_use]
    pub fn involves_account(&self, account_id: AccountId) -> bool {
        self.lines.iter().any(|l| l.account_id == account_id)
    }
}

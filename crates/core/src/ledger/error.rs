//! Ledger error types for validation, lookup, and state errors.
//!
//! Every failure of the accounting core is a `LedgerError`. Callers use
//! [`LedgerError::kind`] to tell caller mistakes (validation), missing
//! records (not found), and operations the current state forbids
//! (state conflict) apart from storage failures.

use chrono::NaiveDate;
use tally_shared::types::{
    AccountId, Currency, DecimalError, FiscalPeriodId, FixedDecimal, JournalEntryId, MoneyError,
};
use tally_shared::AppError;
use thiserror::Error;

use super::entry::JournalStatus;

/// Broad classification of a [`LedgerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input shape violates a rule; nothing was persisted.
    Validation,
    /// A lookup by id missed.
    NotFound,
    /// Input is fine but the current state forbids the operation.
    StateConflict,
    /// Storage layer failure, propagated unmodified.
    Persistence,
}

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Journal entry must have at least 2 lines.
    #[error("Journal entry must have at least 2 lines")]
    InsufficientLines,

    /// Journal entry is not balanced (debits != credits).
    #[error("Journal entry is unbalanced: debits {debit} != credits {credit}")]
    Unbalanced {
        /// Total debit amount.
        debit: FixedDecimal,
        /// Total credit amount.
        credit: FixedDecimal,
    },

    /// Line amount cannot be zero.
    #[error("Line {line}: amount must be greater than zero")]
    ZeroAmount {
        /// 1-based line position.
        line: usize,
    },

    /// Line amount cannot be negative.
    #[error("Line {line}: amount cannot be negative")]
    NegativeAmount {
        /// 1-based line position.
        line: usize,
    },

    /// A required text field was empty.
    #[error("{0} must not be blank")]
    BlankField(&'static str),

    /// Start date after end date.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Entry date falls outside the referenced fiscal period.
    #[error("Entry date {date} is outside fiscal period {period}")]
    DateOutsidePeriod {
        /// Entry date.
        date: NaiveDate,
        /// Referenced period.
        period: FiscalPeriodId,
    },

    /// Configuration demands a fiscal period on every entry.
    #[error("Journal entry must reference a fiscal period")]
    FiscalPeriodRequired,

    /// Account is inactive and cannot be used.
    #[error("Account {0} is inactive")]
    AccountInactive(AccountId),

    /// Header accounts aggregate children and cannot take lines.
    #[error("Account {0} is a header account and does not allow direct posting")]
    AccountNotPostable(AccountId),

    /// Lines reference accounts in different currencies.
    #[error("Journal entry mixes currencies: expected {expected}, found {found}")]
    MixedCurrencies {
        /// Currency of the first line's account.
        expected: Currency,
        /// Conflicting currency.
        found: Currency,
    },

    /// Proposed parent is the account itself or one of its descendants.
    #[error("Account {account} cannot be placed under {parent}: hierarchy would contain a cycle")]
    HierarchyCycle {
        /// Account being moved.
        account: AccountId,
        /// Proposed parent.
        parent: AccountId,
    },

    /// Tax rate definition is invalid.
    #[error("Invalid tax rate: {0}")]
    InvalidTaxRate(String),

    /// Malformed amount or currency.
    #[error(transparent)]
    Money(#[from] MoneyError),

    // ========== Not Found ==========
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Journal entry not found.
    #[error("Journal entry not found: {0}")]
    JournalEntryNotFound(JournalEntryId),

    /// Fiscal period not found.
    #[error("Fiscal period not found: {0}")]
    FiscalPeriodNotFound(FiscalPeriodId),

    // ========== State Conflicts ==========
    /// Fiscal period is closed, no posting allowed.
    #[error("Fiscal period {0} is closed, no posting allowed")]
    PeriodClosed(FiscalPeriodId),

    /// Fiscal period was already closed.
    #[error("Fiscal period {0} is already closed")]
    PeriodAlreadyClosed(FiscalPeriodId),

    /// Fiscal period overlaps an existing one.
    #[error("Fiscal period overlaps existing period '{0}'")]
    OverlappingPeriod(String),

    /// Account code already exists for the tenant.
    #[error("Account code '{0}' already exists")]
    DuplicateAccountCode(String),

    /// Reference number already exists for the tenant.
    #[error("Reference number '{0}' already exists")]
    DuplicateReference(String),

    /// Cannot modify a posted journal entry.
    #[error("Cannot modify posted journal entry")]
    CannotModifyPosted,

    /// Cannot modify a cancelled journal entry.
    #[error("Cannot modify cancelled journal entry")]
    CannotModifyCancelled,

    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: JournalStatus,
        /// The attempted target status.
        to: JournalStatus,
    },

    // ========== Persistence ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Classifies the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InsufficientLines
            | Self::Unbalanced { .. }
            | Self::ZeroAmount { .. }
            | Self::NegativeAmount { .. }
            | Self::BlankField(_)
            | Self::InvalidDateRange { .. }
            | Self::DateOutsidePeriod { .. }
            | Self::FiscalPeriodRequired
            | Self::AccountInactive(_)
            | Self::AccountNotPostable(_)
            | Self::MixedCurrencies { .. }
            | Self::HierarchyCycle { .. }
            | Self::InvalidTaxRate(_)
            | Self::Money(_) => ErrorKind::Validation,

            Self::AccountNotFound(_)
            | Self::JournalEntryNotFound(_)
            | Self::FiscalPeriodNotFound(_) => ErrorKind::NotFound,

            Self::PeriodClosed(_)
            | Self::PeriodAlreadyClosed(_)
            | Self::OverlappingPeriod(_)
            | Self::DuplicateAccountCode(_)
            | Self::DuplicateReference(_)
            | Self::CannotModifyPosted
            | Self::CannotModifyCancelled
            | Self::InvalidTransition { .. } => ErrorKind::StateConflict,

            Self::Database(_) | Self::Internal(_) => ErrorKind::Persistence,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientLines => "INSUFFICIENT_LINES",
            Self::Unbalanced { .. } => "UNBALANCED_ENTRY",
            Self::ZeroAmount { .. } => "ZERO_AMOUNT",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::BlankField(_) => "BLANK_FIELD",
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::DateOutsidePeriod { .. } => "DATE_OUTSIDE_PERIOD",
            Self::FiscalPeriodRequired => "FISCAL_PERIOD_REQUIRED",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
            Self::AccountNotPostable(_) => "ACCOUNT_NOT_POSTABLE",
            Self::MixedCurrencies { .. } => "MIXED_CURRENCIES",
            Self::HierarchyCycle { .. } => "HIERARCHY_CYCLE",
            Self::InvalidTaxRate(_) => "INVALID_TAX_RATE",
            Self::Money(_) => "INVALID_MONEY",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::JournalEntryNotFound(_) => "JOURNAL_ENTRY_NOT_FOUND",
            Self::FiscalPeriodNotFound(_) => "FISCAL_PERIOD_NOT_FOUND",
            Self::PeriodClosed(_) => "PERIOD_CLOSED",
            Self::PeriodAlreadyClosed(_) => "PERIOD_ALREADY_CLOSED",
            Self::OverlappingPeriod(_) => "OVERLAPPING_PERIOD",
            Self::DuplicateAccountCode(_) => "DUPLICATE_ACCOUNT_CODE",
            Self::DuplicateReference(_) => "DUPLICATE_REFERENCE",
            Self::CannotModifyPosted => "CANNOT_MODIFY_POSTED",
            Self::CannotModifyCancelled => "CANNOT_MODIFY_CANCELLED",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::StateConflict => 409,
            ErrorKind::Persistence => 500,
        }
    }
}

impl From<DecimalError> for LedgerError {
    fn from(err: DecimalError) -> Self {
        Self::Money(MoneyError::from(err))
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::Validation => Self::Validation(message),
            ErrorKind::NotFound => Self::NotFound(message),
            ErrorKind::StateConflict => Self::Conflict(message),
            ErrorKind::Persistence => match err {
                LedgerError::Database(inner) => Self::Database(inner),
                _ => Self::Internal(message),
            },
        }
    }
}

//! Ledger service for journal entry validation and resolution.
//!
//! Pure business logic: callers load the accounts and period, then hand
//! them in. Nothing here performs I/O.

use chrono::NaiveDate;
use tally_shared::types::{AccountId, Currency};

use super::entry::JournalStatus;
use super::error::LedgerError;
use super::types::{
    CreateJournalEntryInput, EntryTotals, JournalLineInput, NewJournalEntry, NewJournalLine,
};
use super::validation::validate_lines;
use crate::accounts::Account;
use crate::fiscal::FiscalPeriod;

/// Information about an account needed for validation.
#[derive(Debug, Clone)]
pub struct AccountInfo {
    /// The account ID.
    pub id: AccountId,
    /// Whether the account is active.
    pub is_active: bool,
    /// Whether the account is an aggregation-only header.
    pub is_header: bool,
    /// The account's currency.
    pub currency: Currency,
}

impl From<&Account> for AccountInfo {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            is_active: account.is_active,
            is_header: account.is_header,
            currency: account.currency,
        }
    }
}

impl AccountInfo {
    /// Checks that lines may target this account.
    ///
    /// # Errors
    ///
    /// Returns `AccountInactive` or `AccountNotPostable` for header accounts.
    pub fn ensure_postable(&self) -> Result<(), LedgerError> {
        if !self.is_active {
            return Err(LedgerError::AccountInactive(self.id));
        }
        if self.is_header {
            return Err(LedgerError::AccountNotPostable(self.id));
        }
        Ok(())
    }
}

/// Ledger service for journal entry validation and resolution.
pub struct LedgerService;

impl LedgerService {
    /// Checks everything that needs no stored data.
    ///
    /// 1. Validates line count, amounts and balance
    /// 2. Requires a non-blank reference number
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate_input(input: &CreateJournalEntryInput) -> Result<EntryTotals, LedgerError> {
        let totals = validate_lines(&input.lines)?;
        if input.reference_number.trim().is_empty() {
            return Err(LedgerError::BlankField("reference_number"));
        }
        Ok(totals)
    }

    /// Resolve a validated entry against its accounts.
    ///
    /// Validates accounts (exist, active, postable) and requires a single
    /// currency across all of them.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if an account check fails.
    pub fn resolve<A>(
        input: &CreateJournalEntryInput,
        account_lookup: A,
    ) -> Result<(NewJournalEntry, Vec<NewJournalLine>), LedgerError>
    where
        A: Fn(AccountId) -> Result<AccountInfo, LedgerError>,
    {
        let (currency, lines) = Self::resolve_lines(&input.lines, account_lookup)?;

        let header = NewJournalEntry {
            fiscal_period_id: input.fiscal_period_id,
            reference_number: input.reference_number.trim().to_string(),
            description: input.description.clone(),
            entry_date: input.entry_date,
            currency,
        };
        Ok((header, lines))
    }

    /// Checks every line's account and numbers the lines.
    ///
    /// # Errors
    ///
    /// Returns the lookup error, `AccountInactive`, `AccountNotPostable`
    /// or `MixedCurrencies`.
    pub fn resolve_lines<A>(
        lines: &[JournalLineInput],
        account_lookup: A,
    ) -> Result<(Currency, Vec<NewJournalLine>), LedgerError>
    where
        A: Fn(AccountId) -> Result<AccountInfo, LedgerError>,
    {
        let mut currency: Option<Currency> = None;
        let mut resolved = Vec::with_capacity(lines.len());

        for (line_number, line) in (1u32..).zip(lines) {
            let info = account_lookup(line.account_id)?;
            info.ensure_postable()?;

            match currency {
                None => currency = Some(info.currency),
                Some(expected) if expected != info.currency => {
                    return Err(LedgerError::MixedCurrencies {
                        expected,
                        found: info.currency,
                    });
                }
                Some(_) => {}
            }

            resolved.push(NewJournalLine {
                account_id: line.account_id,
                entry_type: line.entry_type,
                amount: line.amount,
                description: line.description.clone(),
                line_number,
            });
        }

        let currency = currency.ok_or(LedgerError::InsufficientLines)?;
        Ok((currency, resolved))
    }

    /// Checks that `period` is open and contains `entry_date`.
    ///
    /// # Errors
    ///
    /// Returns `PeriodClosed` or `DateOutsidePeriod`.
    pub fn ensure_period_accepts(
        period: &FiscalPeriod,
        entry_date: NaiveDate,
    ) -> Result<(), LedgerError> {
        period.ensure_open()?;
        if !period.contains_date(entry_date) {
            return Err(LedgerError::DateOutsidePeriod {
                date: entry_date,
                period: period.id,
            });
        }
        Ok(())
    }

    /// Validate that an entry can be modified.
    ///
    /// # Errors
    ///
    /// Returns error if the entry is posted or cancelled.
    pub fn validate_can_modify(status: JournalStatus) -> Result<(), LedgerError> {
        if status.is_editable() {
            Ok(())
        } else if status == JournalStatus::Posted {
            Err(LedgerError::CannotModifyPosted)
        } else {
            Err(LedgerError::CannotModifyCancelled)
        }
    }
}

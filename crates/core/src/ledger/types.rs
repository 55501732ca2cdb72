//! Ledger domain types for journal entry creation and querying.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, Currency, DecimalError, FiscalPeriodId, FixedDecimal};

use super::entry::{EntryType, JournalEntry, JournalStatus};

/// Input for a single journal line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalLineInput {
    /// The account to post to.
    pub account_id: AccountId,
    /// Whether this is a debit or credit line.
    pub entry_type: EntryType,
    /// The amount (must be positive).
    pub amount: FixedDecimal,
    /// Optional description for this line.
    #[serde(default)]
    pub description: Option<String>,
}

/// Input for creating or rewriting a journal entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJournalEntryInput {
    /// Fiscal period the entry books into.
    #[serde(default)]
    pub fiscal_period_id: Option<FiscalPeriodId>,
    /// Human-readable reference (unique per tenant).
    pub reference_number: String,
    /// A description of the entry.
    #[serde(default)]
    pub description: Option<String>,
    /// The accounting date.
    pub entry_date: NaiveDate,
    /// The lines (must have at least 2).
    pub lines: Vec<JournalLineInput>,
}

/// Validated header handed to the repository. New entries always start as drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJournalEntry {
    /// Fiscal period.
    pub fiscal_period_id: Option<FiscalPeriodId>,
    /// Reference number, trimmed.
    pub reference_number: String,
    /// Description.
    pub description: Option<String>,
    /// Accounting date.
    pub entry_date: NaiveDate,
    /// Currency of every line's account.
    pub currency: Currency,
}

/// Validated line handed to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJournalLine {
    /// Target account.
    pub account_id: AccountId,
    /// Debit or credit.
    pub entry_type: EntryType,
    /// Positive amount.
    pub amount: FixedDecimal,
    /// Description.
    pub description: Option<String>,
    /// 1-based position.
    pub line_number: u32,
}

/// Debit and credit sums of a set of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EntryTotals {
    /// Total debit amount.
    pub debit: FixedDecimal,
    /// Total credit amount.
    pub credit: FixedDecimal,
}

impl EntryTotals {
    /// Sums `(side, amount)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if either side leaves the decimal range.
    pub fn from_lines(
        lines: impl IntoIterator<Item = (EntryType, FixedDecimal)>,
    ) -> Result<Self, DecimalError> {
        lines
            .into_iter()
            .try_fold(Self::default(), |mut totals, (entry_type, amount)| {
                match entry_type {
                    EntryType::Debit => totals.debit = totals.debit.checked_add(amount)?,
                    EntryType::Credit => totals.credit = totals.credit.checked_add(amount)?,
                }
                Ok(totals)
            })
    }

    /// Returns true if debits equal credits exactly.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.debit == self.credit
    }
}

/// Criteria for listing journal entries. Empty fields match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryFilter {
    /// Only entries in this status.
    #[serde(default)]
    pub status: Option<JournalStatus>,
    /// Only entries in this fiscal period.
    #[serde(default)]
    pub fiscal_period_id: Option<FiscalPeriodId>,
    /// Only entries with a line on this account.
    #[serde(default)]
    pub account_id: Option<AccountId>,
    /// Entry date on or after.
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    /// Entry date on or before.
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
}

impl EntryFilter {
    /// Returns true if `entry` satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, entry: &JournalEntry) -> bool {
        self.status.is_none_or(|s| entry.status == s)
            && self
                .fiscal_period_id
                .is_none_or(|p| entry.fiscal_period_id == Some(p))
            && self.account_id.is_none_or(|a| entry.involves_account(a))
            && self.date_from.is_none_or(|d| entry.entry_date >= d)
            && self.date_to.is_none_or(|d| entry.entry_date <= d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tally_shared::types::{JournalEntryId, JournalLineId, TenantId};

    use crate::ledger::entry::JournalLine;

    fn entry(status: JournalStatus, day: u32) -> JournalEntry {
        JournalEntry {
            id: JournalEntryId(1),
            tenant_id: TenantId(1),
            fiscal_period_id: Some(FiscalPeriodId(7)),
            reference_number: "JE-1".into(),
            description: None,
            entry_date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            currency: Currency::USD,
            status,
            lines: vec![JournalLine {
                id: JournalLineId(1),
                entry_id: JournalEntryId(1),
                account_id: AccountId(3),
                entry_type: EntryType::Debit,
                amount: dec!(1).try_into().unwrap(),
                description: None,
                line_number: 1,
            }],
        }
    }

    #[test]
    fn test_totals_exact() {
        let totals = EntryTotals::from_lines([
            (EntryType::Debit, FixedDecimal::try_from(dec!(0.1)).unwrap()),
            (EntryType::Debit, FixedDecimal::try_from(dec!(0.2)).unwrap()),
            (EntryType::Credit, FixedDecimal::try_from(dec!(0.3)).unwrap()),
        ])
        .unwrap();
        assert!(totals.is_balanced());
        assert_eq!(totals.credit.to_string(), "0.3000");
    }

    #[test]
    fn test_totals_report_overflow() {
        let huge = FixedDecimal::MAX;
        let result = EntryTotals::from_lines([
            (EntryType::Debit, huge),
            (EntryType::Debit, huge),
            (EntryType::Credit, FixedDecimal::from_units(10_000)),
        ]);
        assert_eq!(result, Err(DecimalError::Overflow));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(EntryFilter::default().matches(&entry(JournalStatus::Cancelled, 1)));
    }

    #[test]
    fn test_filter_criteria() {
        let e = entry(JournalStatus::Posted, 15);
        let date = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();

        let by_status = EntryFilter {
            status: Some(JournalStatus::Draft),
            ..Default::default()
        };
        assert!(!by_status.matches(&e));

        let by_range = EntryFilter {
            date_from: Some(date(15)),
            date_to: Some(date(15)),
            ..Default::default()
        };
        assert!(by_range.matches(&e));

        let after = EntryFilter {
            date_from: Some(date(16)),
            ..Default::default()
        };
        assert!(!after.matches(&e));

        let by_account = EntryFilter {
            account_id: Some(AccountId(3)),
            fiscal_period_id: Some(FiscalPeriodId(7)),
            ..Default::default()
        };
        assert!(by_account.matches(&e));

        let other_period = EntryFilter {
            fiscal_period_id: Some(FiscalPeriodId(8)),
            ..Default::default()
        };
        assert!(!other_period.matches(&e));
    }

    #[test]
    fn test_line_input_parses_string_amount() {
        let input: JournalLineInput = serde_json::from_value(serde_json::json!({
            "account_id": 5,
            "entry_type": "credit",
            "amount": "1000.00"
        }))
        .unwrap();
        assert_eq!(input.amount.to_string(), "1000.0000");
        assert_eq!(input.entry_type, EntryType::Credit);
    }
}

//! Fiscal period types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tally_shared::types::{FiscalPeriodId, TenantId};

use crate::ledger::LedgerError;

/// A bounded accounting window. Closing is one-way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalPeriod {
    /// Unique identifier.
    pub id: FiscalPeriodId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Period name (e.g., "January 2026").
    pub name: String,
    /// Start date of the period.
    pub start_date: NaiveDate,
    /// End date of the period (inclusive).
    pub end_date: NaiveDate,
    /// Closed periods accept no new or posted entries.
    pub is_closed: bool,
}

impl FiscalPeriod {
    /// Returns true if entries can be created in or posted to this period.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.is_closed
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns true if the two periods share at least one day.
    #[must_use]
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        date_ranges_overlap(self.start_date, self.end_date, start, end)
    }

    /// # Errors
    ///
    /// Returns `PeriodClosed` if the period is closed.
    pub fn ensure_open(&self) -> Result<(), LedgerError> {
        if self.is_closed {
            return Err(LedgerError::PeriodClosed(self.id));
        }
        Ok(())
    }

    /// Marks the period closed.
    ///
    /// # Errors
    ///
    /// Returns `PeriodAlreadyClosed` when called twice.
    pub fn close(&mut self) -> Result<(), LedgerError> {
        if self.is_closed {
            return Err(LedgerError::PeriodAlreadyClosed(self.id));
        }
        self.is_closed = true;
        Ok(())
    }
}

/// Input for creating a fiscal period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFiscalPeriodInput {
    /// Period name.
    pub name: String,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day (inclusive).
    pub end_date: NaiveDate,
}

/// Validated period handed to the repository. New periods are open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFiscalPeriod {
    /// Period name, trimmed.
    pub name: String,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
}

impl CreateFiscalPeriodInput {
    /// Validates name and range.
    ///
    /// # Errors
    ///
    /// Returns `BlankField` or `InvalidDateRange`.
    pub fn validate(&self) -> Result<NewFiscalPeriod, LedgerError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(LedgerError::BlankField("name"));
        }
        validate_date_range(self.start_date, self.end_date)?;
        Ok(NewFiscalPeriod {
            name: name.to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

/// Validates that `start` is not after `end`. Single-day periods are allowed.
///
/// # Errors
///
/// Returns `InvalidDateRange` if `start > end`.
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), LedgerError> {
    if start > end {
        return Err(LedgerError::InvalidDateRange { start, end });
    }
    Ok(())
}

/// Returns true if two inclusive date ranges overlap.
#[must_use]
pub fn date_ranges_overlap(
    start1: NaiveDate,
    end1: NaiveDate,
    start2: NaiveDate,
    end2: NaiveDate,
) -> bool {
    start1 <= end2 && start2 <= end1
}

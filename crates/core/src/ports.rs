//! Repository contracts and the unit of work.
//!
//! The storage crate implements these traits. Every call names its tenant
//! explicitly and every mutating service operation runs inside one
//! [`LedgerSession`]: writes become visible on [`LedgerSession::commit`]
//! and are discarded if the session is dropped first.

use std::future::Future;

use serde::Serialize;
use tally_shared::types::{
    AccountId, FiscalPeriodId, FixedDecimal, JournalEntryId, TenantId,
};

use crate::accounts::{Account, AccountType, NewAccount};
use crate::fiscal::{FiscalPeriod, NewFiscalPeriod};
use crate::ledger::{
    EntryFilter, EntryType, JournalEntry, JournalStatus, LedgerError, NewJournalEntry,
    NewJournalLine,
};

/// A posted journal line joined with its account, as reports consume it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostedLine {
    /// Entry the line belongs to.
    pub entry_id: JournalEntryId,
    /// Target account.
    pub account_id: AccountId,
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Debit or credit.
    pub entry_type: EntryType,
    /// Line amount.
    pub amount: FixedDecimal,
}

/// Chart-of-accounts persistence.
pub trait AccountRepository: Send + Sync {
    /// All accounts of the tenant, ordered by code.
    fn all(
        &self,
        tenant_id: TenantId,
    ) -> impl Future<Output = Result<Vec<Account>, LedgerError>> + Send;

    /// Find an account by ID or fail with `AccountNotFound`.
    fn find_or_fail(
        &self,
        tenant_id: TenantId,
        id: AccountId,
    ) -> impl Future<Output = Result<Account, LedgerError>> + Send;

    /// Find an account by code.
    fn find_by_code(
        &self,
        tenant_id: TenantId,
        code: &str,
    ) -> impl Future<Output = Result<Option<Account>, LedgerError>> + Send;

    /// Insert a new account and assign its ID.
    fn create(
        &mut self,
        tenant_id: TenantId,
        account: NewAccount,
    ) -> impl Future<Output = Result<Account, LedgerError>> + Send;

    /// Replace the stored account with the same ID.
    fn update(
        &mut self,
        tenant_id: TenantId,
        account: Account,
    ) -> impl Future<Output = Result<Account, LedgerError>> + Send;
}

/// Journal entry persistence.
pub trait JournalEntryRepository: Send + Sync {
    /// Entries matching `filter`, ordered by entry date then ID.
    fn all(
        &self,
        tenant_id: TenantId,
        filter: &EntryFilter,
    ) -> impl Future<Output = Result<Vec<JournalEntry>, LedgerError>> + Send;

    /// Find an entry with its lines or fail with `JournalEntryNotFound`.
    fn find_or_fail(
        &self,
        tenant_id: TenantId,
        id: JournalEntryId,
    ) -> impl Future<Output = Result<JournalEntry, LedgerError>> + Send;

    /// Find an entry by reference number.
    fn find_by_reference(
        &self,
        tenant_id: TenantId,
        reference_number: &str,
    ) -> impl Future<Output = Result<Option<JournalEntry>, LedgerError>> + Send;

    /// Insert a draft header with its lines.
    fn create(
        &mut self,
        tenant_id: TenantId,
        header: NewJournalEntry,
        lines: Vec<NewJournalLine>,
    ) -> impl Future<Output = Result<JournalEntry, LedgerError>> + Send;

    /// Replace a draft's header and lines.
    fn update(
        &mut self,
        tenant_id: TenantId,
        id: JournalEntryId,
        header: NewJournalEntry,
        lines: Vec<NewJournalLine>,
    ) -> impl Future<Output = Result<JournalEntry, LedgerError>> + Send;

    /// Store a new status.
    fn update_status(
        &mut self,
        tenant_id: TenantId,
        id: JournalEntryId,
        status: JournalStatus,
    ) -> impl Future<Output = Result<JournalEntry, LedgerError>> + Send;

    /// Lines of posted entries in the period, joined with their accounts.
    fn find_posted_lines_by_period(
        &self,
        tenant_id: TenantId,
        period_id: FiscalPeriodId,
    ) -> impl Future<Output = Result<Vec<PostedLine>, LedgerError>> + Send;
}

/// Fiscal period persistence.
pub trait FiscalPeriodRepository: Send + Sync {
    /// All periods of the tenant, ordered by start date.
    fn all(
        &self,
        tenant_id: TenantId,
    ) -> impl Future<Output = Result<Vec<FiscalPeriod>, LedgerError>> + Send;

    /// Find a period or fail with `FiscalPeriodNotFound`.
    fn find_or_fail(
        &self,
        tenant_id: TenantId,
        id: FiscalPeriodId,
    ) -> impl Future<Output = Result<FiscalPeriod, LedgerError>> + Send;

    /// Insert a new, open period.
    fn create(
        &mut self,
        tenant_id: TenantId,
        period: NewFiscalPeriod,
    ) -> impl Future<Output = Result<FiscalPeriod, LedgerError>> + Send;

    /// Replace the stored period with the same ID.
    fn update(
        &mut self,
        tenant_id: TenantId,
        period: FiscalPeriod,
    ) -> impl Future<Output = Result<FiscalPeriod, LedgerError>> + Send;
}

/// One atomic unit of work over the three repositories.
pub trait LedgerSession: Send {
    /// Account repository bound to this session.
    fn accounts(&mut self) -> impl AccountRepository + '_;

    /// Journal entry repository bound to this session.
    fn journal_entries(&mut self) -> impl JournalEntryRepository + '_;

    /// Fiscal period repository bound to this session.
    fn fiscal_periods(&mut self) -> impl FiscalPeriodRepository + '_;

    /// Publish every write made through this session.
    fn commit(self) -> impl Future<Output = Result<(), LedgerError>> + Send;
}

/// Entry point to storage.
pub trait LedgerStore: Send + Sync {
    /// Session type handed out by [`LedgerStore::begin`].
    type Session: LedgerSession;

    /// Open a new unit of work.
    fn begin(&self) -> impl Future<Output = Result<Self::Session, LedgerError>> + Send;
}

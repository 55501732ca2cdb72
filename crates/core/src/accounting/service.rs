//! Accounting service: every controller-facing ledger operation.
//!
//! Each mutating operation validates what it can without storage, then
//! opens one session, re-checks state, writes and commits. Any error
//! drops the session and with it every write.

use std::collections::HashMap;
use std::sync::Arc;

use tally_shared::LedgerConfig;
use tally_shared::types::{
    AccountId, Currency, FiscalPeriodId, JournalEntryId, PageRequest, PageResponse, TenantId,
};
use tracing::{debug, info, warn};

use crate::accounts::{
    Account, CreateAccountInput, NewAccount, UpdateAccountInput, ensure_valid_parent,
};
use crate::fiscal::{CreateFiscalPeriodInput, FiscalPeriod};
use crate::ledger::{
    AccountInfo, CreateJournalEntryInput, EntryFilter, JournalEntry, JournalStatus, LedgerError,
    LedgerService, NewJournalEntry, NewJournalLine,
};
use crate::ports::{
    AccountRepository, FiscalPeriodRepository, JournalEntryRepository, LedgerSession, LedgerStore,
    PostedLine,
};
use crate::reports::{BalanceSheet, ProfitAndLoss, ReportService, TrialBalance};

/// Accounting service over a [`LedgerStore`].
pub struct AccountingService<S: LedgerStore> {
    store: Arc<S>,
    config: LedgerConfig,
}

impl<S: LedgerStore> AccountingService<S> {
    /// Creates a new accounting service.
    pub fn new(store: Arc<S>, config: LedgerConfig) -> Self {
        Self { store, config }
    }

    // ========== Chart of accounts ==========

    /// All accounts, ordered by code.
    ///
    /// # Errors
    ///
    /// Returns a persistence error from the store.
    pub async fn list_accounts(&self, tenant_id: TenantId) -> Result<Vec<Account>, LedgerError> {
        let mut session = self.store.begin().await?;
        session.accounts().all(tenant_id).await
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns `BlankField`, `Money` (bad currency), `DuplicateAccountCode`
    /// or `AccountNotFound` for a missing parent.
    pub async fn create_account(
        &self,
        tenant_id: TenantId,
        input: CreateAccountInput,
    ) -> Result<Account, LedgerError> {
        let code = required(&input.code, "code")?;
        let name = required(&input.name, "name")?;
        let currency = Currency::parse(
            input
                .currency
                .as_deref()
                .unwrap_or(&self.config.default_currency),
        )?;

        let mut session = self.store.begin().await?;

        if session
            .accounts()
            .find_by_code(tenant_id, &code)
            .await?
            .is_some()
        {
            return Err(LedgerError::DuplicateAccountCode(code));
        }

        if let Some(parent_id) = input.parent_id {
            let accounts = session.accounts().all(tenant_id).await?;
            ensure_valid_parent(&accounts, None, parent_id)?;
        }

        let account = session
            .accounts()
            .create(
                tenant_id,
                NewAccount {
                    code,
                    name,
                    account_type: input.account_type,
                    parent_id: input.parent_id,
                    is_header: input.is_header,
                    is_active: input.is_active,
                    currency,
                    description: input.description,
                },
            )
            .await?;
        session.commit().await?;

        info!(
            tenant_id = %tenant_id,
            account_id = %account.id,
            code = %account.code,
            "Account created"
        );
        Ok(account)
    }

    /// Fetches one account.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the ID is unknown.
    pub async fn show_account(
        &self,
        tenant_id: TenantId,
        id: AccountId,
    ) -> Result<Account, LedgerError> {
        let mut session = self.store.begin().await?;
        session.accounts().find_or_fail(tenant_id, id).await
    }

    /// Updates name, description, active flag or parent.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`, `BlankField` or `HierarchyCycle`.
    pub async fn update_account(
        &self,
        tenant_id: TenantId,
        id: AccountId,
        input: UpdateAccountInput,
    ) -> Result<Account, LedgerError> {
        let mut session = self.store.begin().await?;
        let mut account = session.accounts().find_or_fail(tenant_id, id).await?;

        if let Some(name) = input.name {
            account.name = required(&name, "name")?;
        }
        if let Some(description) = input.description {
            account.description = description;
        }
        if let Some(is_active) = input.is_active {
            account.is_active = is_active;
        }
        if let Some(parent_id) = input.parent_id {
            if let Some(parent) = parent_id {
                let accounts = session.accounts().all(tenant_id).await?;
                ensure_valid_parent(&accounts, Some(id), parent)?;
            }
            account.parent_id = parent_id;
        }

        let account = session.accounts().update(tenant_id, account).await?;
        session.commit().await?;

        info!(tenant_id = %tenant_id, account_id = %id, "Account updated");
        Ok(account)
    }

    // ========== Journal entries ==========

    /// Entries matching `filter`, ordered by entry date then ID, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns a persistence error from the store.
    pub async fn list_entries(
        &self,
        tenant_id: TenantId,
        filter: &EntryFilter,
        page: PageRequest,
    ) -> Result<PageResponse<JournalEntry>, LedgerError> {
        let mut session = self.store.begin().await?;
        let entries = session.journal_entries().all(tenant_id, filter).await?;
        Ok(PageResponse::from_items(entries, page))
    }

    /// Fetches one entry with its lines.
    ///
    /// # Errors
    ///
    /// Returns `JournalEntryNotFound` if the ID is unknown.
    pub async fn show_journal_entry(
        &self,
        tenant_id: TenantId,
        id: JournalEntryId,
    ) -> Result<JournalEntry, LedgerError> {
        let mut session = self.store.begin().await?;
        session.journal_entries().find_or_fail(tenant_id, id).await
    }

    /// Creates a draft entry.
    ///
    /// The double-entry balance is checked before the store is touched.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad input, `PeriodClosed` for a
    /// closed period, `DuplicateReference`, or a lookup error.
    pub async fn create_journal_entry(
        &self,
        tenant_id: TenantId,
        input: CreateJournalEntryInput,
    ) -> Result<JournalEntry, LedgerError> {
        self.validate_entry_input(tenant_id, &input)?;

        let mut session = self.store.begin().await?;
        let (header, lines) = prepare_entry(&mut session, tenant_id, &input).await?;

        if session
            .journal_entries()
            .find_by_reference(tenant_id, &header.reference_number)
            .await?
            .is_some()
        {
            return Err(LedgerError::DuplicateReference(header.reference_number));
        }

        let entry = session
            .journal_entries()
            .create(tenant_id, header, lines)
            .await?;
        session.commit().await?;

        info!(
            tenant_id = %tenant_id,
            entry_id = %entry.id,
            reference = %entry.reference_number,
            "Journal entry created"
        );
        Ok(entry)
    }

    /// Rewrites a draft entry's header and lines.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create_journal_entry`], plus `CannotModifyPosted`
    /// and `CannotModifyCancelled`.
    pub async fn update_journal_entry(
        &self,
        tenant_id: TenantId,
        id: JournalEntryId,
        input: CreateJournalEntryInput,
    ) -> Result<JournalEntry, LedgerError> {
        self.validate_entry_input(tenant_id, &input)?;

        let mut session = self.store.begin().await?;
        let existing = session.journal_entries().find_or_fail(tenant_id, id).await?;
        LedgerService::validate_can_modify(existing.status)?;

        let (header, lines) = prepare_entry(&mut session, tenant_id, &input).await?;

        let clash = session
            .journal_entries()
            .find_by_reference(tenant_id, &header.reference_number)
            .await?;
        if clash.is_some_and(|other| other.id != id) {
            return Err(LedgerError::DuplicateReference(header.reference_number));
        }

        let entry = session
            .journal_entries()
            .update(tenant_id, id, header, lines)
            .await?;
        session.commit().await?;

        info!(tenant_id = %tenant_id, entry_id = %id, "Journal entry updated");
        Ok(entry)
    }

    /// Posts a draft entry, making it count toward reports.
    ///
    /// # Errors
    ///
    /// Returns `JournalEntryNotFound`, `CannotModifyPosted`,
    /// `CannotModifyCancelled` or `PeriodClosed`.
    pub async fn post_entry(
        &self,
        tenant_id: TenantId,
        id: JournalEntryId,
    ) -> Result<JournalEntry, LedgerError> {
        let mut session = self.store.begin().await?;
        let entry = session.journal_entries().find_or_fail(tenant_id, id).await?;

        let status = entry
            .status
            .transition_to(JournalStatus::Posted)
            .inspect_err(|e| warn!(entry_id = %id, error = %e, "Posting rejected"))?;

        if let Some(period_id) = entry.fiscal_period_id {
            let period = session
                .fiscal_periods()
                .find_or_fail(tenant_id, period_id)
                .await?;
            period
                .ensure_open()
                .inspect_err(|e| warn!(entry_id = %id, error = %e, "Posting rejected"))?;
        }

        let entry = session
            .journal_entries()
            .update_status(tenant_id, id, status)
            .await?;
        let totals = entry.totals()?;
        session.commit().await?;

        info!(
            tenant_id = %tenant_id,
            entry_id = %id,
            debit_total = %totals.debit,
            "Journal entry posted"
        );
        Ok(entry)
    }

    /// Cancels a draft entry.
    ///
    /// # Errors
    ///
    /// Returns `JournalEntryNotFound`, `CannotModifyPosted` or
    /// `CannotModifyCancelled`.
    pub async fn cancel_entry(
        &self,
        tenant_id: TenantId,
        id: JournalEntryId,
    ) -> Result<JournalEntry, LedgerError> {
        let mut session = self.store.begin().await?;
        let entry = session.journal_entries().find_or_fail(tenant_id, id).await?;
        let status = entry.status.transition_to(JournalStatus::Cancelled)?;

        let entry = session
            .journal_entries()
            .update_status(tenant_id, id, status)
            .await?;
        session.commit().await?;

        info!(tenant_id = %tenant_id, entry_id = %id, "Journal entry cancelled");
        Ok(entry)
    }

    fn validate_entry_input(
        &self,
        tenant_id: TenantId,
        input: &CreateJournalEntryInput,
    ) -> Result<(), LedgerError> {
        let result = LedgerService::validate_input(input).and_then(|_| {
            if self.config.require_fiscal_period && input.fiscal_period_id.is_none() {
                Err(LedgerError::FiscalPeriodRequired)
            } else {
                Ok(())
            }
        });
        if let Err(e) = &result {
            warn!(
                tenant_id = %tenant_id,
                reference = %input.reference_number,
                error = %e,
                "Journal entry rejected"
            );
        }
        result
    }

    // ========== Fiscal periods ==========

    /// All periods, ordered by start date.
    ///
    /// # Errors
    ///
    /// Returns a persistence error from the store.
    pub async fn list_fiscal_periods(
        &self,
        tenant_id: TenantId,
    ) -> Result<Vec<FiscalPeriod>, LedgerError> {
        let mut session = self.store.begin().await?;
        session.fiscal_periods().all(tenant_id).await
    }

    /// Creates an open period.
    ///
    /// # Errors
    ///
    /// Returns `BlankField`, `InvalidDateRange` or `OverlappingPeriod`.
    pub async fn create_fiscal_period(
        &self,
        tenant_id: TenantId,
        input: CreateFiscalPeriodInput,
    ) -> Result<FiscalPeriod, LedgerError> {
        let new_period = input.validate()?;

        let mut session = self.store.begin().await?;
        let existing = session.fiscal_periods().all(tenant_id).await?;
        if let Some(clash) = existing
            .iter()
            .find(|p| p.overlaps(new_period.start_date, new_period.end_date))
        {
            return Err(LedgerError::OverlappingPeriod(clash.name.clone()));
        }

        let period = session
            .fiscal_periods()
            .create(tenant_id, new_period)
            .await?;
        session.commit().await?;

        info!(
            tenant_id = %tenant_id,
            fiscal_period_id = %period.id,
            "Fiscal period created"
        );
        Ok(period)
    }

    /// Fetches one period.
    ///
    /// # Errors
    ///
    /// Returns `FiscalPeriodNotFound` if the ID is unknown.
    pub async fn show_fiscal_period(
        &self,
        tenant_id: TenantId,
        id: FiscalPeriodId,
    ) -> Result<FiscalPeriod, LedgerError> {
        let mut session = self.store.begin().await?;
        session.fiscal_periods().find_or_fail(tenant_id, id).await
    }

    /// Closes a period. Closing twice is an error.
    ///
    /// # Errors
    ///
    /// Returns `FiscalPeriodNotFound` or `PeriodAlreadyClosed`.
    pub async fn close_fiscal_period(
        &self,
        tenant_id: TenantId,
        id: FiscalPeriodId,
    ) -> Result<FiscalPeriod, LedgerError> {
        let mut session = self.store.begin().await?;
        let mut period = session.fiscal_periods().find_or_fail(tenant_id, id).await?;
        period.close()?;

        let period = session.fiscal_periods().update(tenant_id, period).await?;
        session.commit().await?;

        info!(tenant_id = %tenant_id, fiscal_period_id = %id, "Fiscal period closed");
        Ok(period)
    }

    // ========== Reports ==========

    /// Trial balance over the period's posted lines.
    ///
    /// # Errors
    ///
    /// Returns `FiscalPeriodNotFound` if the period is unknown, or `Money`
    /// if a total overflows.
    pub async fn get_trial_balance(
        &self,
        tenant_id: TenantId,
        period_id: FiscalPeriodId,
    ) -> Result<TrialBalance, LedgerError> {
        let report = self
            .with_posted_lines(tenant_id, period_id, ReportService::generate_trial_balance)
            .await?;
        debug!(
            fiscal_period_id = %period_id,
            accounts = report.accounts.len(),
            is_balanced = report.is_balanced,
            "Trial balance generated"
        );
        Ok(report)
    }

    /// Balance sheet over the period's posted lines.
    ///
    /// # Errors
    ///
    /// Returns `FiscalPeriodNotFound` if the period is unknown, or `Money`
    /// if a total overflows.
    pub async fn get_balance_sheet(
        &self,
        tenant_id: TenantId,
        period_id: FiscalPeriodId,
    ) -> Result<BalanceSheet, LedgerError> {
        let report = self
            .with_posted_lines(tenant_id, period_id, ReportService::generate_balance_sheet)
            .await?;
        debug!(
            fiscal_period_id = %period_id,
            total_assets = %report.total_assets,
            "Balance sheet generated"
        );
        Ok(report)
    }

    /// Profit and loss over the period's posted lines.
    ///
    /// # Errors
    ///
    /// Returns `FiscalPeriodNotFound` if the period is unknown, or `Money`
    /// if a total overflows.
    pub async fn get_profit_and_loss(
        &self,
        tenant_id: TenantId,
        period_id: FiscalPeriodId,
    ) -> Result<ProfitAndLoss, LedgerError> {
        let report = self
            .with_posted_lines(tenant_id, period_id, ReportService::generate_profit_and_loss)
            .await?;
        debug!(
            fiscal_period_id = %period_id,
            net_profit = %report.net_profit,
            "Profit and loss generated"
        );
        Ok(report)
    }

    async fn with_posted_lines<R>(
        &self,
        tenant_id: TenantId,
        period_id: FiscalPeriodId,
        generate: impl FnOnce(FiscalPeriodId, &[PostedLine]) -> Result<R, LedgerError>,
    ) -> Result<R, LedgerError> {
        let mut session = self.store.begin().await?;
        session
            .fiscal_periods()
            .find_or_fail(tenant_id, period_id)
            .await?;
        let lines = session
            .journal_entries()
            .find_posted_lines_by_period(tenant_id, period_id)
            .await?;
        generate(period_id, &lines)
    }
}

/// Checks the period and accounts an entry refers to and builds the rows to store.
async fn prepare_entry<T: LedgerSession>(
    session: &mut T,
    tenant_id: TenantId,
    input: &CreateJournalEntryInput,
) -> Result<(NewJournalEntry, Vec<NewJournalLine>), LedgerError> {
    if let Some(period_id) = input.fiscal_period_id {
        let period = session
            .fiscal_periods()
            .find_or_fail(tenant_id, period_id)
            .await?;
        LedgerService::ensure_period_accepts(&period, input.entry_date)?;
    }

    let accounts: HashMap<AccountId, Account> = session
        .accounts()
        .all(tenant_id)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();

    LedgerService::resolve(input, |id| {
        accounts
            .get(&id)
            .map(AccountInfo::from)
            .ok_or(LedgerError::AccountNotFound(id))
    })
}

fn required(value: &str, field: &'static str) -> Result<String, LedgerError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::BlankField(field));
    }
    Ok(trimmed.to_string())
}

//! Journal entry repository.

use tally_core::LedgerError;
use tally_core::ledger::{
    EntryFilter, JournalEntry, JournalLine, JournalStatus, NewJournalEntry, NewJournalLine,
};
use tally_core::ports::{JournalEntryRepository, PostedLine};
use tally_shared::types::{FiscalPeriodId, JournalEntryId, TenantId};

use crate::store::LedgerState;

/// Journal entry and line tables of one session.
#[derive(Debug)]
pub struct JournalEntryStore<'a> {
    state: &'a mut LedgerState,
}

impl<'a> JournalEntryStore<'a> {
    pub(crate) fn new(state: &'a mut LedgerState) -> Self {
        Self { state }
    }

    fn reference_taken(
        &self,
        tenant_id: TenantId,
        reference_number: &str,
        except: Option<JournalEntryId>,
    ) -> bool {
        self.state.entries.values().any(|e| {
            e.tenant_id == tenant_id
                && e.reference_number == reference_number
                && Some(e.id) != except
        })
    }

    fn insert_lines(
        &mut self,
        entry_id: JournalEntryId,
        lines: Vec<NewJournalLine>,
    ) -> Vec<JournalLine> {
        lines
            .into_iter()
            .map(|line| JournalLine {
                id: self.state.next_line_id(),
                entry_id,
                account_id: line.account_id,
                entry_type: line.entry_type,
                amount: line.amount,
                description: line.description,
                line_number: line.line_number,
            })
            .collect()
    }

    fn entry_mut(
        &mut self,
        tenant_id: TenantId,
        id: JournalEntryId,
    ) -> Result<&mut JournalEntry, LedgerError> {
        self.state
            .entries
            .get_mut(&id)
            .filter(|e| e.tenant_id == tenant_id)
            .ok_or(LedgerError::JournalEntryNotFound(id))
    }
}

impl JournalEntryRepository for JournalEntryStore<'_> {
    async fn all(
        &self,
        tenant_id: TenantId,
        filter: &EntryFilter,
    ) -> Result<Vec<JournalEntry>, LedgerError> {
        let mut entries: Vec<JournalEntry> = self
            .state
            .entries
            .values()
            .filter(|e| e.tenant_id == tenant_id && filter.matches(e))
            .cloned()
            .collect();
        entries.sort_by_key(|e| (e.entry_date, e.id));
        Ok(entries)
    }

    async fn find_or_fail(
        &self,
        tenant_id: TenantId,
        id: JournalEntryId,
    ) -> Result<JournalEntry, LedgerError> {
        self.state
            .entries
            .get(&id)
            .filter(|e| e.tenant_id == tenant_id)
            .cloned()
            .ok_or(LedgerError::JournalEntryNotFound(id))
    }

    async fn find_by_reference(
        &self,
        tenant_id: TenantId,
        reference_number: &str,
    ) -> Result<Option<JournalEntry>, LedgerError> {
        Ok(self
            .state
            .entries
            .values()
            .find(|e| e.tenant_id == tenant_id && e.reference_number == reference_number)
            .cloned())
    }

    async fn create(
        &mut self,
        tenant_id: TenantId,
        header: NewJournalEntry,
        lines: Vec<NewJournalLine>,
    ) -> Result<JournalEntry, LedgerError> {
        // Unique (tenant_id, reference_number)
        if self.reference_taken(tenant_id, &header.reference_number, None) {
            return Err(LedgerError::DuplicateReference(header.reference_number));
        }

        let id = self.state.next_entry_id();
        let lines = self.insert_lines(id, lines);
        let entry = JournalEntry {
            id,
            tenant_id,
            fiscal_period_id: header.fiscal_period_id,
            reference_number: header.reference_number,
            description: header.description,
            entry_date: header.entry_date,
            currency: header.currency,
            status: JournalStatus::Draft,
            lines,
        };
        self.state.entries.insert(id, entry.clone());
        self.state.touch();
        Ok(entry)
    }

    async fn update(
        &mut self,
        tenant_id: TenantId,
        id: JournalEntryId,
        header: NewJournalEntry,
        lines: Vec<NewJournalLine>,
    ) -> Result<JournalEntry, LedgerError> {
        self.entry_mut(tenant_id, id)?;
        if self.reference_taken(tenant_id, &header.reference_number, Some(id)) {
            return Err(LedgerError::DuplicateReference(header.reference_number));
        }

        let lines = self.insert_lines(id, lines);
        let entry = self.entry_mut(tenant_id, id)?;
        entry.fiscal_period_id = header.fiscal_period_id;
        entry.reference_number = header.reference_number;
        entry.description = header.description;
        entry.entry_date = header.entry_date;
        entry.currency = header.currency;
        entry.lines = lines;
        let entry = entry.clone();

        self.state.touch();
        Ok(entry)
    }

    async fn update_status(
        &mut self,
        tenant_id: TenantId,
        id: JournalEntryId,
        status: JournalStatus,
    ) -> Result<JournalEntry, LedgerError> {
        let entry = self.entry_mut(tenant_id, id)?;
        entry.status = status;
        let entry = entry.clone();

        self.state.touch();
        Ok(entry)
    }

    async fn find_posted_lines_by_period(
        &self,
        tenant_id: TenantId,
        period_id: FiscalPeriodId,
    ) -> Result<Vec<PostedLine>, LedgerError> {
        let posted = self.state.entries.values().filter(|e| {
            e.tenant_id == tenant_id
                && e.status == JournalStatus::Posted
                && e.fiscal_period_id == Some(period_id)
        });

        let mut rows = Vec::new();
        for entry in posted {
            for line in &entry.lines {
                let account = self.state.accounts.get(&line.account_id).ok_or_else(|| {
                    LedgerError::Database(format!(
                        "journal line {} references missing account {}",
                        line.id, line.account_id
                    ))
                })?;
                rows.push(PostedLine {
                    entry_id: entry.id,
                    account_id: account.id,
                    account_code: account.code.clone(),
                    account_name: account.name.clone(),
                    account_type: account.account_type,
                    entry_type: line.entry_type,
                    amount: line.amount,
                });
            }
        }
        Ok(rows)
    }
}

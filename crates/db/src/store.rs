//! In-memory store and its unit of work.

use std::collections::BTreeMap;
use std::sync::Arc;

use tally_core::LedgerError;
use tally_core::accounts::Account;
use tally_core::fiscal::FiscalPeriod;
use tally_core::ledger::JournalEntry;
use tally_core::ports::{
    AccountRepository, FiscalPeriodRepository, JournalEntryRepository, LedgerSession, LedgerStore,
};
use tally_shared::types::{AccountId, FiscalPeriodId, JournalEntryId, JournalLineId};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use crate::repositories::{AccountStore, FiscalPeriodStore, JournalEntryStore};

/// Every table plus its id sequences.
#[derive(Debug, Clone, Default)]
pub(crate) struct LedgerState {
    pub(crate) accounts: BTreeMap<AccountId, Account>,
    pub(crate) entries: BTreeMap<JournalEntryId, JournalEntry>,
    pub(crate) periods: BTreeMap<FiscalPeriodId, FiscalPeriod>,
    last_account_id: i64,
    last_entry_id: i64,
    last_line_id: i64,
    last_period_id: i64,
    /// Bumped on every write; tells a dirty session from a read-only one.
    revision: u64,
}

impl LedgerState {
    pub(crate) fn next_account_id(&mut self) -> AccountId {
        self.last_account_id += 1;
        AccountId(self.last_account_id)
    }

    pub(crate) fn next_entry_id(&mut self) -> JournalEntryId {
        self.last_entry_id += 1;
        JournalEntryId(self.last_entry_id)
    }

    pub(crate) fn next_line_id(&mut self) -> JournalLineId {
        self.last_line_id += 1;
        JournalLineId(self.last_line_id)
    }

    pub(crate) fn next_period_id(&mut self) -> FiscalPeriodId {
        self.last_period_id += 1;
        FiscalPeriodId(self.last_period_id)
    }

    pub(crate) fn touch(&mut self) {
        self.revision += 1;
    }
}

/// Transactional in-memory ledger storage.
///
/// Cloning yields another handle to the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedgerStore {
    state: Arc<Mutex<LedgerState>>,
}

impl MemoryLedgerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for MemoryLedgerStore {
    type Session = MemorySession;

    async fn begin(&self) -> Result<MemorySession, LedgerError> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let working = guard.clone();
        debug!(revision = guard.revision, "Session started");
        Ok(MemorySession {
            guard,
            working,
            committed: false,
        })
    }
}

/// A unit of work over a private copy of the store.
///
/// Writes land in the copy; [`LedgerSession::commit`] swaps it in.
#[derive(Debug)]
pub struct MemorySession {
    guard: OwnedMutexGuard<LedgerState>,
    working: LedgerState,
    committed: bool,
}

impl MemorySession {
    fn is_dirty(&self) -> bool {
        self.working.revision != self.guard.revision
    }
}

impl LedgerSession for MemorySession {
    fn accounts(&mut self) -> impl AccountRepository + '_ {
        AccountStore::new(&mut self.working)
    }

    fn journal_entries(&mut self) -> impl JournalEntryRepository + '_ {
        JournalEntryStore::new(&mut self.working)
    }

    fn fiscal_periods(&mut self) -> impl FiscalPeriodRepository + '_ {
        FiscalPeriodStore::new(&mut self.working)
    }

    async fn commit(mut self) -> Result<(), LedgerError> {
        if self.is_dirty() {
            *self.guard = std::mem::take(&mut self.working);
            debug!(revision = self.guard.revision, "Session committed");
        }
        self.committed = true;
        Ok(())
    }
}

impl Drop for MemorySession {
    fn drop(&mut self) {
        if !self.committed && self.is_dirty() {
            debug!(
                discarded_writes = self.working.revision - self.guard.revision,
                "Session rolled back"
            );
        }
    }
}

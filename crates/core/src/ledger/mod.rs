//! Double-entry bookkeeping logic.
//!
//! This module implements the core ledger functionality:
//! - Journal entries, lines and the posting state machine
//! - Balance accumulation per account
//! - Business rule validation
//! - Error types for ledger operations

pub mod balance;
pub mod entry;
pub mod error;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use balance::{AccountBalance, NormalBalance};
pub use entry::{EntryType, JournalEntry, JournalLine, JournalStatus};
pub use error::{ErrorKind, LedgerError};
pub use service::{AccountInfo, LedgerService};
pub use types::{
    CreateJournalEntryInput, EntryFilter, EntryTotals, JournalLineInput, NewJournalEntry,
    NewJournalLine,
};
pub use validation::validate_lines;

//! Storage layer for the Tally ledger.
//!
//! This crate provides:
//! - [`MemoryLedgerStore`], a transactional in-memory [`LedgerStore`]
//! - Repository implementations bound to a [`MemorySession`]
//!
//! A session holds the store lock from `begin` until it is committed or
//! dropped, so sessions are serializable.
//!
//! [`LedgerStore`]: tally_core::ports::LedgerStore

pub mod repositories;
pub mod store;

pub use repositories::{AccountStore, FiscalPeriodStore, JournalEntryStore};
pub use store::{MemoryLedgerStore, MemorySession};

//! Core business logic for Tally.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Storage is reached only through the traits in [`ports`].
//!
//! # Modules
//!
//! - `accounts` - Chart of accounts and hierarchy rules
//! - `ledger` - Double-entry bookkeeping logic
//! - `fiscal` - Fiscal period management
//! - `tax` - Tax rates
//! - `reports` - Trial balance, balance sheet, profit and loss
//! - `ports` - Repository contracts and unit of work
//! - `accounting` - Service orchestrating all of the above

pub mod accounting;
pub mod accounts;
pub mod fiscal;
pub mod ledger;
pub mod ports;
pub mod reports;
pub mod tax;

pub use accounting::AccountingService;
pub use ledger::{ErrorKind, LedgerError};

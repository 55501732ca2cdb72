//! Orchestration of the ledger over the repository ports.

pub mod service;

pub use service::AccountingService;

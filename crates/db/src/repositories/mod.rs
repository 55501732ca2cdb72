//! Repository implementations over a session's working copy.

mod account;
mod fiscal;
mod journal;

pub use account::AccountStore;
pub use fiscal::FiscalPeriodStore;
pub use journal::JournalEntryStore;

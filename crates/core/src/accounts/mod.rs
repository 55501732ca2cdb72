//! Chart of accounts.
//!
//! Accounts form a tree through parent references. Header accounts only
//! aggregate their children; leaves take journal lines.

pub mod hierarchy;
pub mod types;

pub use hierarchy::{ensure_valid_parent, is_self_or_descendant};
pub use types::{
    Account, AccountType, CreateAccountInput, NewAccount, Statement, UpdateAccountInput,
};

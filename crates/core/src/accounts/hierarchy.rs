//! Parent/child rules for the account tree.

use std::collections::{HashMap, HashSet};

use tally_shared::types::AccountId;

use super::types::Account;
use crate::ledger::LedgerError;

/// Returns true if `candidate` is `account` itself or sits anywhere beneath it.
///
/// Walks parent links upward from `candidate`. A pre-existing loop in the
/// stored data stops the walk instead of spinning forever.
#[must_use]
pub fn is_self_or_descendant(accounts: &[Account], account: AccountId, candidate: AccountId) -> bool {
    let parents: HashMap<AccountId, Option<AccountId>> =
        accounts.iter().map(|a| (a.id, a.parent_id)).collect();

    let mut visited = HashSet::new();
    let mut current = Some(candidate);
    while let Some(id) = current {
        if id == account {
            return true;
        }
        if !visited.insert(id) {
            return false;
        }
        current = parents.get(&id).copied().flatten();
    }
    false
}

/// Checks that `parent` exists among `accounts` and would not create a cycle.
///
/// Pass `account = None` for a node that does not exist yet.
pub fn ensure_valid_parent(
    accounts: &[Account],
    account: Option<AccountId>,
    parent: AccountId,
) -> Result<(), LedgerError> {
    if !accounts.iter().any(|a| a.id == parent) {
        return Err(LedgerError::AccountNotFound(parent));
    }
    if let Some(account) = account {
        if is_self_or_descendant(accounts, account, parent) {
            return Err(LedgerError::HierarchyCycle { account, parent });
        }
    }
    Ok(())
}

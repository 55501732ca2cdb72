//! Account repository.

use tally_core::LedgerError;
use tally_core::accounts::{Account, NewAccount};
use tally_core::ports::AccountRepository;
use tally_shared::types::{AccountId, TenantId};

use crate::store::LedgerState;

/// Account table of one session.
#[derive(Debug)]
pub struct AccountStore<'a> {
    state: &'a mut LedgerState,
}

impl<'a> AccountStore<'a> {
    pub(crate) fn new(state: &'a mut LedgerState) -> Self {
        Self { state }
    }

    fn code_taken(&self, tenant_id: TenantId, code: &str, except: Option<AccountId>) -> bool {
        self.state.accounts.values().any(|a| {
            a.tenant_id == tenant_id && a.code == code && Some(a.id) != except
        })
    }
}

impl AccountRepository for AccountStore<'_> {
    async fn all(&self, tenant_id: TenantId) -> Result<Vec<Account>, LedgerError> {
        let mut accounts: Vec<Account> = self
            .state
            .accounts
            .values()
            .filter(|a| a.tenant_id == tenant_id)
            .cloned()
            .collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(accounts)
    }

    async fn find_or_fail(
        &self,
        tenant_id: TenantId,
        id: AccountId,
    ) -> Result<Account, LedgerError> {
        self.state
            .accounts
            .get(&id)
            .filter(|a| a.tenant_id == tenant_id)
            .cloned()
            .ok_or(LedgerError::AccountNotFound(id))
    }

    async fn find_by_code(
        &self,
        tenant_id: TenantId,
        code: &str,
    ) -> Result<Option<Account>, LedgerError> {
        Ok(self
            .state
            .accounts
            .values()
            .find(|a| a.tenant_id == tenant_id && a.code == code)
            .cloned())
    }

    async fn create(
        &mut self,
        tenant_id: TenantId,
        account: NewAccount,
    ) -> Result<Account, LedgerError> {
        // Unique (tenant_id, code)
        if self.code_taken(tenant_id, &account.code, None) {
            return Err(LedgerError::DuplicateAccountCode(account.code));
        }

        let id = self.state.next_account_id();
        let account = Account {
            id,
            tenant_id,
            code: account.code,
            name: account.name,
            account_type: account.account_type,
            parent_id: account.parent_id,
            is_header: account.is_header,
            is_active: account.is_active,
            currency: account.currency,
            description: account.description,
        };
        self.state.accounts.insert(id, account.clone());
        self.state.touch();
        Ok(account)
    }

    async fn update(
        &mut self,
        tenant_id: TenantId,
        account: Account,
    ) -> Result<Account, LedgerError> {
        if account.tenant_id != tenant_id {
            return Err(LedgerError::AccountNotFound(account.id));
        }
        if self.code_taken(tenant_id, &account.code, Some(account.id)) {
            return Err(LedgerError::DuplicateAccountCode(account.code));
        }

        let slot = self
            .state
            .accounts
            .get_mut(&account.id)
            .filter(|a| a.tenant_id == tenant_id)
            .ok_or(LedgerError::AccountNotFound(account.id))?;
        *slot = account.clone();
        self.state.touch();
        Ok(account)
    }
}

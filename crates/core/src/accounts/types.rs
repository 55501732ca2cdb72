//! Account domain types.

use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, Currency, TenantId};

use crate::ledger::balance::NormalBalance;

/// The five account classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Resources owned.
    Asset,
    /// Obligations owed.
    Liability,
    /// Owner's residual interest.
    Equity,
    /// Income earned.
    Revenue,
    /// Costs incurred.
    Expense,
}

/// Which financial statement an account type reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement {
    /// Assets, liabilities, equity.
    BalanceSheet,
    /// Revenue and expenses.
    ProfitAndLoss,
}

impl AccountType {
    /// All account types in chart order.
    pub const ALL: [Self; 5] = [
        Self::Asset,
        Self::Liability,
        Self::Equity,
        Self::Revenue,
        Self::Expense,
    ];

    /// Returns the string representation of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        }
    }

    /// The side that increases this type's balance.
    #[must_use]
    pub const fn normal_balance(self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Revenue => NormalBalance::Credit,
        }
    }

    /// The statement this type belongs to.
    #[must_use]
    pub const fn statement(self) -> Statement {
        match self {
            Self::Asset | Self::Liability | Self::Equity => Statement::BalanceSheet,
            Self::Revenue | Self::Expense => Statement::ProfitAndLoss,
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown account type: {s}"))
    }
}

/// A chart-of-accounts node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Account code, unique per tenant.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Account class, fixed at creation.
    pub account_type: AccountType,
    /// Parent node, if any.
    pub parent_id: Option<AccountId>,
    /// Aggregation node that cannot take lines.
    pub is_header: bool,
    /// Inactive accounts reject new lines.
    pub is_active: bool,
    /// Account currency.
    pub currency: Currency,
    /// Free-text description.
    pub description: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Input for creating an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountInput {
    /// Account code (must be unique within tenant).
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Parent account ID for hierarchical structure.
    #[serde(default)]
    pub parent_id: Option<AccountId>,
    /// Whether this is an aggregation-only node.
    #[serde(default)]
    pub is_header: bool,
    /// Whether the account is active.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Currency code; the configured default applies when absent.
    #[serde(default)]
    pub currency: Option<String>,
    /// Account description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Validated account data handed to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Parent account.
    pub parent_id: Option<AccountId>,
    /// Aggregation-only node.
    pub is_header: bool,
    /// Active flag.
    pub is_active: bool,
    /// Currency.
    pub currency: Currency,
    /// Description.
    pub description: Option<String>,
}

/// Input for updating an account.
///
/// Type and currency are fixed at creation and cannot be changed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAccountInput {
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
    /// New description; `Some(None)` clears it.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    /// New parent; `Some(None)` makes the account a root.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub parent_id: Option<Option<AccountId>>,
    /// Activate or deactivate.
    #[serde(default)]
    pub is_active: Option<bool>,
}

//! Report data types. Every amount serializes as a fixed-scale string.

use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, FiscalPeriodId, FixedDecimal};

use crate::accounts::AccountType;

/// One account in a trial balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// The account ID.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Total debit amount.
    pub total_debit: FixedDecimal,
    /// Total credit amount.
    pub total_credit: FixedDecimal,
    /// `total_debit - total_credit` for every account type.
    pub net_balance: FixedDecimal,
}

/// Trial balance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalance {
    /// Period reported on.
    pub fiscal_period_id: FiscalPeriodId,
    /// Rows ordered by account code.
    pub accounts: Vec<TrialBalanceRow>,
    /// Sum of all debits.
    pub total_debit: FixedDecimal,
    /// Sum of all credits.
    pub total_credit: FixedDecimal,
    /// Whether total debits equal total credits.
    pub is_balanced: bool,
}

/// One account on a statement, with its normal-side balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementLine {
    /// The account ID.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Balance on the account type's normal side.
    pub balance: FixedDecimal,
}

/// Balance sheet report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// Period reported on.
    pub fiscal_period_id: FiscalPeriodId,
    /// Asset accounts.
    pub assets: Vec<StatementLine>,
    /// Liability accounts.
    pub liabilities: Vec<StatementLine>,
    /// Equity accounts.
    pub equity: Vec<StatementLine>,
    /// Total assets.
    pub total_assets: FixedDecimal,
    /// Total liabilities.
    pub total_liabilities: FixedDecimal,
    /// Total equity.
    pub total_equity: FixedDecimal,
    /// `total_liabilities + total_equity`.
    pub liabilities_and_equity: FixedDecimal,
}

/// Profit and loss report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitAndLoss {
    /// Period reported on.
    pub fiscal_period_id: FiscalPeriodId,
    /// Revenue accounts.
    pub revenue: Vec<StatementLine>,
    /// Expense accounts.
    pub expenses: Vec<StatementLine>,
    /// Total revenue.
    pub total_revenue: FixedDecimal,
    /// Total expense.
    pub total_expense: FixedDecimal,
    /// `total_revenue - total_expense`.
    pub net_profit: FixedDecimal,
}

//! Report generation service.

use std::collections::BTreeMap;

use tally_shared::types::{AccountId, FiscalPeriodId, FixedDecimal};

use super::types::{BalanceSheet, ProfitAndLoss, StatementLine, TrialBalance, TrialBalanceRow};
use crate::accounts::{AccountType, Statement};
use crate::ledger::{AccountBalance, LedgerError};
use crate::ports::PostedLine;

/// Service for generating financial reports from posted lines.
pub struct ReportService;

impl ReportService {
    /// Folds posted lines into per-account totals, ordered by account code.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Money` if an account's totals overflow.
    pub fn aggregate(lines: &[PostedLine]) -> Result<Vec<AccountBalance>, LedgerError> {
        let mut balances: BTreeMap<(&str, AccountId), AccountBalance> = BTreeMap::new();

        for line in lines {
            balances
                .entry((line.account_code.as_str(), line.account_id))
                .or_insert_with(|| {
                    AccountBalance::new(
                        line.account_id,
                        line.account_code.as_str(),
                        line.account_name.as_str(),
                        line.account_type,
                    )
                })
                .apply(line.entry_type, line.amount)?;
        }

        Ok(balances.into_values().collect())
    }

    /// Generates a trial balance.
    ///
    /// Only accounts that appear in `lines` are listed.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Money` on overflow.
    pub fn generate_trial_balance(
        fiscal_period_id: FiscalPeriodId,
        lines: &[PostedLine],
    ) -> Result<TrialBalance, LedgerError> {
        let accounts = Self::aggregate(lines)?
            .into_iter()
            .map(|balance| {
                Ok(TrialBalanceRow {
                    net_balance: balance.net_balance()?,
                    account_id: balance.account_id,
                    code: balance.code,
                    name: balance.name,
                    account_type: balance.account_type,
                    total_debit: balance.debit_total,
                    total_credit: balance.credit_total,
                })
            })
            .collect::<Result<Vec<_>, LedgerError>>()?;

        let total_debit = FixedDecimal::checked_sum(accounts.iter().map(|a| a.total_debit))?;
        let total_credit = FixedDecimal::checked_sum(accounts.iter().map(|a| a.total_credit))?;

        Ok(TrialBalance {
            fiscal_period_id,
            accounts,
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        })
    }

    /// Generates a balance sheet from asset, liability and equity accounts.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Money` on overflow.
    pub fn generate_balance_sheet(
        fiscal_period_id: FiscalPeriodId,
        lines: &[PostedLine],
    ) -> Result<BalanceSheet, LedgerError> {
        let mut assets = Vec::new();
        let mut liabilities = Vec::new();
        let mut equity = Vec::new();

        for balance in Self::balances_on(Statement::BalanceSheet, lines)? {
            let bucket = match balance.account_type {
                AccountType::Asset => &mut assets,
                AccountType::Liability => &mut liabilities,
                _ => &mut equity,
            };
            bucket.push(Self::statement_line(balance)?);
        }

        let total_assets = Self::total(&assets)?;
        let total_liabilities = Self::total(&liabilities)?;
        let total_equity = Self::total(&equity)?;

        Ok(BalanceSheet {
            fiscal_period_id,
            assets,
            liabilities,
            equity,
            total_assets,
            total_liabilities,
            total_equity,
            liabilities_and_equity: total_liabilities.checked_add(total_equity)?,
        })
    }

    /// Generates a profit and loss statement from revenue and expense accounts.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Money` on overflow.
    pub fn generate_profit_and_loss(
        fiscal_period_id: FiscalPeriodId,
        lines: &[PostedLine],
    ) -> Result<ProfitAndLoss, LedgerError> {
        let mut revenue = Vec::new();
        let mut expenses = Vec::new();

        for balance in Self::balances_on(Statement::ProfitAndLoss, lines)? {
            let bucket = match balance.account_type {
                AccountType::Revenue => &mut revenue,
                _ => &mut expenses,
            };
            bucket.push(Self::statement_line(balance)?);
        }

        let total_revenue = Self::total(&revenue)?;
        let total_expense = Self::total(&expenses)?;

        Ok(ProfitAndLoss {
            fiscal_period_id,
            revenue,
            expenses,
            total_revenue,
            total_expense,
            net_profit: total_revenue.checked_sub(total_expense)?,
        })
    }

    fn balances_on(
        statement: Statement,
        lines: &[PostedLine],
    ) -> Result<Vec<AccountBalance>, LedgerError> {
        Ok(Self::aggregate(lines)?
            .into_iter()
            .filter(|b| b.account_type.statement() == statement)
            .collect())
    }

    fn statement_line(balance: AccountBalance) -> Result<StatementLine, LedgerError> {
        Ok(StatementLine {
            balance: balance.normal_balance()?,
            account_id: balance.account_id,
            code: balance.code,
            name: balance.name,
        })
    }

    fn total(lines: &[StatementLine]) -> Result<FixedDecimal, LedgerError> {
        Ok(FixedDecimal::checked_sum(lines.iter().map(|l| l.balance))?)
    }
}

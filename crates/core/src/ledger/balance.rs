//! Account balance calculations.
//!
//! - Asset/Expense: balance = debit - credit (debit-normal)
//! - Liability/Equity/Revenue: balance = credit - debit (credit-normal)

use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, DecimalError, FixedDecimal};

use super::entry::EntryType;
use crate::accounts::AccountType;

/// The side that increases an account's balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Debit-normal accounts (Asset, Expense).
    Debit,
    /// Credit-normal accounts (Liability, Equity, Revenue).
    Credit,
}

impl NormalBalance {
    /// Balance seen from this side.
    pub fn balance_of(
        self,
        debit: FixedDecimal,
        credit: FixedDecimal,
    ) -> Result<FixedDecimal, DecimalError> {
        match self {
            Self::Debit => debit.checked_sub(credit),
            Self::Credit => credit.checked_sub(debit),
        }
    }
}

/// Running debit/credit totals for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    /// The account ID.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Total debit amount.
    pub debit_total: FixedDecimal,
    /// Total credit amount.
    pub credit_total: FixedDecimal,
}

impl AccountBalance {
    /// Creates an empty balance.
    #[must_use]
    pub fn new(
        account_id: AccountId,
        code: impl Into<String>,
        name: impl Into<String>,
        account_type: AccountType,
    ) -> Self {
        Self {
            account_id,
            code: code.into(),
            name: name.into(),
            account_type,
            debit_total: FixedDecimal::ZERO,
            credit_total: FixedDecimal::ZERO,
        }
    }

    /// Adds one line's amount to the matching side.
    pub fn apply(
        &mut self,
        entry_type: EntryType,
        amount: FixedDecimal,
    ) -> Result<(), DecimalError> {
        match entry_type {
            EntryType::Debit => self.debit_total = self.debit_total.checked_add(amount)?,
            EntryType::Credit => self.credit_total = self.credit_total.checked_add(amount)?,
        }
        Ok(())
    }

    /// Debit minus credit, regardless of account type.
    pub fn net_balance(&self) -> Result<FixedDecimal, DecimalError> {
        self.debit_total.checked_sub(self.credit_total)
    }

    /// Balance on the account type's normal side.
    pub fn normal_balance(&self) -> Result<FixedDecimal, DecimalError> {
        self.account_type
            .normal_balance()
            .balance_of(self.debit_total, self.credit_total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn fd(s: &str) -> FixedDecimal {
        FixedDecimal::parse(s).unwrap()
    }

    #[rstest]
    #[case(AccountType::Asset, "150.0000")]
    #[case(AccountType::Expense, "150.0000")]
    #[case(AccountType::Liability, "-150.0000")]
    #[case(AccountType::Equity, "-150.0000")]
    #[case(AccountType::Revenue, "-150.0000")]
    fn test_normal_balance_by_type(#[case] account_type: AccountType, #[case] expected: &str) {
        let mut balance = AccountBalance::new(AccountId(1), "1000", "Cash", account_type);
        balance.apply(EntryType::Debit, fd("500")).unwrap();
        balance.apply(EntryType::Credit, fd("350")).unwrap();
        assert_eq!(balance.net_balance().unwrap().to_string(), "150.0000");
        assert_eq!(balance.normal_balance().unwrap().to_string(), expected);
    }

    #[test]
    fn test_apply_reports_overflow() {
        let mut balance = AccountBalance::new(AccountId(1), "1000", "Cash", AccountType::Asset);
        balance.apply(EntryType::Debit, FixedDecimal::MAX).unwrap();
        assert_eq!(
            balance.apply(EntryType::Debit, fd("1")),
            Err(DecimalError::Overflow)
        );
        assert_eq!(balance.debit_total, FixedDecimal::MAX);

        balance.apply(EntryType::Credit, FixedDecimal::MAX).unwrap();
        assert!(balance.net_balance().unwrap().is_zero());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Normal-side balances of the two sides are always opposites.
        #[test]
        fn prop_sides_are_mirror_images(debit in 0i64..1_000_000_000, credit in 0i64..1_000_000_000) {
            let debit = FixedDecimal::from_units(debit);
            let credit = FixedDecimal::from_units(credit);
            prop_assert_eq!(
                NormalBalance::Debit.balance_of(debit, credit).unwrap(),
                -NormalBalance::Credit.balance_of(debit, credit).unwrap()
            );
        }
    }
}

//! Property-based tests for journal line validation.

use proptest::prelude::*;
use tally_shared::types::{AccountId, FixedDecimal};

use super::entry::EntryType;
use super::error::LedgerError;
use super::types::JournalLineInput;
use super::validation::validate_lines;

/// Amounts from 0.0001 to 100,000,000.0000.
fn positive_amount() -> impl Strategy<Value = FixedDecimal> {
    (1i64..1_000_000_000_000i64).prop_map(FixedDecimal::from_units)
}

fn entry_type_strategy() -> impl Strategy<Value = EntryType> {
    prop_oneof![Just(EntryType::Debit), Just(EntryType::Credit)]
}

fn opposite(entry_type: EntryType) -> EntryType {
    match entry_type {
        EntryType::Debit => EntryType::Credit,
        EntryType::Credit => EntryType::Debit,
    }
}

fn make_line(entry_type: EntryType, amount: FixedDecimal) -> JournalLineInput {
    JournalLineInput {
        account_id: AccountId(1),
        entry_type,
        amount,
        description: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any split of a debit total across several lines balances one credit of the sum.
    #[test]
    fn prop_split_debits_balance(amounts in prop::collection::vec(positive_amount(), 1..8)) {
        let total = FixedDecimal::checked_sum(amounts.iter().copied()).unwrap();
        let mut lines: Vec<_> = amounts
            .into_iter()
            .map(|a| make_line(EntryType::Debit, a))
            .collect();
        lines.push(make_line(EntryType::Credit, total));

        let totals = validate_lines(&lines).unwrap();
        prop_assert_eq!(totals.debit, total);
        prop_assert_eq!(totals.credit, total);
    }

    /// Creation succeeds iff debit total equals credit total.
    #[test]
    fn prop_accepts_iff_balanced(debit in positive_amount(), credit in positive_amount()) {
        let lines = vec![
            make_line(EntryType::Debit, debit),
            make_line(EntryType::Credit, credit),
        ];
        let result = validate_lines(&lines);
        if debit == credit {
            prop_assert!(result.is_ok());
        } else {
            let is_unbalanced = matches!(result, Err(LedgerError::Unbalanced { .. }));
            prop_assert!(is_unbalanced);
        }
    }

    /// A zero line is rejected even when the rest balances.
    #[test]
    fn prop_zero_amount_rejected(entry_type in entry_type_strategy(), amount in positive_amount()) {
        let lines = vec![
            make_line(entry_type, amount),
            make_line(opposite(entry_type), amount),
            make_line(entry_type, FixedDecimal::ZERO),
        ];
        let is_zero = matches!(validate_lines(&lines), Err(LedgerError::ZeroAmount { line: 3 }));
        prop_assert!(is_zero);
    }

    /// A negative line is rejected.
    #[test]
    fn prop_negative_amount_rejected(entry_type in entry_type_strategy(), amount in positive_amount()) {
        let lines = vec![
            make_line(entry_type, -amount),
            make_line(opposite(entry_type), amount),
        ];
        let is_negative = matches!(validate_lines(&lines), Err(LedgerError::NegativeAmount { line: 1 }));
        prop_assert!(is_negative);
    }

    /// One-sided entries never balance.
    #[test]
    fn prop_single_sided_rejected(
        entry_type in entry_type_strategy(),
        amounts in prop::collection::vec(positive_amount(), 2..6),
    ) {
        let lines: Vec<_> = amounts.into_iter().map(|a| make_line(entry_type, a)).collect();
        let is_unbalanced = matches!(validate_lines(&lines), Err(LedgerError::Unbalanced { .. }));
        prop_assert!(is_unbalanced);
    }
}

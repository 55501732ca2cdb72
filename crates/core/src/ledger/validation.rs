//! Double-entry rules checked before anything touches storage.

use super::error::LedgerError;
use super::types::{EntryTotals, JournalLineInput};

/// Validates the shape of a set of journal lines.
///
/// Rules, in order: at least two lines, every amount strictly positive,
/// both sides summable without overflow, debits equal credits at full precision.
///
/// # Errors
///
/// Returns the first violated rule.
pub fn validate_lines(lines: &[JournalLineInput]) -> Result<EntryTotals, LedgerError> {
    if lines.len() < 2 {
        return Err(LedgerError::InsufficientLines);
    }

    for (index, line) in lines.iter().enumerate() {
        if line.amount.is_zero() {
            return Err(LedgerError::ZeroAmount { line: index + 1 });
        }
        if line.amount.is_negative() {
            return Err(LedgerError::NegativeAmount { line: index + 1 });
        }
    }

    let totals = EntryTotals::from_lines(lines.iter().map(|l| (l.entry_type, l.amount)))?;
    if !totals.is_balanced() {
        return Err(LedgerError::Unbalanced {
            debit: totals.debit,
            credit: totals.credit,
        });
    }

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::EntryType;
    use rust_decimal_macros::dec;
    use tally_shared::types::{AccountId, FixedDecimal};

    fn make_line(entry_type: EntryType, amount: FixedDecimal) -> JournalLineInput {
        JournalLineInput {
            account_id: AccountId(1),
            entry_type,
            amount,
            description: None,
        }
    }

    #[test]
    fn test_balanced_lines() {
        let lines = vec![
            make_line(EntryType::Debit, dec!(100.00).try_into().unwrap()),
            make_line(EntryType::Credit, dec!(100.00).try_into().unwrap()),
        ];
        let totals = validate_lines(&lines).unwrap();
        assert_eq!(totals.debit.to_string(), "100.0000");
    }

    #[test]
    fn test_unbalanced_lines() {
        let lines = vec![
            make_line(EntryType::Debit, dec!(100.0000).try_into().unwrap()),
            make_line(EntryType::Credit, dec!(90.0000).try_into().unwrap()),
        ];
        let err = validate_lines(&lines).unwrap_err();
        assert!(matches!(err, LedgerError::Unbalanced { .. }));
        assert!(err.to_string().contains("unbalanced"));
    }

    #[test]
    fn test_zero_debit_rejected() {
        let lines = vec![
            make_line(EntryType::Debit, FixedDecimal::ZERO),
            make_line(EntryType::Credit, dec!(1.0000).try_into().unwrap()),
        ];
        assert!(matches!(
            validate_lines(&lines),
            Err(LedgerError::ZeroAmount { line: 1 })
        ));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let lines = vec![
            make_line(EntryType::Debit, dec!(5).try_into().unwrap()),
            make_line(EntryType::Credit, dec!(-5).try_into().unwrap()),
        ];
        assert!(matches!(
            validate_lines(&lines),
            Err(LedgerError::NegativeAmount { line: 2 })
        ));
    }

    #[test]
    fn test_debit_only_rejected() {
        let lines = vec![
            make_line(EntryType::Debit, dec!(50).try_into().unwrap()),
            make_line(EntryType::Debit, dec!(50).try_into().unwrap()),
        ];
        assert!(matches!(
            validate_lines(&lines),
            Err(LedgerError::Unbalanced { .. })
        ));
    }

    #[test]
    fn test_single_line_rejected() {
        let lines = vec![make_line(EntryType::Debit, dec!(50).try_into().unwrap())];
        assert!(matches!(
            validate_lines(&lines),
            Err(LedgerError::InsufficientLines)
        ));
        assert!(matches!(validate_lines(&[]), Err(LedgerError::InsufficientLines)));
    }

    #[test]
    fn test_overflowing_totals_rejected() {
        let huge = FixedDecimal::parse("5000000000000000000000000").unwrap();
        let lines = vec![
            make_line(EntryType::Debit, huge),
            make_line(EntryType::Debit, huge),
            make_line(EntryType::Credit, dec!(1).try_into().unwrap()),
        ];
        let err = validate_lines(&lines).unwrap_err();
        assert!(matches!(err, LedgerError::Money(_)));
        assert_eq!(err.kind(), crate::ledger::ErrorKind::Validation);
    }

    #[test]
    fn test_fractional_cents_balance() {
        let lines = vec![
            make_line(EntryType::Debit, dec!(0.1000).try_into().unwrap()),
            make_line(EntryType::Debit, dec!(0.2000).try_into().unwrap()),
            make_line(EntryType::Credit, dec!(0.3000).try_into().unwrap()),
        ];
        assert!(validate_lines(&lines).is_ok());
    }
}

//! Concurrent access tests for journal postings.
//!
//! Sessions are serializable, so concurrent writers never lose updates
//! and uniqueness checks hold across racing requests.

mod common;

use std::collections::HashSet;

use futures::future::join_all;
use rust_decimal_macros::dec;
use tally_core::LedgerError;
use tally_core::ledger::EntryType;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_postings_keep_totals() -> anyhow::Result<()> {
    let service = common::service();
    let chart = common::seed_chart(&service).await?;
    let period_id = common::january(&service).await?.id;
    let (cash, sales) = (chart.cash.id, chart.sales.id);

    let results = join_all((0..100).map(|i| {
        let service = &service;
        let lines = vec![
            common::line(cash, EntryType::Debit, dec!(1.2345)),
            common::line(sales, EntryType::Credit, dec!(1.2345)),
        ];
        async move {
            let entry = service
                .create_journal_entry(
                    common::TENANT,
                    common::entry_input(
                        &format!("JE-{i:03}"),
                        Some(period_id),
                        common::date(1, 15),
                        lines,
                    ),
                )
                .await?;
            service.post_entry(common::TENANT, entry.id).await
        }
    }))
    .await;

    let mut ids = HashSet::new();
    for result in results {
        ids.insert(result?.id);
    }
    assert_eq!(ids.len(), 100);

    let trial = service.get_trial_balance(common::TENANT, period_id).await?;
    assert_eq!(trial.total_debit.to_string(), "123.4500");
    assert_eq!(trial.total_credit.to_string(), "123.4500");
    assert!(trial.is_balanced);
    Ok(())
}

#[tokio::test]
async fn test_racing_duplicate_references() -> anyhow::Result<()> {
    let service = common::service();
    let chart = common::seed_chart(&service).await?;

    let results = join_all((0..10).map(|_| {
        service.create_journal_entry(
            common::TENANT,
            common::entry_input(
                "JE-RACE",
                None,
                common::date(1, 15),
                vec![
                    common::line(chart.cash.id, EntryType::Debit, dec!(5)),
                    common::line(chart.sales.id, EntryType::Credit, dec!(5)),
                ],
            ),
        )
    }))
    .await;

    let created = results.iter().filter(|r| r.is_ok()).count();
    let duplicates = results
        .iter()
        .filter(|r| matches!(r, Err(LedgerError::DuplicateReference(_))))
        .count();
    assert_eq!(created, 1);
    assert_eq!(duplicates, 9);
    Ok(())
}

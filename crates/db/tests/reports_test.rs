//! Report generation over posted entries.

mod common;

use common::*;
use rust_decimal_macros::dec;
use tally_core::ErrorKind;
use tally_core::ledger::EntryType;
use tally_shared::types::FiscalPeriodId;

async fn post(
    service: &Service,
    reference: &str,
    period: FiscalPeriodId,
    lines: Vec<tally_core::ledger::JournalLineInput>,
) -> anyhow::Result<()> {
    let entry = service
        .create_journal_entry(TENANT, entry_input(reference, Some(period), date(1, 10), lines))
        .await?;
    service.post_entry(TENANT, entry.id).await?;
    Ok(())
}

#[tokio::test]
async fn test_empty_period_reports_zero() -> anyhow::Result<()> {
    let service = service();
    let period = january(&service).await?;

    let sheet = service.get_balance_sheet(TENANT, period.id).await?;
    let json = serde_json::to_value(&sheet)?;
    for key in ["total_assets", "total_liabilities", "total_equity"] {
        assert_eq!(json[key], "0.0000");
    }
    for key in ["assets", "liabilities", "equity"] {
        assert_eq!(json[key], serde_json::json!([]));
    }

    let trial = service.get_trial_balance(TENANT, period.id).await?;
    assert!(trial.accounts.is_empty());
    assert!(trial.is_balanced);

    let pnl = service.get_profit_and_loss(TENANT, period.id).await?;
    assert_eq!(pnl.net_profit.to_string(), "0.0000");
    Ok(())
}

#[tokio::test]
async fn test_reports_only_count_posted_entries() -> anyhow::Result<()> {
    let service = service();
    let chart = seed_chart(&service).await?;
    let period = january(&service).await?;

    post(
        &service,
        "JE-CAPITAL",
        period.id,
        vec![
            line(chart.cash.id, EntryType::Debit, dec!(5000)),
            line(chart.capital.id, EntryType::Credit, dec!(5000)),
        ],
    )
    .await?;
    post(
        &service,
        "JE-SALE",
        period.id,
        vec![
            line(chart.cash.id, EntryType::Debit, dec!(1000.0000)),
            line(chart.sales.id, EntryType::Credit, dec!(1000.0000)),
        ],
    )
    .await?;
    post(
        &service,
        "JE-RENT",
        period.id,
        vec![
            line(chart.rent.id, EntryType::Debit, dec!(750.0000)),
            line(chart.cash.id, EntryType::Credit, dec!(500.0000)),
            line(chart.payables.id, EntryType::Credit, dec!(250.0000)),
        ],
    )
    .await?;

    // Draft and cancelled entries never reach reports.
    let draft = vec![
        line(chart.cash.id, EntryType::Debit, dec!(99)),
        line(chart.sales.id, EntryType::Credit, dec!(99)),
    ];
    service
        .create_journal_entry(TENANT, entry_input("JE-DRAFT", Some(period.id), date(1, 11), draft.clone()))
        .await?;
    let cancelled = service
        .create_journal_entry(TENANT, entry_input("JE-VOID", Some(period.id), date(1, 12), draft))
        .await?;
    service.cancel_entry(TENANT, cancelled.id).await?;

    let trial = service.get_trial_balance(TENANT, period.id).await?;
    let cash = trial.accounts.iter().find(|r| r.code == "1000").unwrap();
    assert_eq!(cash.total_debit.to_string(), "6000.0000");
    assert_eq!(cash.total_credit.to_string(), "500.0000");
    assert_eq!(cash.net_balance.to_string(), "5500.0000");
    assert_eq!(trial.total_debit.to_string(), "6750.0000");
    assert!(trial.is_balanced);
    let codes: Vec<_> = trial.accounts.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, ["1000", "2000", "3000", "4000", "5000"]);

    let pnl = service.get_profit_and_loss(TENANT, period.id).await?;
    assert_eq!(pnl.total_revenue.to_string(), "1000.0000");
    assert_eq!(pnl.total_expense.to_string(), "750.0000");
    assert_eq!(pnl.net_profit.to_string(), "250.0000");

    let sheet = service.get_balance_sheet(TENANT, period.id).await?;
    assert_eq!(sheet.total_assets.to_string(), "5500.0000");
    assert_eq!(sheet.total_liabilities.to_string(), "250.0000");
    assert_eq!(sheet.total_equity.to_string(), "5000.0000");
    // Current earnings stay on the P&L until closed into equity.
    assert_eq!(
        sheet.total_assets,
        sheet.liabilities_and_equity + pnl.net_profit
    );
    Ok(())
}

#[tokio::test]
async fn test_reports_are_period_scoped() -> anyhow::Result<()> {
    let service = service();
    let chart = seed_chart(&service).await?;
    let period = january(&service).await?;

    let unassigned = service
        .create_journal_entry(
            TENANT,
            entry_input(
                "JE-LOOSE",
                None,
                date(1, 10),
                vec![
                    line(chart.cash.id, EntryType::Debit, dec!(10)),
                    line(chart.sales.id, EntryType::Credit, dec!(10)),
                ],
            ),
        )
        .await?;
    service.post_entry(TENANT, unassigned.id).await?;

    let trial = service.get_trial_balance(TENANT, period.id).await?;
    assert!(trial.accounts.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_closed_period_still_reports() -> anyhow::Result<()> {
    let service = service();
    let chart = seed_chart(&service).await?;
    let period = january(&service).await?;
    post(
        &service,
        "JE-1",
        period.id,
        vec![
            line(chart.cash.id, EntryType::Debit, dec!(500.0000)),
            line(chart.cash.id, EntryType::Credit, dec!(350.0000)),
            line(chart.sales.id, EntryType::Credit, dec!(150.0000)),
        ],
    )
    .await?;
    service.close_fiscal_period(TENANT, period.id).await?;

    let trial = service.get_trial_balance(TENANT, period.id).await?;
    assert_eq!(trial.accounts[0].net_balance.to_string(), "150.0000");
    Ok(())
}

#[tokio::test]
async fn test_unknown_period_not_found() {
    let service = service();
    let err = service
        .get_trial_balance(TENANT, FiscalPeriodId(12))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(service.get_balance_sheet(TENANT, FiscalPeriodId(12)).await.is_err());
    assert!(service.get_profit_and_loss(TENANT, FiscalPeriodId(12)).await.is_err());
}

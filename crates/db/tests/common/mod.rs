//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_core::AccountingService;
use tally_core::accounts::{Account, AccountType, CreateAccountInput};
use tally_core::fiscal::{CreateFiscalPeriodInput, FiscalPeriod};
use tally_core::ledger::{CreateJournalEntryInput, EntryType, JournalLineInput};
use tally_db::MemoryLedgerStore;
use tally_shared::LedgerConfig;
use tally_shared::types::{AccountId, FiscalPeriodId, TenantId};

pub const TENANT: TenantId = TenantId(1);
pub const OTHER_TENANT: TenantId = TenantId(2);

pub type Service = AccountingService<MemoryLedgerStore>;

pub fn service() -> Service {
    service_with(LedgerConfig::default())
}

pub fn service_with(config: LedgerConfig) -> Service {
    AccountingService::new(Arc::new(MemoryLedgerStore::new()), config)
}

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, month, day).unwrap()
}

pub fn account_input(code: &str, name: &str, account_type: AccountType) -> CreateAccountInput {
    CreateAccountInput {
        code: code.to_string(),
        name: name.to_string(),
        account_type,
        parent_id: None,
        is_header: false,
        is_active: true,
        currency: None,
        description: None,
    }
}

pub fn line(account: AccountId, entry_type: EntryType, amount: Decimal) -> JournalLineInput {
    JournalLineInput {
        account_id: account,
        entry_type,
        amount: amount.try_into().expect("amount fits the ledger scale"),
        description: None,
    }
}

pub fn entry_input(
    reference: &str,
    period: Option<FiscalPeriodId>,
    entry_date: NaiveDate,
    lines: Vec<JournalLineInput>,
) -> CreateJournalEntryInput {
    CreateJournalEntryInput {
        fiscal_period_id: period,
        reference_number: reference.to_string(),
        description: None,
        entry_date,
        lines,
    }
}

/// A small chart: cash, payables, capital, sales, rent.
pub struct Chart {
    pub cash: Account,
    pub payables: Account,
    pub capital: Account,
    pub sales: Account,
    pub rent: Account,
}

pub async fn seed_chart(service: &Service) -> anyhow::Result<Chart> {
    Ok(Chart {
        cash: service
            .create_account(TENANT, account_input("1000", "Cash", AccountType::Asset))
            .await?,
        payables: service
            .create_account(TENANT, account_input("2000", "Payables", AccountType::Liability))
            .await?,
        capital: service
            .create_account(TENANT, account_input("3000", "Capital", AccountType::Equity))
            .await?,
        sales: service
            .create_account(TENANT, account_input("4000", "Sales", AccountType::Revenue))
            .await?,
        rent: service
            .create_account(TENANT, account_input("5000", "Rent", AccountType::Expense))
            .await?,
    })
}

pub async fn january(service: &Service) -> anyhow::Result<FiscalPeriod> {
    Ok(service
        .create_fiscal_period(
            TENANT,
            CreateFiscalPeriodInput {
                name: "January 2026".into(),
                start_date: date(1, 1),
                end_date: date(1, 31),
            },
        )
        .await?)
}

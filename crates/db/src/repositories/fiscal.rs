//! Fiscal period repository.

use tally_core::LedgerError;
use tally_core::fiscal::{FiscalPeriod, NewFiscalPeriod};
use tally_core::ports::FiscalPeriodRepository;
use tally_shared::types::{FiscalPeriodId, TenantId};

use crate::store::LedgerState;

/// Fiscal period table of one session.
#[derive(Debug)]
pub struct FiscalPeriodStore<'a> {
    state: &'a mut LedgerState,
}

impl<'a> FiscalPeriodStore<'a> {
    pub(crate) fn new(state: &'a mut LedgerState) -> Self {
        Self { state }
    }
}

impl FiscalPeriodRepository for FiscalPeriodStore<'_> {
    async fn all(&self, tenant_id: TenantId) -> Result<Vec<FiscalPeriod>, LedgerError> {
        let mut periods: Vec<FiscalPeriod> = self
            .state
            .periods
            .values()
            .filter(|p| p.tenant_id == tenant_id)
            .cloned()
            .collect();
        periods.sort_by_key(|p| (p.start_date, p.id));
        Ok(periods)
    }

    async fn find_or_fail(
        &self,
        tenant_id: TenantId,
        id: FiscalPeriodId,
    ) -> Result<FiscalPeriod, LedgerError> {
        self.state
            .periods
            .get(&id)
            .filter(|p| p.tenant_id == tenant_id)
            .cloned()
            .ok_or(LedgerError::FiscalPeriodNotFound(id))
    }

    async fn create(
        &mut self,
        tenant_id: TenantId,
        period: NewFiscalPeriod,
    ) -> Result<FiscalPeriod, LedgerError> {
        let id = self.state.next_period_id();
        let period = FiscalPeriod {
            id,
            tenant_id,
            name: period.name,
            start_date: period.start_date,
            end_date: period.end_date,
            is_closed: false,
        };
        self.state.periods.insert(id, period.clone());
        self.state.touch();
        Ok(period)
    }

    async fn update(
        &mut self,
        tenant_id: TenantId,
        period: FiscalPeriod,
    ) -> Result<FiscalPeriod, LedgerError> {
        if period.tenant_id != tenant_id {
            return Err(LedgerError::FiscalPeriodNotFound(period.id));
        }
        let slot = self
            .state
            .periods
            .get_mut(&period.id)
            .filter(|p| p.tenant_id == tenant_id)
            .ok_or(LedgerError::FiscalPeriodNotFound(period.id))?;
        *slot = period.clone();
        self.state.touch();
        Ok(period)
    }
}

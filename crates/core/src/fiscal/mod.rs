//! Fiscal period management.

pub mod period;

pub use period::{
    CreateFiscalPeriodInput, FiscalPeriod, NewFiscalPeriod, date_ranges_overlap,
    validate_date_range,
};

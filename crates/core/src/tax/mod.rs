//! Tax rates and tax calculation.

pub mod rate;

pub use rate::{TaxBreakdown, TaxLine, TaxRate, TaxType, calculate_taxes};

//! Financial report generation.
//!
//! Pure folds over posted lines:
//! - Trial Balance
//! - Balance Sheet
//! - Profit and Loss

pub mod service;
pub mod types;


pub use service::ReportService;
pub use types::*;

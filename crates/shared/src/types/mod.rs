//! Common types used across the application.

pub mod decimal;
pub mod id;
pub mod money;
pub mod pagination;

pub use decimal::{DecimalError, FixedDecimal};
pub use id::*;
pub use money::{Currency, Money, MoneyError};
pub use pagination::{PageMeta, PageRequest, PageResponse};

//! Shared types, errors, and configuration for Tally.
//!
//! This crate provides common types used across all other crates:
//! - Fixed-scale decimal and money types (never floating point)
//! - Typed IDs for type-safe entity references
//! - Pagination types for list operations
//! - Application-wide error envelope
//! - Configuration management and tracing bootstrap

pub mod config;
pub mod error;
pub mod telemetry;
pub mod types;

pub use config::{AppConfig, LedgerConfig, LoggingConfig};
pub use error::{AppError, AppResult};
pub use types::{Currency, DecimalError, FixedDecimal, Money, MoneyError};

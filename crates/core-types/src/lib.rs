//! # Core Types
//!
//! Layer 0 of the workspace. Defines the vocabulary every other crate speaks:
//! fiscal years, typed line items, the two input statements, and the
//! `MetricValue`/`MetricTable` pair that every calculator produces.
//!
//! This crate performs no analysis of its own.

pub mod enums;
pub mod error;
pub mod metric;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{BalanceSheetItem, IncomeStatementItem, LineItem, StatementKind};
pub use error::CoreError;
pub use metric::{Metric, MetricTable, MetricValue, OrOverflow};
pub use structs::{BalanceSheet, FiscalYear, IncomeStatement, Statement};

//! # Statement Store
//!
//! Owns the two input statements for an analysis run and guarantees they agree
//! on the fiscal-year sequence before any calculator sees them.
//!
//! - `FinancialStatements`: the validated, immutable pair.
//! - `loader`: reads the JSON statement document.
//! - `sample`: the built-in demonstration dataset.

pub mod error;
pub mod loader;
pub mod sample;
pub mod store;

pub use error::StatementError;
pub use loader::{StatementDocument, from_json_str, load_from_json};
pub use sample::sample_statements;
pub use store::FinancialStatements;

//! # Credit Analytics Engine
//!
//! This crate derives the standardized small-business credit metrics from a
//! validated pair of financial statements.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files,
//!   terminals or configuration. It depends only on `core-types` and `statements`.
//! - **Stateless Calculation:** Every calculator is a pure function that reads its
//!   declared inputs and returns a fresh `MetricTable`. Re-running the engine on the
//!   same statements produces identical tables.
//!
//! ## Pipeline
//!
//! `uca` and `ebitda` read the statements directly; `coverage` builds on the EBITDA
//! table and the balance sheet; `ratios` reads both statements. `AnalyticsEngine`
//! runs them in that order and bundles the results into an `AnalysisReport`.

// Declare the modules that constitute this crate.
pub mod coverage;
pub mod ebitda;
pub mod engine;
pub mod error;
pub mod ratios;
pub mod report;
pub mod uca;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export the key components to create a clean, public-facing API.
pub use coverage::CoverageMetric;
pub use ebitda::EbitdaMetric;
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use ratios::RatioMetric;
pub use report::{AnalysisReport, KeyMetric};
pub use uca::UcaMetric;

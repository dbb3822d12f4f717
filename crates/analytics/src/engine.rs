use crate::error::AnalyticsError;
use crate::report::AnalysisReport;
use crate::{coverage, ebitda, ratios, uca};
use statements::FinancialStatements;

/// A stateless calculator for deriving credit metrics from a statement pair.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for the credit analysis pipeline.
    ///
    /// # Arguments
    ///
    /// * `statements` - A validated income statement and balance sheet sharing one
    ///   fiscal-year sequence.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AnalysisReport` or the first `AnalyticsError`
    /// raised by any stage. No partial report is returned.
    pub fn run(&self, statements: &FinancialStatements) -> Result<AnalysisReport, AnalyticsError> {
        let uca = uca::calculate(statements)?;
        tracing::info!("UCA cash flow analysis complete.");

        let ebitda = ebitda::calculate(statements.income_statement())?;
        tracing::info!("EBITDA analysis complete.");

        let coverage = coverage::calculate(&ebitda, statements.balance_sheet())?;
        tracing::info!("Debt service coverage analysis complete.");

        let ratios = ratios::calculate(statements)?;
        tracing::info!("Financial ratio analysis complete.");

        Ok(AnalysisReport {
            fiscal_years: statements.fiscal_years().to_vec(),
            uca,
            ebitda,
            coverage,
            ratios,
        })
    }
}

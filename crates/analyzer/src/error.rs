use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyzerError {
    #[error("Cannot build a recommendation: {0}")]
    Core(#[from] CoreError),

    #[error("The analysis report covers no fiscal years")]
    NoFiscalYears,
}

use crate::enums::StatementKind;
use crate::structs::FiscalYear;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error(
        "Fiscal years differ between statements: income statement has [{}], balance sheet has [{}]",
        join_years(.income_statement),
        join_years(.balance_sheet)
    )]
    DataMismatch {
        income_statement: Vec<FiscalYear>,
        balance_sheet: Vec<FiscalYear>,
    },

    #[error("{statement} is missing line item '{line_item}' for fiscal year {year}")]
    MissingLineItem {
        statement: StatementKind,
        line_item: String,
        year: FiscalYear,
    },

    #[error("{0} declares no fiscal years")]
    NoFiscalYears(StatementKind),

    #[error("{statement} lists fiscal year {year} more than once")]
    DuplicateFiscalYear {
        statement: StatementKind,
        year: FiscalYear,
    },

    #[error("Metric '{metric}' has no finite value for fiscal year {year}")]
    MissingMetric { metric: String, year: FiscalYear },

    #[error("Metric '{metric}' exceeds the representable decimal range for fiscal year {year}")]
    ArithmeticOverflow { metric: String, year: FiscalYear },
}

fn join_years(years: &[FiscalYear]) -> String {
    years
        .iter()
        .map(FiscalYear::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

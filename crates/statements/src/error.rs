use core_types::{CoreError, FiscalYear, StatementKind};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatementError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Failed to read statements from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Statement document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{statement} row '{line_item}' has a value for fiscal year {year}, which the statement does not declare")]
    UndeclaredFiscalYear {
        statement: StatementKind,
        line_item: String,
        year: FiscalYear,
    },

    #[error("{statement} rows '{first_label}' and '{second_label}' both map to '{line_item}' for fiscal year {year}")]
    DuplicateLineItem {
        statement: StatementKind,
        line_item: String,
        first_label: String,
        second_label: String,
        year: FiscalYear,
    },

    #[error("Invalid sample request: {0}")]
    InvalidSample(String),
}

use crate::error::StatementError;
use crate::store::FinancialStatements;
use core_types::{FiscalYear, LineItem, Statement};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// On-disk form of the two statements.
///
/// ```json
/// {
///   "income_statement": {
///     "fiscal_years": ["2023", "2024"],
///     "line_items": { "Revenue": { "2023": 500000, "2024": 550000 } }
///   },
///   "balance_sheet": { "fiscal_years": ["2023", "2024"], "line_items": {} }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementDocument {
    pub income_statement: StatementTable,
    pub balance_sheet: StatementTable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementTable {
    /// Chronological order; the last entry is the most recent year.
    pub fiscal_years: Vec<FiscalYear>,
    #[serde(default)]
    pub line_items: BTreeMap<String, BTreeMap<FiscalYear, Decimal>>,
}

impl StatementDocument {
    pub fn into_statements(self) -> Result<FinancialStatements, StatementError> {
        let income_statement = build_statement(self.income_statement)?;
        let balance_sheet = build_statement(self.balance_sheet)?;
        Ok(FinancialStatements::new(income_statement, balance_sheet)?)
    }

    pub fn from_statements(statements: &FinancialStatements) -> Self {
        Self {
            income_statement: table_from(statements.income_statement()),
            balance_sheet: table_from(statements.balance_sheet()),
        }
    }
}

/// Reads and validates a statement document from disk.
pub fn load_from_json(path: &Path) -> Result<FinancialStatements, StatementError> {
    let contents = std::fs::read_to_string(path).map_err(|source| StatementError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let statements = from_json_str(&contents)?;
    tracing::info!(
        path = %path.display(),
        years = statements.fiscal_years().len(),
        "Loaded financial statements."
    );
    Ok(statements)
}

pub fn from_json_str(contents: &str) -> Result<FinancialStatements, StatementError> {
    let document: StatementDocument = serde_json::from_str(contents)?;
    document.into_statements()
}

/// Rows are matched to accounts by label or alias. Two rows resolving to the
/// same account may not both supply the same year.
fn build_statement<K: LineItem>(table: StatementTable) -> Result<Statement<K>, StatementError> {
    let mut statement = Statement::<K>::new(table.fiscal_years)?;
    let mut sources: BTreeMap<K, String> = BTreeMap::new();

    for (label, cells) in table.line_items {
        let item = K::from_label(&label);
        if let Some(item) = item {
            sources.entry(item).or_insert_with(|| label.clone());
        }

        for (year, value) in cells {
            let accepted = match item {
                Some(item) => {
                    if statement.get(item, &year).is_some() {
                        let first_label = sources.get(&item).cloned().unwrap_or_default();
                        return Err(StatementError::DuplicateLineItem {
                            statement: K::STATEMENT,
                            line_item: item.label().to_string(),
                            first_label,
                            second_label: label,
                            year,
                        });
                    }
                    statement.insert(item, &year, value)
                }
                None => statement.insert_unrecognized(&label, &year, value),
            };
            if !accepted {
                return Err(StatementError::UndeclaredFiscalYear {
                    statement: K::STATEMENT,
                    line_item: label,
                    year,
                });
            }
        }
    }

    Ok(statement)
}

fn table_from<K: LineItem>(statement: &Statement<K>) -> StatementTable {
    let mut line_items = BTreeMap::new();

    for item in statement.line_items() {
        let row: BTreeMap<FiscalYear, Decimal> = statement
            .fiscal_years()
            .iter()
            .filter_map(|year| statement.get(item, year).map(|v| (year.clone(), v)))
            .collect();
        line_items.insert(item.label().to_string(), row);
    }
    for (label, row) in statement.unrecognized_rows() {
        line_items.insert(label.to_string(), row.clone());
    }

    StatementTable {
        fiscal_years: statement.fiscal_years().to_vec(),
        line_items,
    }
}

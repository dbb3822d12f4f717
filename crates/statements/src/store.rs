use core_types::{BalanceSheet, CoreError, FiscalYear, IncomeStatement, LineItem, Statement};
use serde::Serialize;

/// The validated pair of input statements for one analysis run.
///
/// Both statements are guaranteed to list the same fiscal years in the same
/// order. Missing rows are deliberately not checked here; a calculator that
/// needs an absent row reports it when it runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialStatements {
    income_statement: IncomeStatement,
    balance_sheet: BalanceSheet,
}

impl FinancialStatements {
    pub fn new(
        income_statement: IncomeStatement,
        balance_sheet: BalanceSheet,
    ) -> Result<Self, CoreError> {
        if income_statement.fiscal_years() != balance_sheet.fiscal_years() {
            return Err(CoreError::DataMismatch {
                income_statement: income_statement.fiscal_years().to_vec(),
                balance_sheet: balance_sheet.fiscal_years().to_vec(),
            });
        }

        warn_unrecognized(&income_statement);
        warn_unrecognized(&balance_sheet);

        tracing::debug!(
            years = income_statement.fiscal_years().len(),
            "Statements validated."
        );

        Ok(Self {
            income_statement,
            balance_sheet,
        })
    }

    pub fn income_statement(&self) -> &IncomeStatement {
        &self.income_statement
    }

    pub fn balance_sheet(&self) -> &BalanceSheet {
        &self.balance_sheet
    }

    pub fn fiscal_years(&self) -> &[FiscalYear] {
        self.income_statement.fiscal_years()
    }

    pub fn latest_year(&self) -> Option<&FiscalYear> {
        self.fiscal_years().last()
    }
}

fn warn_unrecognized<K: LineItem>(statement: &Statement<K>) {
    for label in statement.unrecognized_labels() {
        tracing::warn!(
            statement = %K::STATEMENT,
            line_item = label,
            "Unrecognized line item kept but not used by any calculator."
        );
    }
}

//! Uniform Credit Analysis (UCA) operating cash flow.
//!
//! Net income plus non-cash charges plus working-capital movements. A shrinking
//! asset releases cash, so asset deltas are `prior - current`; a growing
//! liability retains cash, so liability deltas are `current - prior`.

use crate::error::AnalyticsError;
use core_types::{
    BalanceSheet, BalanceSheetItem, FiscalYear, IncomeStatementItem, Metric, MetricTable, OrOverflow,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use statements::FinancialStatements;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UcaMetric {
    NetIncome,
    Depreciation,
    Amortization,
    ChangeInAccountsReceivable,
    ChangeInInventory,
    ChangeInAccountsPayable,
    ChangeInOtherCurrentItems,
    UcaCashFlow,
}

impl Metric for UcaMetric {
    const ALL: &'static [Self] = &[
        UcaMetric::NetIncome,
        UcaMetric::Depreciation,
        UcaMetric::Amortization,
        UcaMetric::ChangeInAccountsReceivable,
        UcaMetric::ChangeInInventory,
        UcaMetric::ChangeInAccountsPayable,
        UcaMetric::ChangeInOtherCurrentItems,
        UcaMetric::UcaCashFlow,
    ];

    fn label(&self) -> &'static str {
        match self {
            UcaMetric::NetIncome => "Net Income",
            UcaMetric::Depreciation => "Depreciation",
            UcaMetric::Amortization => "Amortization",
            UcaMetric::ChangeInAccountsReceivable => "Change in Accounts Receivable",
            UcaMetric::ChangeInInventory => "Change in Inventory",
            UcaMetric::ChangeInAccountsPayable => "Change in Accounts Payable",
            UcaMetric::ChangeInOtherCurrentItems => "Change in Other Current Items",
            UcaMetric::UcaCashFlow => "UCA Cash Flow",
        }
    }
}

/// Cash impact of working-capital movement between two consecutive years.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct WorkingCapitalDeltas {
    receivables: Decimal,
    inventory: Decimal,
    payables: Decimal,
    other_current: Decimal,
}

impl WorkingCapitalDeltas {
    fn between(
        balance_sheet: &BalanceSheet,
        prior: &FiscalYear,
        current: &FiscalYear,
    ) -> Result<Self, AnalyticsError> {
        let delta = |metric: UcaMetric,
                     from: &FiscalYear,
                     to: &FiscalYear,
                     item: BalanceSheetItem|
         -> Result<Decimal, AnalyticsError> {
            let earlier = balance_sheet.value(item, from)?;
            let later = balance_sheet.value(item, to)?;
            Ok(earlier.checked_sub(later).or_overflow(metric, current)?)
        };
        // Assets release cash as they shrink, liabilities retain it as they grow.
        let asset_release = |metric, item| delta(metric, prior, current, item);
        let liability_growth = |metric, item| delta(metric, current, prior, item);

        let receivables = asset_release(
            UcaMetric::ChangeInAccountsReceivable,
            BalanceSheetItem::AccountsReceivable,
        )?;
        let inventory = asset_release(UcaMetric::ChangeInInventory, BalanceSheetItem::Inventory)?;
        let payables = liability_growth(
            UcaMetric::ChangeInAccountsPayable,
            BalanceSheetItem::AccountsPayable,
        )?;
        let other_current = asset_release(
            UcaMetric::ChangeInOtherCurrentItems,
            BalanceSheetItem::OtherCurrentAssets,
        )?
        .checked_add(liability_growth(
            UcaMetric::ChangeInOtherCurrentItems,
            BalanceSheetItem::OtherCurrentLiabilities,
        )?)
        .or_overflow(UcaMetric::ChangeInOtherCurrentItems, current)?;

        Ok(Self {
            receivables,
            inventory,
            payables,
            other_current,
        })
    }

    fn total(&self) -> Option<Decimal> {
        self.receivables
            .checked_add(self.inventory)?
            .checked_add(self.payables)?
            .checked_add(self.other_current)
    }
}

/// Computes the UCA cash flow table.
///
/// The first fiscal year has no prior balance sheet, so its deltas are zero and
/// its working-capital rows are never read.
pub fn calculate(statements: &FinancialStatements) -> Result<MetricTable<UcaMetric>, AnalyticsError> {
    let income = statements.income_statement();
    let balance = statements.balance_sheet();
    let mut table = MetricTable::new(statements.fiscal_years());

    for year in statements.fiscal_years() {
        let net_income = income.value(IncomeStatementItem::NetIncome, year)?;
        let depreciation = income.value(IncomeStatementItem::Depreciation, year)?;
        let amortization = income.value(IncomeStatementItem::Amortization, year)?;

        let deltas = match balance.prior_year(year) {
            Some(prior) => WorkingCapitalDeltas::between(balance, prior, year)?,
            None => WorkingCapitalDeltas::default(),
        };

        let uca_cash_flow = net_income
            .checked_add(depreciation)
            .and_then(|v| v.checked_add(amortization))
            .and_then(|v| v.checked_add(deltas.total()?))
            .or_overflow(UcaMetric::UcaCashFlow, year)?;
        tracing::debug!(%year, %uca_cash_flow, "UCA cash flow calculated.");

        table.insert(UcaMetric::NetIncome, year, net_income);
        table.insert(UcaMetric::Depreciation, year, depreciation);
        table.insert(UcaMetric::Amortization, year, amortization);
        table.insert(UcaMetric::ChangeInAccountsReceivable, year, deltas.receivables);
        table.insert(UcaMetric::ChangeInInventory, year, deltas.inventory);
        table.insert(UcaMetric::ChangeInAccountsPayable, year, deltas.payables);
        table.insert(UcaMetric::ChangeInOtherCurrentItems, year, deltas.other_current);
        table.insert(UcaMetric::UcaCashFlow, year, uca_cash_flow);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use core_types::{CoreError, IncomeStatement, MetricValue, StatementKind};
    use rust_decimal_macros::dec;

    #[test]
    fn first_year_has_zero_deltas() {
        let table = calculate(&fixtures::two_years()).unwrap();
        let first = FiscalYear::from("2024");

        for metric in [
            UcaMetric::ChangeInAccountsReceivable,
            UcaMetric::ChangeInInventory,
            UcaMetric::ChangeInAccountsPayable,
            UcaMetric::ChangeInOtherCurrentItems,
        ] {
            assert_eq!(table.get(metric, &first), Some(MetricValue::ZERO));
        }
        // 36400 + 15000 + 5000
        assert_eq!(
            table.get(UcaMetric::UcaCashFlow, &first),
            Some(MetricValue::Finite(dec!(56400)))
        );
    }

    #[test]
    fn later_years_add_working_capital_movement() {
        let statements = fixtures::two_years();
        let table = calculate(&statements).unwrap();
        let year = FiscalYear::from("2025");
        let value = |m| table.finite(m, &year).unwrap();

        // AR 60000 -> 67200, inventory 75000 -> 84000, AP 35000 -> 37800,
        // other current assets 10000 -> 11200, other current liabilities 18000 -> 19440.
        assert_eq!(value(UcaMetric::ChangeInAccountsReceivable), dec!(-7200));
        assert_eq!(value(UcaMetric::ChangeInInventory), dec!(-9000));
        assert_eq!(value(UcaMetric::ChangeInAccountsPayable), dec!(2800));
        assert_eq!(value(UcaMetric::ChangeInOtherCurrentItems), dec!(240));
        assert_eq!(value(UcaMetric::UcaCashFlow), dec!(51700));
    }

    #[test]
    fn uca_identity_holds_every_year() {
        let statements = statements::sample_statements(4, 2025).unwrap();
        let table = calculate(&statements).unwrap();
        let balance = statements.balance_sheet();

        for year in statements.fiscal_years().iter().skip(1) {
            let prior = balance.prior_year(year).unwrap();
            let bs = |item, y| balance.value(item, y).unwrap();
            let expected = table.finite(UcaMetric::NetIncome, year).unwrap()
                + table.finite(UcaMetric::Depreciation, year).unwrap()
                + table.finite(UcaMetric::Amortization, year).unwrap()
                + (bs(BalanceSheetItem::AccountsReceivable, prior)
                    - bs(BalanceSheetItem::AccountsReceivable, year))
                + (bs(BalanceSheetItem::Inventory, prior) - bs(BalanceSheetItem::Inventory, year))
                + (bs(BalanceSheetItem::AccountsPayable, year)
                    - bs(BalanceSheetItem::AccountsPayable, prior))
                + table.finite(UcaMetric::ChangeInOtherCurrentItems, year).unwrap();

            assert_eq!(table.finite(UcaMetric::UcaCashFlow, year).unwrap(), expected);
        }
    }

    #[test]
    fn first_year_does_not_need_working_capital_rows() {
        let income = fixtures::scenario_income();
        let balance = BalanceSheet::new([fixtures::YEAR0]).unwrap();
        let statements = FinancialStatements::new(income, balance).unwrap();

        assert!(calculate(&statements).is_ok());
    }

    #[test]
    fn oversized_working_capital_swing_fails_instead_of_panicking() {
        let income = IncomeStatement::new(["2024", "2025"])
            .unwrap()
            .with_row(IncomeStatementItem::NetIncome, [dec!(1), dec!(2)])
            .with_row(IncomeStatementItem::Depreciation, [dec!(0), dec!(0)])
            .with_row(IncomeStatementItem::Amortization, [dec!(0), dec!(0)]);
        let balance = BalanceSheet::new(["2024", "2025"])
            .unwrap()
            .with_row(BalanceSheetItem::AccountsReceivable, [Decimal::MAX, Decimal::MIN])
            .with_row(BalanceSheetItem::Inventory, [dec!(0), dec!(0)])
            .with_row(BalanceSheetItem::AccountsPayable, [dec!(0), dec!(0)])
            .with_row(BalanceSheetItem::OtherCurrentAssets, [dec!(0), dec!(0)])
            .with_row(BalanceSheetItem::OtherCurrentLiabilities, [dec!(0), dec!(0)]);
        let statements = FinancialStatements::new(income, balance).unwrap();

        assert_eq!(
            calculate(&statements).unwrap_err(),
            AnalyticsError::Statement(CoreError::ArithmeticOverflow {
                metric: "Change in Accounts Receivable".to_string(),
                year: FiscalYear::from("2025"),
            })
        );
    }

    #[test]
    fn missing_row_after_first_year_names_account_and_year() {
        let income = IncomeStatement::new(["2024", "2025"])
            .unwrap()
            .with_row(IncomeStatementItem::NetIncome, [dec!(1), dec!(2)])
            .with_row(IncomeStatementItem::Depreciation, [dec!(0), dec!(0)])
            .with_row(IncomeStatementItem::Amortization, [dec!(0), dec!(0)]);
        let balance = BalanceSheet::new(["2024", "2025"])
            .unwrap()
            .with_row(BalanceSheetItem::AccountsReceivable, [dec!(10), dec!(12)]);
        let statements = FinancialStatements::new(income, balance).unwrap();

        let err = calculate(&statements).unwrap_err();
        assert_eq!(
            err,
            AnalyticsError::Statement(CoreError::MissingLineItem {
                statement: StatementKind::BalanceSheet,
                line_item: "Inventory".to_string(),
                year: FiscalYear::from("2024"),
            })
        );
    }
}

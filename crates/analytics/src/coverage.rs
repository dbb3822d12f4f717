//! Debt service coverage.
//!
//! Scheduled principal is approximated by the current portion of long-term debt
//! carried on the balance sheet, not an amortization schedule.

use crate::ebitda::EbitdaMetric;
use crate::error::AnalyticsError;
use core_types::{BalanceSheet, BalanceSheetItem, Metric, MetricTable, MetricValue, OrOverflow};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CoverageMetric {
    Ebitda,
    InterestExpense,
    PrincipalPayments,
    TotalDebtService,
    TimesInterestEarned,
    Dscr,
    ShortTermDebt,
    LongTermDebt,
    TotalDebt,
    DebtToAssets,
}

impl Metric for CoverageMetric {
    const ALL: &'static [Self] = &[
        CoverageMetric::Ebitda,
        CoverageMetric::InterestExpense,
        CoverageMetric::PrincipalPayments,
        CoverageMetric::TotalDebtService,
        CoverageMetric::TimesInterestEarned,
        CoverageMetric::Dscr,
        CoverageMetric::ShortTermDebt,
        CoverageMetric::LongTermDebt,
        CoverageMetric::TotalDebt,
        CoverageMetric::DebtToAssets,
    ];

    fn label(&self) -> &'static str {
        match self {
            CoverageMetric::Ebitda => "EBITDA",
            CoverageMetric::InterestExpense => "Interest Expense",
            CoverageMetric::PrincipalPayments => "Principal Payments",
            CoverageMetric::TotalDebtService => "Total Debt Service",
            CoverageMetric::TimesInterestEarned => "Times Interest Earned",
            CoverageMetric::Dscr => "Debt Service Coverage Ratio (DSCR)",
            CoverageMetric::ShortTermDebt => "Short-term Debt",
            CoverageMetric::LongTermDebt => "Long-term Debt",
            CoverageMetric::TotalDebt => "Total Debt",
            CoverageMetric::DebtToAssets => "Debt to Assets Ratio",
        }
    }
}

/// Computes the debt service coverage table from EBITDA output and the balance sheet.
pub fn calculate(
    ebitda: &MetricTable<EbitdaMetric>,
    balance_sheet: &BalanceSheet,
) -> Result<MetricTable<CoverageMetric>, AnalyticsError> {
    let mut table = MetricTable::new(ebitda.fiscal_years());

    for year in ebitda.fiscal_years() {
        let earnings = ebitda.finite(EbitdaMetric::Ebitda, year)?;
        let interest = ebitda.finite(EbitdaMetric::InterestExpense, year)?;
        let principal = balance_sheet.value(BalanceSheetItem::CurrentPortionOfLongTermDebt, year)?;
        let short_term = balance_sheet.value(BalanceSheetItem::ShortTermDebt, year)?;
        let long_term = balance_sheet.value(BalanceSheetItem::LongTermDebt, year)?;
        let total_assets = balance_sheet.value(BalanceSheetItem::TotalAssets, year)?;

        let debt_service = interest
            .checked_add(principal)
            .or_overflow(CoverageMetric::TotalDebtService, year)?;
        let total_debt = short_term
            .checked_add(long_term)
            .and_then(|v| v.checked_add(principal))
            .or_overflow(CoverageMetric::TotalDebt, year)?;
        let dscr = MetricValue::ratio(earnings, debt_service).or_overflow(CoverageMetric::Dscr, year)?;
        let times_interest_earned = MetricValue::ratio(earnings, interest)
            .or_overflow(CoverageMetric::TimesInterestEarned, year)?;
        let debt_to_assets = MetricValue::ratio(total_debt, total_assets)
            .or_overflow(CoverageMetric::DebtToAssets, year)?;

        tracing::debug!(%year, %dscr, "DSCR calculated.");

        table.insert(CoverageMetric::Ebitda, year, earnings);
        table.insert(CoverageMetric::InterestExpense, year, interest);
        table.insert(CoverageMetric::PrincipalPayments, year, principal);
        table.insert(CoverageMetric::TotalDebtService, year, debt_service);
        table.insert(CoverageMetric::TimesInterestEarned, year, times_interest_earned);
        table.insert(CoverageMetric::Dscr, year, dscr);
        table.insert(CoverageMetric::ShortTermDebt, year, short_term);
        table.insert(CoverageMetric::LongTermDebt, year, long_term);
        table.insert(CoverageMetric::TotalDebt, year, total_debt);
        table.insert(CoverageMetric::DebtToAssets, year, debt_to_assets);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ebitda, fixtures};
    use core_types::{CoreError, FiscalYear, IncomeStatement, IncomeStatementItem};
    use rust_decimal_macros::dec;

    fn scenario_table() -> MetricTable<CoverageMetric> {
        let ebitda = ebitda::calculate(&fixtures::scenario_income()).unwrap();
        calculate(&ebitda, &fixtures::scenario_balance()).unwrap()
    }

    #[test]
    fn scenario_coverage() {
        let table = scenario_table();
        let year = FiscalYear::from(fixtures::YEAR0);
        let value = |m| table.finite(m, &year).unwrap();

        assert_eq!(value(CoverageMetric::PrincipalPayments), dec!(12000));
        assert_eq!(value(CoverageMetric::TotalDebtService), dec!(20000));
        assert_eq!(value(CoverageMetric::Dscr), dec!(5));
        assert_eq!(value(CoverageMetric::TimesInterestEarned), dec!(12.5));
        assert_eq!(value(CoverageMetric::TotalDebt), dec!(147000));
        assert_eq!(fixtures::round(value(CoverageMetric::DebtToAssets), 4), dec!(0.3542));
    }

    #[test]
    fn zero_interest_makes_times_interest_earned_infinite() {
        let income = IncomeStatement::new([fixtures::YEAR0])
            .unwrap()
            .with_row(IncomeStatementItem::Revenue, [dec!(200000)])
            .with_row(IncomeStatementItem::CostOfGoodsSold, [dec!(120000)])
            .with_row(IncomeStatementItem::OperatingExpenses, [dec!(40000)])
            .with_row(IncomeStatementItem::Depreciation, [dec!(5000)])
            .with_row(IncomeStatementItem::Amortization, [dec!(0)])
            .with_row(IncomeStatementItem::InterestExpense, [dec!(0)])
            .with_row(IncomeStatementItem::IncomeTaxes, [dec!(9000)]);
        let ebitda = ebitda::calculate(&income).unwrap();
        let table = calculate(&ebitda, &fixtures::scenario_balance()).unwrap();
        let year = FiscalYear::from(fixtures::YEAR0);

        assert_eq!(
            table.get(CoverageMetric::TimesInterestEarned, &year),
            Some(MetricValue::Infinite)
        );
        // 45000 / (0 + 12000)
        assert_eq!(table.get(CoverageMetric::Dscr, &year), Some(MetricValue::Finite(dec!(3.75))));
    }

    #[test]
    fn no_debt_service_makes_dscr_infinite() {
        let ebitda = ebitda::calculate(&fixtures::scenario_income()).unwrap();
        let mut balance = fixtures::scenario_balance();
        let year = FiscalYear::from(fixtures::YEAR0);
        balance.insert(BalanceSheetItem::CurrentPortionOfLongTermDebt, &year, dec!(0));

        let mut ebitda_without_interest = ebitda.clone();
        ebitda_without_interest.insert(EbitdaMetric::InterestExpense, &year, dec!(0));
        let table = calculate(&ebitda_without_interest, &balance).unwrap();

        assert_eq!(table.get(CoverageMetric::Dscr, &year), Some(MetricValue::Infinite));
        assert_eq!(table.get(CoverageMetric::TotalDebtService, &year), Some(MetricValue::ZERO));
    }

    #[test]
    fn zero_total_assets_makes_debt_to_assets_infinite() {
        let ebitda = ebitda::calculate(&fixtures::scenario_income()).unwrap();
        let mut balance = fixtures::scenario_balance();
        let year = FiscalYear::from(fixtures::YEAR0);
        balance.insert(BalanceSheetItem::TotalAssets, &year, dec!(0));
        let table = calculate(&ebitda, &balance).unwrap();

        assert_eq!(table.get(CoverageMetric::DebtToAssets, &year), Some(MetricValue::Infinite));
        assert_eq!(table.get(CoverageMetric::TotalDebt, &year), Some(dec!(147000).into()));
    }

    #[test]
    fn tiny_debt_service_fails_instead_of_panicking() {
        let mut ebitda = ebitda::calculate(&fixtures::scenario_income()).unwrap();
        let mut balance = fixtures::scenario_balance();
        let year = FiscalYear::from(fixtures::YEAR0);
        ebitda.insert(EbitdaMetric::Ebitda, &year, dec!(10000000000000000000000));
        ebitda.insert(EbitdaMetric::InterestExpense, &year, dec!(0));
        balance.insert(BalanceSheetItem::CurrentPortionOfLongTermDebt, &year, dec!(0.0000001));

        assert_eq!(
            calculate(&ebitda, &balance),
            Err(AnalyticsError::Statement(CoreError::ArithmeticOverflow {
                metric: "Debt Service Coverage Ratio (DSCR)".to_string(),
                year,
            }))
        );
    }

    #[test]
    fn missing_debt_row_fails() {
        let ebitda = ebitda::calculate(&fixtures::scenario_income()).unwrap();
        let balance = BalanceSheet::new([fixtures::YEAR0]).unwrap();

        assert!(matches!(
            calculate(&ebitda, &balance),
            Err(AnalyticsError::Statement(CoreError::MissingLineItem { .. }))
        ));
    }
}

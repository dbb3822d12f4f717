//! Earnings and margin metrics, derived from the income statement alone.

use crate::error::AnalyticsError;
use core_types::{IncomeStatement, IncomeStatementItem, Metric, MetricTable, OrOverflow};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EbitdaMetric {
    Revenue,
    GrossProfit,
    GrossMarginPct,
    OperatingIncome,
    OperatingMarginPct,
    Ebit,
    EbitMarginPct,
    Ebitda,
    EbitdaMarginPct,
    InterestExpense,
    IncomeTaxes,
}

impl Metric for EbitdaMetric {
    const ALL: &'static [Self] = &[
        EbitdaMetric::Revenue,
        EbitdaMetric::GrossProfit,
        EbitdaMetric::GrossMarginPct,
        EbitdaMetric::OperatingIncome,
        EbitdaMetric::OperatingMarginPct,
        EbitdaMetric::Ebit,
        EbitdaMetric::EbitMarginPct,
        EbitdaMetric::Ebitda,
        EbitdaMetric::EbitdaMarginPct,
        EbitdaMetric::InterestExpense,
        EbitdaMetric::IncomeTaxes,
    ];

    fn label(&self) -> &'static str {
        match self {
            EbitdaMetric::Revenue => "Revenue",
            EbitdaMetric::GrossProfit => "Gross Profit",
            EbitdaMetric::GrossMarginPct => "Gross Margin (%)",
            EbitdaMetric::OperatingIncome => "Operating Income",
            EbitdaMetric::OperatingMarginPct => "Operating Margin (%)",
            EbitdaMetric::Ebit => "EBIT",
            EbitdaMetric::EbitMarginPct => "EBIT Margin (%)",
            EbitdaMetric::Ebitda => "EBITDA",
            EbitdaMetric::EbitdaMarginPct => "EBITDA Margin (%)",
            EbitdaMetric::InterestExpense => "Interest Expense",
            EbitdaMetric::IncomeTaxes => "Income Taxes",
        }
    }
}

/// `value / revenue × 100`. A year with no revenue reports every margin as 0 so
/// the table stays numeric. `None` on overflow.
fn margin(value: Decimal, revenue: Decimal) -> Option<Decimal> {
    if revenue.is_zero() {
        Some(Decimal::ZERO)
    } else {
        value.checked_div(revenue)?.checked_mul(Decimal::ONE_HUNDRED)
    }
}

/// Computes the EBITDA table.
pub fn calculate(income: &IncomeStatement) -> Result<MetricTable<EbitdaMetric>, AnalyticsError> {
    let mut table = MetricTable::new(income.fiscal_years());

    for year in income.fiscal_years() {
        let revenue = income.value(IncomeStatementItem::Revenue, year)?;
        let cogs = income.value(IncomeStatementItem::CostOfGoodsSold, year)?;
        let operating_expenses = income.value(IncomeStatementItem::OperatingExpenses, year)?;
        let depreciation = income.value(IncomeStatementItem::Depreciation, year)?;
        let amortization = income.value(IncomeStatementItem::Amortization, year)?;
        let interest = income.value(IncomeStatementItem::InterestExpense, year)?;
        let taxes = income.value(IncomeStatementItem::IncomeTaxes, year)?;

        let gross_profit = revenue
            .checked_sub(cogs)
            .or_overflow(EbitdaMetric::GrossProfit, year)?;
        let operating_income = gross_profit
            .checked_sub(operating_expenses)
            .or_overflow(EbitdaMetric::OperatingIncome, year)?;
        // No non-operating items are modelled, so EBIT is operating income.
        let ebit = operating_income;
        let ebitda = ebit
            .checked_add(depreciation)
            .and_then(|v| v.checked_add(amortization))
            .or_overflow(EbitdaMetric::Ebitda, year)?;

        tracing::debug!(%year, %ebitda, "EBITDA calculated.");

        let margin_of = |metric: EbitdaMetric, value: Decimal| {
            margin(value, revenue).or_overflow(metric, year)
        };

        table.insert(EbitdaMetric::Revenue, year, revenue);
        table.insert(EbitdaMetric::GrossProfit, year, gross_profit);
        table.insert(
            EbitdaMetric::GrossMarginPct,
            year,
            margin_of(EbitdaMetric::GrossMarginPct, gross_profit)?,
        );
        table.insert(EbitdaMetric::OperatingIncome, year, operating_income);
        table.insert(
            EbitdaMetric::OperatingMarginPct,
            year,
            margin_of(EbitdaMetric::OperatingMarginPct, operating_income)?,
        );
        table.insert(EbitdaMetric::Ebit, year, ebit);
        table.insert(
            EbitdaMetric::EbitMarginPct,
            year,
            margin_of(EbitdaMetric::EbitMarginPct, ebit)?,
        );
        table.insert(EbitdaMetric::Ebitda, year, ebitda);
        table.insert(
            EbitdaMetric::EbitdaMarginPct,
            year,
            margin_of(EbitdaMetric::EbitdaMarginPct, ebitda)?,
        );
        table.insert(EbitdaMetric::InterestExpense, year, interest);
        table.insert(EbitdaMetric::IncomeTaxes, year, taxes);
    }

    Ok(table)
}

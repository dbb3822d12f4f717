//! Profitability, liquidity and working-capital efficiency ratios.

use crate::error::AnalyticsError;
use core_types::{
    BalanceSheetItem, FiscalYear, IncomeStatementItem, Metric, MetricTable, MetricValue, OrOverflow,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use statements::FinancialStatements;

pub const DAYS_IN_YEAR: Decimal = dec!(365);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RatioMetric {
    ReturnOnAssetsPct,
    ReturnOnEquityPct,
    NetProfitMarginPct,
    CurrentRatio,
    QuickRatio,
    ReceivablesTurnover,
    DaysReceivables,
    InventoryTurnover,
    DaysInventory,
    PayablesTurnover,
    DaysPayables,
    CashConversionCycle,
}

impl Metric for RatioMetric {
    const ALL: &'static [Self] = &[
        RatioMetric::ReturnOnAssetsPct,
        RatioMetric::ReturnOnEquityPct,
        RatioMetric::NetProfitMarginPct,
        RatioMetric::CurrentRatio,
        RatioMetric::QuickRatio,
        RatioMetric::ReceivablesTurnover,
        RatioMetric::DaysReceivables,
        RatioMetric::InventoryTurnover,
        RatioMetric::DaysInventory,
        RatioMetric::PayablesTurnover,
        RatioMetric::DaysPayables,
        RatioMetric::CashConversionCycle,
    ];

    fn label(&self) -> &'static str {
        match self {
            RatioMetric::ReturnOnAssetsPct => "Return on Assets (%)",
            RatioMetric::ReturnOnEquityPct => "Return on Equity (%)",
            RatioMetric::NetProfitMarginPct => "Net Profit Margin (%)",
            RatioMetric::CurrentRatio => "Current Ratio",
            RatioMetric::QuickRatio => "Quick Ratio",
            RatioMetric::ReceivablesTurnover => "Receivables Turnover",
            RatioMetric::DaysReceivables => "Days Receivables Outstanding",
            RatioMetric::InventoryTurnover => "Inventory Turnover",
            RatioMetric::DaysInventory => "Days Inventory Outstanding",
            RatioMetric::PayablesTurnover => "Payables Turnover",
            RatioMetric::DaysPayables => "Days Payables Outstanding",
            RatioMetric::CashConversionCycle => "Cash Conversion Cycle (Days)",
        }
    }
}

/// A turnover ratio paired with the days outstanding it implies.
struct Cycle {
    turnover: MetricValue,
    days: MetricValue,
}

impl Cycle {
    fn new(
        flow: Decimal,
        balance: Decimal,
        turnover_metric: RatioMetric,
        days_metric: RatioMetric,
        year: &FiscalYear,
    ) -> Result<Self, AnalyticsError> {
        let turnover = MetricValue::ratio(flow, balance).or_overflow(turnover_metric, year)?;
        let days = MetricValue::ratio_over(DAYS_IN_YEAR, turnover).or_overflow(days_metric, year)?;
        Ok(Self { turnover, days })
    }
}

/// `receivables + inventory - payables`; unbounded if any leg is.
///
/// `Infinite` carries no sign, so an unbounded payables period also reads as
/// `Infinite` rather than negative infinity.
fn cash_conversion_cycle(
    receivables: MetricValue,
    inventory: MetricValue,
    payables: MetricValue,
) -> Option<MetricValue> {
    match (receivables, inventory, payables) {
        (MetricValue::Finite(r), MetricValue::Finite(i), MetricValue::Finite(p)) => {
            r.checked_add(i)?.checked_sub(p).map(MetricValue::Finite)
        }
        _ => Some(MetricValue::Infinite),
    }
}

/// Computes the financial ratio table.
pub fn calculate(statements: &FinancialStatements) -> Result<MetricTable<RatioMetric>, AnalyticsError> {
    let income = statements.income_statement();
    let balance = statements.balance_sheet();
    let mut table = MetricTable::new(statements.fiscal_years());

    for year in statements.fiscal_years() {
        let revenue = income.value(IncomeStatementItem::Revenue, year)?;
        let cogs = income.value(IncomeStatementItem::CostOfGoodsSold, year)?;
        let net_income = income.value(IncomeStatementItem::NetIncome, year)?;

        let total_assets = balance.value(BalanceSheetItem::TotalAssets, year)?;
        let equity = balance.value(BalanceSheetItem::Equity, year)?;
        let current_assets = balance.value(BalanceSheetItem::TotalCurrentAssets, year)?;
        let current_liabilities = balance.value(BalanceSheetItem::TotalCurrentLiabilities, year)?;
        let receivables = balance.value(BalanceSheetItem::AccountsReceivable, year)?;
        let inventory = balance.value(BalanceSheetItem::Inventory, year)?;
        let payables = balance.value(BalanceSheetItem::AccountsPayable, year)?;

        let percent = |metric: RatioMetric, numerator: Decimal, denominator: Decimal| {
            MetricValue::percent(numerator, denominator).or_overflow(metric, year)
        };
        let ratio = |metric: RatioMetric, numerator: Decimal, denominator: Decimal| {
            MetricValue::ratio(numerator, denominator).or_overflow(metric, year)
        };

        let receivables_cycle = Cycle::new(
            revenue,
            receivables,
            RatioMetric::ReceivablesTurnover,
            RatioMetric::DaysReceivables,
            year,
        )?;
        let inventory_cycle = Cycle::new(
            cogs,
            inventory,
            RatioMetric::InventoryTurnover,
            RatioMetric::DaysInventory,
            year,
        )?;
        let payables_cycle = Cycle::new(
            cogs,
            payables,
            RatioMetric::PayablesTurnover,
            RatioMetric::DaysPayables,
            year,
        )?;
        let ccc = cash_conversion_cycle(
            receivables_cycle.days,
            inventory_cycle.days,
            payables_cycle.days,
        )
        .or_overflow(RatioMetric::CashConversionCycle, year)?;
        let current_ratio = ratio(RatioMetric::CurrentRatio, current_assets, current_liabilities)?;
        let quick_assets = current_assets
            .checked_sub(inventory)
            .or_overflow(RatioMetric::QuickRatio, year)?;

        tracing::debug!(%year, %current_ratio, %ccc, "Financial ratios calculated.");

        table.insert(
            RatioMetric::ReturnOnAssetsPct,
            year,
            percent(RatioMetric::ReturnOnAssetsPct, net_income, total_assets)?,
        );
        table.insert(
            RatioMetric::ReturnOnEquityPct,
            year,
            percent(RatioMetric::ReturnOnEquityPct, net_income, equity)?,
        );
        table.insert(
            RatioMetric::NetProfitMarginPct,
            year,
            percent(RatioMetric::NetProfitMarginPct, net_income, revenue)?,
        );
        table.insert(RatioMetric::CurrentRatio, year, current_ratio);
        table.insert(
            RatioMetric::QuickRatio,
            year,
            ratio(RatioMetric::QuickRatio, quick_assets, current_liabilities)?,
        );
        table.insert(RatioMetric::ReceivablesTurnover, year, receivables_cycle.turnover);
        table.insert(RatioMetric::DaysReceivables, year, receivables_cycle.days);
        table.insert(RatioMetric::InventoryTurnover, year, inventory_cycle.turnover);
        table.insert(RatioMetric::DaysInventory, year, inventory_cycle.days);
        table.insert(RatioMetric::PayablesTurnover, year, payables_cycle.turnover);
        table.insert(RatioMetric::DaysPayables, year, payables_cycle.days);
        table.insert(RatioMetric::CashConversionCycle, year, ccc);
    }

    Ok(table)
}

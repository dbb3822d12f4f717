use core_types::{BalanceSheet, BalanceSheetItem, IncomeStatement, IncomeStatementItem};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use statements::FinancialStatements;

pub(crate) const YEAR0: &str = "Year0";

pub(crate) fn scenario_income() -> IncomeStatement {
    IncomeStatement::new([YEAR0])
        .unwrap()
        .with_row(IncomeStatementItem::Revenue, [dec!(500000)])
        .with_row(IncomeStatementItem::CostOfGoodsSold, [dec!(300000)])
        .with_row(IncomeStatementItem::OperatingExpenses, [dec!(120000)])
        .with_row(IncomeStatementItem::Depreciation, [dec!(15000)])
        .with_row(IncomeStatementItem::Amortization, [dec!(5000)])
        .with_row(IncomeStatementItem::InterestExpense, [dec!(8000)])
        .with_row(IncomeStatementItem::IncomeTaxes, [dec!(15600)])
        .with_row(IncomeStatementItem::NetIncome, [dec!(36400)])
}

pub(crate) fn scenario_balance() -> BalanceSheet {
    BalanceSheet::new([YEAR0])
        .unwrap()
        .with_row(BalanceSheetItem::AccountsReceivable, [dec!(60000)])
        .with_row(BalanceSheetItem::Inventory, [dec!(75000)])
        .with_row(BalanceSheetItem::OtherCurrentAssets, [dec!(10000)])
        .with_row(BalanceSheetItem::TotalCurrentAssets, [dec!(190000)])
        .with_row(BalanceSheetItem::TotalAssets, [dec!(415000)])
        .with_row(BalanceSheetItem::AccountsPayable, [dec!(35000)])
        .with_row(BalanceSheetItem::ShortTermDebt, [dec!(15000)])
        .with_row(BalanceSheetItem::CurrentPortionOfLongTermDebt, [dec!(12000)])
        .with_row(BalanceSheetItem::OtherCurrentLiabilities, [dec!(18000)])
        .with_row(BalanceSheetItem::TotalCurrentLiabilities, [dec!(80000)])
        .with_row(BalanceSheetItem::LongTermDebt, [dec!(120000)])
        .with_row(BalanceSheetItem::Equity, [dec!(195000)])
}

/// The single-year reference business used throughout the metric tests.
pub(crate) fn scenario() -> FinancialStatements {
    FinancialStatements::new(scenario_income(), scenario_balance()).unwrap()
}

/// Two years of the demonstration dataset, labelled 2024 and 2025.
pub(crate) fn two_years() -> FinancialStatements {
    statements::sample_statements(2, 2025).unwrap()
}

pub(crate) fn round(value: Decimal, dp: u32) -> Decimal {
    value.round_dp(dp)
}

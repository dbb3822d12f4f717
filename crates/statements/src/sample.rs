use crate::error::StatementError;
use crate::store::FinancialStatements;
use core_types::{BalanceSheet, BalanceSheetItem, FiscalYear, IncomeStatement, IncomeStatementItem};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Base-year income statement for the demonstration business.
const BASE_INCOME: [(IncomeStatementItem, Decimal); 11] = [
    (IncomeStatementItem::Revenue, dec!(500000)),
    (IncomeStatementItem::CostOfGoodsSold, dec!(300000)),
    (IncomeStatementItem::GrossProfit, dec!(200000)),
    (IncomeStatementItem::OperatingExpenses, dec!(120000)),
    (IncomeStatementItem::Depreciation, dec!(15000)),
    (IncomeStatementItem::Amortization, dec!(5000)),
    (IncomeStatementItem::Ebit, dec!(60000)),
    (IncomeStatementItem::InterestExpense, dec!(8000)),
    (IncomeStatementItem::IncomeBeforeTaxes, dec!(52000)),
    (IncomeStatementItem::IncomeTaxes, dec!(15600)),
    (IncomeStatementItem::NetIncome, dec!(36400)),
];

/// Base-year balance sheet for the demonstration business.
const BASE_BALANCE: [(BalanceSheetItem, Decimal); 21] = [
    (BalanceSheetItem::Cash, dec!(45000)),
    (BalanceSheetItem::AccountsReceivable, dec!(60000)),
    (BalanceSheetItem::Inventory, dec!(75000)),
    (BalanceSheetItem::OtherCurrentAssets, dec!(10000)),
    (BalanceSheetItem::TotalCurrentAssets, dec!(190000)),
    (BalanceSheetItem::PropertyPlantEquipment, dec!(250000)),
    (BalanceSheetItem::AccumulatedDepreciation, dec!(-65000)),
    (BalanceSheetItem::NetPropertyPlantEquipment, dec!(185000)),
    (BalanceSheetItem::IntangibleAssets, dec!(25000)),
    (BalanceSheetItem::OtherLongTermAssets, dec!(15000)),
    (BalanceSheetItem::TotalAssets, dec!(415000)),
    (BalanceSheetItem::AccountsPayable, dec!(35000)),
    (BalanceSheetItem::ShortTermDebt, dec!(15000)),
    (BalanceSheetItem::CurrentPortionOfLongTermDebt, dec!(12000)),
    (BalanceSheetItem::OtherCurrentLiabilities, dec!(18000)),
    (BalanceSheetItem::TotalCurrentLiabilities, dec!(80000)),
    (BalanceSheetItem::LongTermDebt, dec!(120000)),
    (BalanceSheetItem::OtherLongTermLiabilities, dec!(20000)),
    (BalanceSheetItem::TotalLiabilities, dec!(220000)),
    (BalanceSheetItem::Equity, dec!(195000)),
    (BalanceSheetItem::TotalLiabilitiesAndEquity, dec!(415000)),
];

/// Builds the demonstration dataset used by the `sample` command.
///
/// Year 0 is the base business; each later year `i` grows income by
/// `1.10 + 0.05·i`, liabilities by `1.05 + 0.03·i` and every other balance by
/// `1.08 + 0.04·i`. Total assets, equity and the liabilities-and-equity
/// footing are then re-derived so the balance sheet balances.
///
/// Years are labelled `latest_year - years + 1 ..= latest_year`.
pub fn sample_statements(years: usize, latest_year: i32) -> Result<FinancialStatements, StatementError> {
    if years == 0 {
        return Err(StatementError::InvalidSample(
            "at least one fiscal year is required".to_string(),
        ));
    }
    let span = i32::try_from(years)
        .map_err(|_| StatementError::InvalidSample(format!("too many fiscal years: {years}")))?;

    let first_year = latest_year
        .checked_sub(span - 1)
        .ok_or_else(|| StatementError::InvalidSample(format!(
            "{years} fiscal years ending in {latest_year} start before the earliest supported year"
        )))?;

    let labels: Vec<FiscalYear> = (first_year..=latest_year)
        .map(|y| FiscalYear::new(y.to_string()))
        .collect();

    let mut income = IncomeStatement::new(labels.iter().cloned())?;
    let mut balance = BalanceSheet::new(labels.iter().cloned())?;

    for (i, year) in labels.iter().enumerate() {
        let step = Decimal::from(i);

        let income_growth = if i == 0 { Decimal::ONE } else { dec!(1.10) + dec!(0.05) * step };
        for (item, base) in BASE_INCOME {
            income.insert(item, year, base * income_growth);
        }

        let (asset_growth, liability_growth) = if i == 0 {
            (Decimal::ONE, Decimal::ONE)
        } else {
            (dec!(1.08) + dec!(0.04) * step, dec!(1.05) + dec!(0.03) * step)
        };
        let grown = |item: BalanceSheetItem, base: Decimal| {
            if item.is_liability() {
                base * liability_growth
            } else {
                base * asset_growth
            }
        };
        let base_of = |wanted: BalanceSheetItem| {
            BASE_BALANCE
                .iter()
                .find(|(item, _)| *item == wanted)
                .map(|(item, base)| grown(*item, *base))
                .unwrap_or(Decimal::ZERO)
        };

        for (item, base) in BASE_BALANCE {
            balance.insert(item, year, grown(item, base));
        }

        if i > 0 {
            let total_assets = base_of(BalanceSheetItem::TotalCurrentAssets)
                + base_of(BalanceSheetItem::NetPropertyPlantEquipment)
                + base_of(BalanceSheetItem::IntangibleAssets)
                + base_of(BalanceSheetItem::OtherLongTermAssets);
            let total_liabilities = base_of(BalanceSheetItem::TotalLiabilities);
            let equity = total_assets - total_liabilities;

            balance.insert(BalanceSheetItem::TotalAssets, year, total_assets);
            balance.insert(BalanceSheetItem::Equity, year, equity);
            balance.insert(
                BalanceSheetItem::TotalLiabilitiesAndEquity,
                year,
                total_liabilities + equity,
            );
        }
    }

    tracing::debug!(years, latest_year, "Generated sample statements.");
    Ok(FinancialStatements::new(income, balance)?)
}

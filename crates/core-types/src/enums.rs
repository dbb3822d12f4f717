use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies which of the two input statements a line item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatementKind {
    IncomeStatement,
    BalanceSheet,
}

impl StatementKind {
    pub fn label(&self) -> &'static str {
        match self {
            StatementKind::IncomeStatement => "Income Statement",
            StatementKind::BalanceSheet => "Balance Sheet",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A closed set of accounts belonging to one statement.
///
/// Implementors map each account to its canonical label and back. Parsing is
/// forgiving about case, punctuation and a handful of common abbreviations, so
/// "COGS", "cost of goods sold" and "Cost of Goods Sold" all resolve to the same
/// account.
pub trait LineItem: Copy + Ord + fmt::Debug + Send + Sync + Serialize + 'static {
    /// The statement every account of this type lives on.
    const STATEMENT: StatementKind;

    /// Every account, in presentation order.
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;

    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    fn from_label(label: &str) -> Option<Self> {
        let wanted = normalize_label(label);
        if wanted.is_empty() {
            return None;
        }
        Self::ALL.iter().copied().find(|item| {
            normalize_label(item.label()) == wanted
                || item.aliases().iter().any(|alias| normalize_label(alias) == wanted)
        })
    }
}

/// Lowercases and strips everything except ASCII letters and digits.
fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IncomeStatementItem {
    Revenue,
    CostOfGoodsSold,
    GrossProfit,
    OperatingExpenses,
    Depreciation,
    Amortization,
    Ebit,
    InterestExpense,
    IncomeBeforeTaxes,
    IncomeTaxes,
    NetIncome,
}

impl LineItem for IncomeStatementItem {
    const STATEMENT: StatementKind = StatementKind::IncomeStatement;

    const ALL: &'static [Self] = &[
        IncomeStatementItem::Revenue,
        IncomeStatementItem::CostOfGoodsSold,
        IncomeStatementItem::GrossProfit,
        IncomeStatementItem::OperatingExpenses,
        IncomeStatementItem::Depreciation,
        IncomeStatementItem::Amortization,
        IncomeStatementItem::Ebit,
        IncomeStatementItem::InterestExpense,
        IncomeStatementItem::IncomeBeforeTaxes,
        IncomeStatementItem::IncomeTaxes,
        IncomeStatementItem::NetIncome,
    ];

    fn label(&self) -> &'static str {
        match self {
            IncomeStatementItem::Revenue => "Revenue",
            IncomeStatementItem::CostOfGoodsSold => "Cost of Goods Sold",
            IncomeStatementItem::GrossProfit => "Gross Profit",
            IncomeStatementItem::OperatingExpenses => "Operating Expenses",
            IncomeStatementItem::Depreciation => "Depreciation",
            IncomeStatementItem::Amortization => "Amortization",
            IncomeStatementItem::Ebit => "EBIT",
            IncomeStatementItem::InterestExpense => "Interest Expense",
            IncomeStatementItem::IncomeBeforeTaxes => "Income Before Taxes",
            IncomeStatementItem::IncomeTaxes => "Income Taxes",
            IncomeStatementItem::NetIncome => "Net Income",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            IncomeStatementItem::Revenue => &["Sales", "Net Sales"],
            IncomeStatementItem::CostOfGoodsSold => &["COGS", "Cost of Sales"],
            IncomeStatementItem::OperatingExpenses => &["OpEx"],
            IncomeStatementItem::InterestExpense => &["Interest"],
            IncomeStatementItem::IncomeBeforeTaxes => &["Pre-tax Income"],
            IncomeStatementItem::IncomeTaxes => &["Taxes"],
            _ => &[],
        }
    }
}

impl fmt::Display for IncomeStatementItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BalanceSheetItem {
    Cash,
    AccountsReceivable,
    Inventory,
    OtherCurrentAssets,
    TotalCurrentAssets,
    PropertyPlantEquipment,
    AccumulatedDepreciation,
    NetPropertyPlantEquipment,
    IntangibleAssets,
    OtherLongTermAssets,
    TotalAssets,
    AccountsPayable,
    ShortTermDebt,
    CurrentPortionOfLongTermDebt,
    OtherCurrentLiabilities,
    TotalCurrentLiabilities,
    LongTermDebt,
    OtherLongTermLiabilities,
    TotalLiabilities,
    Equity,
    TotalLiabilitiesAndEquity,
}

impl BalanceSheetItem {
    /// Liability accounts, including the liabilities-and-equity footing.
    pub fn is_liability(&self) -> bool {
        matches!(
            self,
            BalanceSheetItem::AccountsPayable
                | BalanceSheetItem::ShortTermDebt
                | BalanceSheetItem::CurrentPortionOfLongTermDebt
                | BalanceSheetItem::OtherCurrentLiabilities
                | BalanceSheetItem::TotalCurrentLiabilities
                | BalanceSheetItem::LongTermDebt
                | BalanceSheetItem::OtherLongTermLiabilities
                | BalanceSheetItem::TotalLiabilities
                | BalanceSheetItem::TotalLiabilitiesAndEquity
        )
    }
}

impl LineItem for BalanceSheetItem {
    const STATEMENT: StatementKind = StatementKind::BalanceSheet;

    const ALL: &'static [Self] = &[
        BalanceSheetItem::Cash,
        BalanceSheetItem::AccountsReceivable,
        BalanceSheetItem::Inventory,
        BalanceSheetItem::OtherCurrentAssets,
        BalanceSheetItem::TotalCurrentAssets,
        BalanceSheetItem::PropertyPlantEquipment,
        BalanceSheetItem::AccumulatedDepreciation,
        BalanceSheetItem::NetPropertyPlantEquipment,
        BalanceSheetItem::IntangibleAssets,
        BalanceSheetItem::OtherLongTermAssets,
        BalanceSheetItem::TotalAssets,
        BalanceSheetItem::AccountsPayable,
        BalanceSheetItem::ShortTermDebt,
        BalanceSheetItem::CurrentPortionOfLongTermDebt,
        BalanceSheetItem::OtherCurrentLiabilities,
        BalanceSheetItem::TotalCurrentLiabilities,
        BalanceSheetItem::LongTermDebt,
        BalanceSheetItem::OtherLongTermLiabilities,
        BalanceSheetItem::TotalLiabilities,
        BalanceSheetItem::Equity,
        BalanceSheetItem::TotalLiabilitiesAndEquity,
    ];

    fn label(&self) -> &'static str {
        match self {
            BalanceSheetItem::Cash => "Cash",
            BalanceSheetItem::AccountsReceivable => "Accounts Receivable",
            BalanceSheetItem::Inventory => "Inventory",
            BalanceSheetItem::OtherCurrentAssets => "Other Current Assets",
            BalanceSheetItem::TotalCurrentAssets => "Total Current Assets",
            BalanceSheetItem::PropertyPlantEquipment => "Property, Plant & Equipment",
            BalanceSheetItem::AccumulatedDepreciation => "Accumulated Depreciation",
            BalanceSheetItem::NetPropertyPlantEquipment => "Net PP&E",
            BalanceSheetItem::IntangibleAssets => "Intangible Assets",
            BalanceSheetItem::OtherLongTermAssets => "Other Long-term Assets",
            BalanceSheetItem::TotalAssets => "Total Assets",
            BalanceSheetItem::AccountsPayable => "Accounts Payable",
            BalanceSheetItem::ShortTermDebt => "Short-term Debt",
            BalanceSheetItem::CurrentPortionOfLongTermDebt => "Current Portion of Long-term Debt",
            BalanceSheetItem::OtherCurrentLiabilities => "Other Current Liabilities",
            BalanceSheetItem::TotalCurrentLiabilities => "Total Current Liabilities",
            BalanceSheetItem::LongTermDebt => "Long-term Debt",
            BalanceSheetItem::OtherLongTermLiabilities => "Other Long-term Liabilities",
            BalanceSheetItem::TotalLiabilities => "Total Liabilities",
            BalanceSheetItem::Equity => "Equity",
            BalanceSheetItem::TotalLiabilitiesAndEquity => "Total Liabilities & Equity",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            BalanceSheetItem::AccountsReceivable => &["AR", "Receivables"],
            BalanceSheetItem::TotalCurrentAssets => &["Current Assets"],
            BalanceSheetItem::PropertyPlantEquipment => &["PP&E"],
            BalanceSheetItem::NetPropertyPlantEquipment => &["Net Property, Plant & Equipment"],
            BalanceSheetItem::AccountsPayable => &["AP", "Payables"],
            BalanceSheetItem::CurrentPortionOfLongTermDebt => {
                &["Current Portion LTD", "Current Portion of LTD", "CPLTD"]
            }
            BalanceSheetItem::TotalCurrentLiabilities => &["Current Liabilities"],
            BalanceSheetItem::Equity => &["Total Equity", "Owners Equity", "Shareholders Equity"],
            BalanceSheetItem::TotalLiabilitiesAndEquity => &["Total Liabilities and Equity"],
            _ => &[],
        }
    }
}

impl fmt::Display for BalanceSheetItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

use crate::enums::{BalanceSheetItem, IncomeStatementItem, LineItem};
use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// An opaque fiscal-year label such as "2024" or "FY2024".
///
/// Chronology is defined by the order in which a statement lists its years,
/// never by comparing labels.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FiscalYear(String);

impl FiscalYear {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FiscalYear {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for FiscalYear {
    fn from(label: String) -> Self {
        Self(label)
    }
}

/// A year-indexed financial statement: account → fiscal year → amount.
///
/// Rows are typed by `K`. Rows that a loader could not map onto `K` are kept
/// verbatim in `unrecognized` so nothing in the source data is silently lost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement<K: LineItem> {
    fiscal_years: Vec<FiscalYear>,
    line_items: BTreeMap<K, BTreeMap<FiscalYear, Decimal>>,
    unrecognized: BTreeMap<String, BTreeMap<FiscalYear, Decimal>>,
}

pub type IncomeStatement = Statement<IncomeStatementItem>;
pub type BalanceSheet = Statement<BalanceSheetItem>;

impl<K: LineItem> Statement<K> {
    /// Creates an empty statement over the given, chronologically ordered years.
    pub fn new<I, Y>(fiscal_years: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = Y>,
        Y: Into<FiscalYear>,
    {
        let fiscal_years: Vec<FiscalYear> = fiscal_years.into_iter().map(Into::into).collect();
        if fiscal_years.is_empty() {
            return Err(CoreError::NoFiscalYears(K::STATEMENT));
        }

        let mut seen = BTreeSet::new();
        for year in &fiscal_years {
            if !seen.insert(year) {
                return Err(CoreError::DuplicateFiscalYear {
                    statement: K::STATEMENT,
                    year: year.clone(),
                });
            }
        }

        Ok(Self {
            fiscal_years,
            line_items: BTreeMap::new(),
            unrecognized: BTreeMap::new(),
        })
    }

    /// Adds a row whose values line up with `fiscal_years()`. A short row
    /// leaves the trailing years absent.
    pub fn with_row<V>(mut self, item: K, values: V) -> Self
    where
        V: IntoIterator<Item = Decimal>,
    {
        let row = self.line_items.entry(item).or_default();
        for (year, value) in self.fiscal_years.iter().zip(values) {
            row.insert(year.clone(), value);
        }
        self
    }

    /// Sets a single cell. Returns `false` if the year is not on this statement.
    pub fn insert(&mut self, item: K, year: &FiscalYear, value: Decimal) -> bool {
        if !self.fiscal_years.contains(year) {
            return false;
        }
        self.line_items
            .entry(item)
            .or_default()
            .insert(year.clone(), value);
        true
    }

    /// Keeps a cell whose row label did not map onto a known account.
    pub fn insert_unrecognized(&mut self, label: &str, year: &FiscalYear, value: Decimal) -> bool {
        if !self.fiscal_years.contains(year) {
            return false;
        }
        self.unrecognized
            .entry(label.to_string())
            .or_default()
            .insert(year.clone(), value);
        true
    }

    pub fn fiscal_years(&self) -> &[FiscalYear] {
        &self.fiscal_years
    }

    /// The year listed immediately before `year`, if any.
    pub fn prior_year(&self, year: &FiscalYear) -> Option<&FiscalYear> {
        let idx = self.fiscal_years.iter().position(|y| y == year)?;
        idx.checked_sub(1).map(|prev| &self.fiscal_years[prev])
    }

    pub fn get(&self, item: K, year: &FiscalYear) -> Option<Decimal> {
        self.line_items.get(&item)?.get(year).copied()
    }

    /// Looks up a required cell.
    pub fn value(&self, item: K, year: &FiscalYear) -> Result<Decimal, CoreError> {
        self.get(item, year).ok_or_else(|| CoreError::MissingLineItem {
            statement: K::STATEMENT,
            line_item: item.label().to_string(),
            year: year.clone(),
        })
    }

    pub fn line_items(&self) -> impl Iterator<Item = K> + '_ {
        self.line_items.keys().copied()
    }

    pub fn unrecognized_labels(&self) -> impl Iterator<Item = &str> {
        self.unrecognized.keys().map(String::as_str)
    }

    pub fn unrecognized_rows(&self) -> impl Iterator<Item = (&str, &BTreeMap<FiscalYear, Decimal>)> {
        self.unrecognized
            .iter()
            .map(|(label, row)| (label.as_str(), row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::StatementKind;
    use rust_decimal_macros::dec;

    #[test]
    fn rejects_empty_year_list() {
        let err = IncomeStatement::new(Vec::<FiscalYear>::new()).unwrap_err();
        assert_eq!(err, CoreError::NoFiscalYears(StatementKind::IncomeStatement));
    }

    #[test]
    fn rejects_duplicate_years() {
        let err = BalanceSheet::new(["2023", "2024", "2023"]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::DuplicateFiscalYear { statement: StatementKind::BalanceSheet, ref year }
                if year.as_str() == "2023"
        ));
    }

    #[test]
    fn missing_cell_names_statement_item_and_year() {
        let statement = IncomeStatement::new(["2023", "2024"])
            .unwrap()
            .with_row(IncomeStatementItem::Revenue, [dec!(100)]);

        let year = FiscalYear::from("2024");
        let err = statement.value(IncomeStatementItem::Revenue, &year).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Income Statement is missing line item 'Revenue' for fiscal year 2024"
        );
        assert_eq!(
            statement.value(IncomeStatementItem::Revenue, &FiscalYear::from("2023")),
            Ok(dec!(100))
        );
    }

    #[test]
    fn prior_year_follows_listed_order() {
        let statement = BalanceSheet::new(["FY-B", "FY-A"]).unwrap();
        assert_eq!(statement.prior_year(&"FY-B".into()), None);
        assert_eq!(
            statement.prior_year(&"FY-A".into()).map(FiscalYear::as_str),
            Some("FY-B")
        );
    }

    #[test]
    fn insert_ignores_unknown_years() {
        let mut statement = BalanceSheet::new(["2024"]).unwrap();
        assert!(!statement.insert(BalanceSheetItem::Cash, &"2030".into(), dec!(1)));
        assert!(statement.insert_unrecognized("Goodwill", &"2024".into(), dec!(5)));
        assert_eq!(statement.unrecognized_labels().collect::<Vec<_>>(), vec!["Goodwill"]);
    }
}

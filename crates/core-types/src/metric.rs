use crate::error::CoreError;
use crate::structs::FiscalYear;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The result of a single metric calculation.
///
/// A ratio whose denominator is exactly zero is `Infinite` rather than an
/// error: a business with no debt service has unbounded coverage, which is a
/// favourable reading. Callers must unwrap explicitly with `finite()` before
/// doing arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricValue {
    Finite(Decimal),
    Infinite,
}

impl MetricValue {
    pub const ZERO: MetricValue = MetricValue::Finite(Decimal::ZERO);

    /// `numerator / denominator`, or `Infinite` when the denominator is zero.
    /// `None` if the quotient overflows `Decimal`.
    pub fn ratio(numerator: Decimal, denominator: Decimal) -> Option<Self> {
        if denominator.is_zero() {
            Some(MetricValue::Infinite)
        } else {
            numerator.checked_div(denominator).map(MetricValue::Finite)
        }
    }

    /// `numerator / denominator × 100`, or `Infinite` when the denominator is zero.
    pub fn percent(numerator: Decimal, denominator: Decimal) -> Option<Self> {
        Self::ratio(numerator, denominator)?.scale(Decimal::ONE_HUNDRED)
    }

    /// `numerator / denominator` where the denominator is itself a metric.
    ///
    /// Dividing by an unbounded value yields zero; dividing by zero yields
    /// `Infinite`.
    pub fn ratio_over(numerator: Decimal, denominator: MetricValue) -> Option<Self> {
        match denominator {
            MetricValue::Finite(d) => Self::ratio(numerator, d),
            MetricValue::Infinite => Some(MetricValue::ZERO),
        }
    }

    pub fn scale(self, factor: Decimal) -> Option<Self> {
        match self {
            MetricValue::Finite(v) => v.checked_mul(factor).map(MetricValue::Finite),
            MetricValue::Infinite => Some(MetricValue::Infinite),
        }
    }

    pub fn finite(self) -> Option<Decimal> {
        match self {
            MetricValue::Finite(v) => Some(v),
            MetricValue::Infinite => None,
        }
    }

    pub fn is_infinite(self) -> bool {
        matches!(self, MetricValue::Infinite)
    }

    /// Inclusive threshold test. `Infinite` clears every threshold.
    pub fn at_least(self, threshold: Decimal) -> bool {
        match self {
            MetricValue::Finite(v) => v >= threshold,
            MetricValue::Infinite => true,
        }
    }
}

impl From<Decimal> for MetricValue {
    fn from(value: Decimal) -> Self {
        MetricValue::Finite(value)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Finite(v) => match f.precision() {
                Some(dp) => {
                    let rounded = v.round_dp_with_strategy(dp as u32, RoundingStrategy::MidpointAwayFromZero);
                    write!(f, "{:.*}", dp, rounded)
                }
                None => write!(f, "{}", v),
            },
            MetricValue::Infinite => f.write_str("∞"),
        }
    }
}

/// Converts an overflowed (`None`) calculation into
/// [`CoreError::ArithmeticOverflow`] for the metric being computed.
pub trait OrOverflow<T> {
    fn or_overflow<M: Metric>(self, metric: M, year: &FiscalYear) -> Result<T, CoreError>;
}

impl<T> OrOverflow<T> for Option<T> {
    fn or_overflow<M: Metric>(self, metric: M, year: &FiscalYear) -> Result<T, CoreError> {
        self.ok_or_else(|| CoreError::ArithmeticOverflow {
            metric: metric.label().to_string(),
            year: year.clone(),
        })
    }
}

/// A named row in one calculator's output table.
pub trait Metric: Copy + Ord + fmt::Debug + Send + Sync + Serialize + 'static {
    /// Every row, in presentation order.
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;

    fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.label().eq_ignore_ascii_case(label.trim()))
    }
}

/// A calculator's output: metric → fiscal year → value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTable<M: Metric> {
    fiscal_years: Vec<FiscalYear>,
    rows: BTreeMap<M, BTreeMap<FiscalYear, MetricValue>>,
}

impl<M: Metric> MetricTable<M> {
    pub fn new(fiscal_years: &[FiscalYear]) -> Self {
        Self {
            fiscal_years: fiscal_years.to_vec(),
            rows: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, metric: M, year: &FiscalYear, value: impl Into<MetricValue>) {
        self.rows
            .entry(metric)
            .or_default()
            .insert(year.clone(), value.into());
    }

    pub fn fiscal_years(&self) -> &[FiscalYear] {
        &self.fiscal_years
    }

    pub fn latest_year(&self) -> Option<&FiscalYear> {
        self.fiscal_years.last()
    }

    pub fn get(&self, metric: M, year: &FiscalYear) -> Option<MetricValue> {
        self.rows.get(&metric)?.get(year).copied()
    }

    /// Cell lookup by display label, for renderers that address rows by name.
    pub fn get_by_label(&self, label: &str, year: &FiscalYear) -> Option<MetricValue> {
        self.get(M::from_label(label)?, year)
    }

    pub fn value(&self, metric: M, year: &FiscalYear) -> Result<MetricValue, CoreError> {
        self.get(metric, year).ok_or_else(|| CoreError::MissingMetric {
            metric: metric.label().to_string(),
            year: year.clone(),
        })
    }

    /// Looks up a cell that downstream arithmetic needs as a plain number.
    pub fn finite(&self, metric: M, year: &FiscalYear) -> Result<Decimal, CoreError> {
        self.value(metric, year)?
            .finite()
            .ok_or_else(|| CoreError::MissingMetric {
                metric: metric.label().to_string(),
                year: year.clone(),
            })
    }

    /// One row's values in fiscal-year order; `None` where a cell is absent.
    pub fn row(&self, metric: M) -> Vec<Option<MetricValue>> {
        self.fiscal_years
            .iter()
            .map(|year| self.get(metric, year))
            .collect()
    }

    /// Populated rows in presentation order.
    pub fn rows(&self) -> impl Iterator<Item = (M, Vec<Option<MetricValue>>)> + '_ {
        M::ALL
            .iter()
            .copied()
            .filter(|m| self.rows.contains_key(m))
            .map(|m| (m, self.row(m)))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
    enum TestMetric {
        Coverage,
        Margin,
    }

    impl Metric for TestMetric {
        const ALL: &'static [Self] = &[TestMetric::Coverage, TestMetric::Margin];

        fn label(&self) -> &'static str {
            match self {
                TestMetric::Coverage => "Coverage",
                TestMetric::Margin => "Margin (%)",
            }
        }
    }

    #[test]
    fn zero_denominator_is_infinite() {
        assert_eq!(MetricValue::ratio(dec!(5), dec!(0)), Some(MetricValue::Infinite));
        assert_eq!(MetricValue::percent(dec!(5), dec!(0)), Some(MetricValue::Infinite));
        assert_eq!(MetricValue::ratio(dec!(5), dec!(2)), Some(MetricValue::Finite(dec!(2.5))));
    }

    #[test]
    fn ratio_over_unbounded_denominator_is_zero() {
        assert_eq!(
            MetricValue::ratio_over(dec!(365), MetricValue::Infinite),
            Some(MetricValue::ZERO)
        );
        assert_eq!(
            MetricValue::ratio_over(dec!(365), MetricValue::ZERO),
            Some(MetricValue::Infinite)
        );
        assert_eq!(
            MetricValue::ratio_over(dec!(365), MetricValue::Finite(dec!(5))),
            Some(MetricValue::Finite(dec!(73)))
        );
    }

    #[test]
    fn overflow_is_none_not_a_panic() {
        assert_eq!(MetricValue::ratio(Decimal::MAX, dec!(0.5)), None);
        assert_eq!(MetricValue::percent(Decimal::MAX, dec!(1)), None);
        assert_eq!(MetricValue::Finite(Decimal::MAX).scale(dec!(2)), None);
        assert_eq!(MetricValue::Infinite.scale(dec!(2)), Some(MetricValue::Infinite));
    }

    #[test]
    fn or_overflow_names_metric_and_year() {
        let year = FiscalYear::from("2024");
        let err = None::<Decimal>.or_overflow(TestMetric::Margin, &year).unwrap_err();
        assert_eq!(
            err,
            CoreError::ArithmeticOverflow {
                metric: "Margin (%)".to_string(),
                year,
            }
        );
        assert_eq!(Some(dec!(1)).or_overflow(TestMetric::Margin, &FiscalYear::from("2024")), Ok(dec!(1)));
    }

    #[test]
    fn infinite_clears_every_threshold() {
        assert!(MetricValue::Infinite.at_least(dec!(1000000)));
        assert!(MetricValue::Finite(dec!(1.25)).at_least(dec!(1.25)));
        assert!(!MetricValue::Finite(dec!(1.2499)).at_least(dec!(1.25)));
    }

    #[test]
    fn display_honours_precision() {
        assert_eq!(format!("{:.2}", MetricValue::Finite(dec!(2.375))), "2.38");
        assert_eq!(format!("{:.2}", MetricValue::Infinite), "∞");
    }

    #[test]
    fn table_lookups() {
        let years = vec![FiscalYear::from("2023"), FiscalYear::from("2024")];
        let mut table = MetricTable::<TestMetric>::new(&years);
        table.insert(TestMetric::Margin, &years[0], dec!(12.5));
        table.insert(TestMetric::Coverage, &years[1], MetricValue::Infinite);

        assert_eq!(table.latest_year(), Some(&years[1]));
        assert_eq!(
            table.get_by_label("margin (%)", &years[0]),
            Some(MetricValue::Finite(dec!(12.5)))
        );
        assert_eq!(table.row(TestMetric::Coverage), vec![None, Some(MetricValue::Infinite)]);
        assert!(matches!(
            table.finite(TestMetric::Coverage, &years[1]),
            Err(CoreError::MissingMetric { .. })
        ));

        let order: Vec<_> = table.rows().map(|(m, _)| m).collect();
        assert_eq!(order, vec![TestMetric::Coverage, TestMetric::Margin]);
    }
}

use crate::coverage::CoverageMetric;
use crate::ebitda::EbitdaMetric;
use crate::ratios::RatioMetric;
use crate::uca::UcaMetric;
use core_types::{FiscalYear, Metric, MetricTable, MetricValue};
use serde::Serialize;

/// The complete output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub fiscal_years: Vec<FiscalYear>,
    pub uca: MetricTable<UcaMetric>,
    pub ebitda: MetricTable<EbitdaMetric>,
    pub coverage: MetricTable<CoverageMetric>,
    pub ratios: MetricTable<RatioMetric>,
}

/// One line of the headline summary: a label and its value for each fiscal year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyMetric {
    pub label: &'static str,
    pub values: Vec<Option<MetricValue>>,
}

impl KeyMetric {
    fn from_table<M: Metric>(label: &'static str, table: &MetricTable<M>, metric: M) -> Self {
        Self {
            label,
            values: table.row(metric),
        }
    }
}

impl AnalysisReport {
    pub fn latest_year(&self) -> Option<&FiscalYear> {
        self.fiscal_years.last()
    }

    /// The headline figures a credit officer reads first.
    pub fn key_metrics(&self) -> Vec<KeyMetric> {
        vec![
            KeyMetric::from_table("EBITDA", &self.ebitda, EbitdaMetric::Ebitda),
            KeyMetric::from_table("EBITDA Margin (%)", &self.ebitda, EbitdaMetric::EbitdaMarginPct),
            KeyMetric::from_table("UCA Cash Flow", &self.uca, UcaMetric::UcaCashFlow),
            KeyMetric::from_table("DSCR", &self.coverage, CoverageMetric::Dscr),
            KeyMetric::from_table("Current Ratio", &self.ratios, RatioMetric::CurrentRatio),
            KeyMetric::from_table("ROE (%)", &self.ratios, RatioMetric::ReturnOnEquityPct),
        ]
    }
}

use crate::error::AnalyzerError;
use analytics::{AnalysisReport, CoverageMetric, RatioMetric};
use configuration::{CandidateFloor, RecommendationRules};
use core_types::{FiscalYear, MetricValue};
use serde::Serialize;

pub mod error;
pub mod rating;

pub use rating::{DebtServiceRating, LiquidityRating, ProfitabilityRating, RiskTier};

/// The lending verdict for the most recent fiscal year of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub fiscal_year: FiscalYear,
    pub dscr: MetricValue,
    pub current_ratio: MetricValue,
    pub roe_pct: MetricValue,
    pub debt_service: DebtServiceRating,
    pub liquidity: LiquidityRating,
    pub profitability: ProfitabilityRating,
    /// One line per dimension, in debt service / liquidity / profitability order.
    pub commentary: Vec<String>,
    pub tier: RiskTier,
    pub recommendation: &'static str,
}

/// Turns the latest year's coverage, liquidity and return figures into a
/// qualitative risk tier.
pub struct RecommendationSynthesizer {
    rules: RecommendationRules,
}

impl RecommendationSynthesizer {
    pub fn new(rules: RecommendationRules) -> Self {
        Self { rules }
    }

    pub fn synthesize(&self, report: &AnalysisReport) -> Result<Recommendation, AnalyzerError> {
        let year = report.latest_year().ok_or(AnalyzerError::NoFiscalYears)?;

        let dscr = report.coverage.value(CoverageMetric::Dscr, year)?;
        let current_ratio = report.ratios.value(RatioMetric::CurrentRatio, year)?;
        let roe_pct = report.ratios.value(RatioMetric::ReturnOnEquityPct, year)?;

        let debt_service = DebtServiceRating::rate(dscr, &self.rules.debt_service);
        let liquidity = LiquidityRating::rate(current_ratio, &self.rules.liquidity);
        let profitability = ProfitabilityRating::rate(roe_pct, &self.rules.profitability);

        let tier = if clears(&self.rules.strong_candidate, dscr, current_ratio, roe_pct) {
            RiskTier::StrongCandidate
        } else if clears(&self.rules.acceptable_candidate, dscr, current_ratio, roe_pct) {
            RiskTier::AcceptableCandidate
        } else {
            RiskTier::CautionAdvised
        };

        let commentary = vec![
            format!("Debt Service: {} (DSCR: {:.2})", debt_service.commentary(), dscr),
            format!(
                "Liquidity: {} (Current Ratio: {:.2})",
                liquidity.commentary(),
                current_ratio
            ),
            format!("Profitability: {} (ROE: {:.2}%)", profitability.commentary(), roe_pct),
        ];

        tracing::info!(%year, %tier, "Recommendation synthesized.");

        Ok(Recommendation {
            fiscal_year: year.clone(),
            dscr,
            current_ratio,
            roe_pct,
            debt_service,
            liquidity,
            profitability,
            commentary,
            tier,
            recommendation: tier.recommendation(),
        })
    }
}

fn clears(floor: &CandidateFloor, dscr: MetricValue, current_ratio: MetricValue, roe_pct: MetricValue) -> bool {
    dscr.at_least(floor.min_dscr)
        && current_ratio.at_least(floor.min_current_ratio)
        && roe_pct.at_least(floor.min_roe_pct)
}
